//! Headless shadow preview.
//!
//! Loads the character, then plays a short scripted session at a fixed
//! 60 Hz step: walk, walk in, a full sun sweep and a shadow-map resize.
//! Usage: `shadow_sim [config.json]`

use std::time::Duration;

use shadow_sim::gui::ControlPanel;
use shadow_sim::{ControlEvent, FpsCounter, GltfLoader, Input, ShadowSim, SimConfig, Timer};

const FRAME_STEP: Duration = Duration::from_micros(16_667);
const TOTAL_FRAMES: u64 = 60 * 20;

fn scripted_event(frame: u64) -> Option<ControlEvent> {
    match frame {
        60 => Some(ControlEvent::BaseAction("walk".to_string())),
        240 => Some(ControlEvent::BaseAction("idle".to_string())),
        300 => Some(ControlEvent::WalkIn),
        600 => Some(ControlEvent::ShowShadowHelper(true)),
        660..=1020 if frame % 10 == 0 => Some(ControlEvent::Azimuth((frame - 660) as f32)),
        1080 => Some(ControlEvent::ShadowMapSize(2048)),
        1140 => Some(ControlEvent::WalkOut),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut sim = ShadowSim::new(config, 1280, 720);
    match GltfLoader::load(&sim.config().model_path) {
        Ok(loaded) => sim.on_model_loaded(loaded),
        Err(e) => sim.on_model_failed(&e),
    }

    let egui_ctx = egui::Context::default();
    let mut panel = ControlPanel::new();
    let input = Input::new();
    let mut timer = Timer::fixed(FRAME_STEP);
    let mut fps_counter = FpsCounter::new();

    for frame in 0..TOTAL_FRAMES {
        timer.tick();

        egui_ctx.begin_pass(egui::RawInput::default());
        let mut events = panel.show(&egui_ctx, &sim.panel_state());
        // Headless: the panel is tessellated but never drawn.
        let egui::FullOutput { shapes, .. } = egui_ctx.end_pass();
        let primitives = egui_ctx.tessellate(shapes, egui_ctx.pixels_per_point());
        log::trace!("frame {frame}: {} panel primitives", primitives.len());
        events.extend(scripted_event(frame));

        for event in events {
            log::debug!("frame {frame}: {event:?}");
            sim.handle(event);
        }

        sim.update(timer.dt_seconds(), &input);
        let views = sim.render_frame();

        if let Some(report) = fps_counter.record(timer.delta()) {
            let light = sim.light().position;
            let weights = sim
                .animation()
                .map(|a| {
                    a.base_actions()
                        .iter()
                        .map(|b| format!("{}={:.2}", b.name, b.weight))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            log::info!(
                "t={:.1}s fps={:.0} ({:.2} ms) light=({:.2}, {:.2}, {:.2}) map={} [{}] {weights}",
                timer.elapsed().as_secs_f32(),
                report.fps,
                report.frame_ms,
                light.x,
                light.y,
                light.z,
                views.shadow_map_size,
                sim.animation()
                    .map_or(shadow_sim::animation::NO_ACTION, |a| a.current_base_action()),
            );
        }
    }

    log::info!("Finished after {} frames", timer.frame_count());
    Ok(())
}
