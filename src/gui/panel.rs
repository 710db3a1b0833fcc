use crate::gui::{
    ControlEvent, SLIDERS, SliderTarget, WALK_IN_LABEL, WALK_OUT_LABEL, base_action_labels,
};
use crate::params::Params;
use crate::shadow::FrustumBound;

/// What the panel needs to read each frame.
pub struct PanelState<'a> {
    pub params: &'a Params,
    pub base_actions: Vec<&'a str>,
    pub current_base_action: &'a str,
}

/// egui rendering of the control panel.
pub struct ControlPanel {
    pub open: bool,
    pub title: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            open: true,
            title: "Controls".to_string(),
        }
    }
}

impl ControlPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the panel and returns the changes the user made this frame.
    pub fn show(&mut self, ctx: &egui::Context, state: &PanelState<'_>) -> Vec<ControlEvent> {
        let mut events = Vec::new();

        egui::Window::new(self.title.as_str())
            .open(&mut self.open)
            .resizable(false)
            .show(ctx, |ui| draw_contents(ui, state, &mut events));

        events
    }
}

fn draw_contents(ui: &mut egui::Ui, state: &PanelState<'_>, events: &mut Vec<ControlEvent>) {
    for spec in &SLIDERS {
        let mut value = slider_value(state.params, spec.target);
        let mut slider = egui::Slider::new(&mut value, spec.min..=spec.max).text(spec.label);
        if let Some(step) = spec.step {
            slider = slider.step_by(f64::from(step));
        }
        if ui.add(slider).changed() {
            events.push(spec.event(value));
        }
    }

    let mut show_helper = state.params.show_shadow_helper;
    if ui.checkbox(&mut show_helper, "showShadowHelper").changed() {
        events.push(ControlEvent::ShowShadowHelper(show_helper));
    }

    let mut show_model = state.params.show_model;
    if ui.checkbox(&mut show_model, "showModel").changed() {
        events.push(ControlEvent::ShowModel(show_model));
    }

    egui::CollapsingHeader::new("Base Actions")
        .default_open(true)
        .show(ui, |ui| {
            for name in base_action_labels(state.base_actions.iter().copied()) {
                // Highlight the pose currently driving transition timing
                let text = if name == state.current_base_action {
                    egui::RichText::new(name)
                        .strong()
                        .color(egui::Color32::LIGHT_GREEN)
                } else {
                    egui::RichText::new(name)
                };
                if ui.button(text).clicked() {
                    events.push(ControlEvent::BaseAction(name.to_string()));
                }
            }

            if ui.button(WALK_IN_LABEL).clicked() {
                events.push(ControlEvent::WalkIn);
            }
            if ui.button(WALK_OUT_LABEL).clicked() {
                events.push(ControlEvent::WalkOut);
            }
        });
}

fn slider_value(params: &Params, target: SliderTarget) -> f32 {
    match target {
        SliderTarget::Rotation => params.rotation,
        SliderTarget::Azimuth => params.azimuth,
        SliderTarget::Altitude => params.altitude,
        SliderTarget::ShadowBound(bound) => match bound {
            FrustumBound::Near => params.shadow_near,
            FrustumBound::Far => params.shadow_far,
            FrustumBound::Left => params.shadow_left,
            FrustumBound::Right => params.shadow_right,
            FrustumBound::Top => params.shadow_top,
            FrustumBound::Bottom => params.shadow_bottom,
        },
        SliderTarget::ShadowMapSize => params.shadow_map_size as f32,
    }
}
