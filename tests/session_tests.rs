//! Preview Session Tests
//!
//! Tests for:
//! - Initial sun angles and light distance
//! - Control events flowing into light, shadow, model and animation
//! - Walk in / walk out camera glides
//! - Split-view frame setup and shadow map reallocation

use std::sync::Arc;

use glam::{Vec3, Vec4};

use shadow_sim::animation::{AnimationClip, NO_ACTION};
use shadow_sim::gui::ControlEvent;
use shadow_sim::scene::{Aabb, Material, MeshMaterials, Model, ModelMesh};
use shadow_sim::session::{TOP_DOWN_HOME, WalkDirection};
use shadow_sim::shadow::FrustumBound;
use shadow_sim::{Input, LoadedModel, ShadowSim, SimConfig, SimError};

const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn character() -> LoadedModel {
    let mesh = ModelMesh {
        name: "Body".to_string(),
        skinned: true,
        cast_shadows: false,
        receive_shadows: false,
        materials: MeshMaterials::Multi(vec![
            Material::standard(Vec4::ONE, 0.0, 0.5),
            Material::basic(Vec4::ONE),
        ]),
    };
    let bounds = Aabb::new(Vec3::new(-0.5, -0.1, -0.2), Vec3::new(0.5, 1.8, 0.2));
    LoadedModel {
        model: Model::new("xbot", vec![mesh], bounds),
        clips: vec![
            Arc::new(AnimationClip::new("idle", 2.0)),
            Arc::new(AnimationClip::new("walk", 1.0)),
            Arc::new(AnimationClip::new("agree", 3.0)),
        ],
    }
}

fn session() -> ShadowSim {
    let mut sim = ShadowSim::new(SimConfig::default(), 1280, 720);
    sim.on_model_loaded(character());
    sim
}

fn run(sim: &mut ShadowSim, seconds: f32) {
    let input = Input::new();
    let steps = (seconds / 0.01).round() as usize;
    for _ in 0..steps {
        sim.update(0.01, &input);
    }
}

// ============================================================================
// Startup
// ============================================================================

#[test]
fn initial_angles_come_from_light_position() {
    let sim = ShadowSim::new(SimConfig::default(), 1280, 720);
    assert!(approx(sim.params().azimuth, 315.0));
    assert!(approx(sim.params().altitude, 19.471_22));
    assert!(approx(sim.light_distance(), 15.0));
}

#[test]
fn session_runs_without_model() {
    let mut sim = ShadowSim::new(SimConfig::default(), 1280, 720);
    sim.on_model_failed(&SimError::AssetNotFound("missing.glb".to_string()));

    sim.handle(ControlEvent::BaseAction("walk".to_string()));
    sim.handle(ControlEvent::Rotation(45.0));
    run(&mut sim, 0.5);

    assert!(sim.model().is_none());
    assert_eq!(sim.panel_state().current_base_action, NO_ACTION);
}

#[test]
fn loaded_model_is_prepared_for_preview() {
    let sim = session();
    let model = sim.model().unwrap();

    assert!(approx(model.world_bounds().min.y, 0.0));
    assert_eq!(model.scale, Vec3::splat(4.0));
    assert!(model.meshes.iter().all(|m| m.cast_shadows));
    assert!(model.materials().all(|m| m.blending().transparent));

    let animation = sim.animation().unwrap();
    assert_eq!(animation.all_actions().len(), 2);
    assert_eq!(animation.current_base_action(), "idle");
}

// ============================================================================
// Controls
// ============================================================================

#[test]
fn sun_angles_move_light_on_its_sphere() {
    let mut sim = session();
    sim.handle(ControlEvent::Azimuth(90.0));
    sim.handle(ControlEvent::Altitude(0.0));

    let position = sim.light().position;
    assert!((position - Vec3::new(0.0, 0.0, 15.0)).length() < EPSILON);
    assert!(approx(sim.light().distance(), 15.0));
}

#[test]
fn shadow_bound_event_updates_camera_and_params() {
    let mut sim = session();
    sim.handle(ControlEvent::ShadowBound(FrustumBound::Near, -20.0));

    assert_eq!(sim.light().shadow.camera.near, -20.0);
    assert_eq!(sim.params().shadow_near, -20.0);
}

#[test]
fn map_size_change_reallocates_on_next_frame() {
    let mut sim = session();
    let first = sim.render_frame();
    let old = sim.light().shadow.map().unwrap().clone();
    assert_eq!(first.shadow_map_size, 4096);

    sim.handle(ControlEvent::ShadowMapSize(1024));
    assert!(sim.light().shadow.map().is_none());

    let frame = sim.render_frame();
    assert_eq!(frame.shadow_map_size, 1024);
    assert_ne!(sim.light().shadow.map().unwrap().id, old.id);
}

#[test]
fn shadow_helper_toggles() {
    let mut sim = session();
    assert!(sim.shadow_helper().is_none());

    sim.handle(ControlEvent::ShowShadowHelper(true));
    let before = *sim.shadow_helper().unwrap().corners();

    sim.handle(ControlEvent::Azimuth(10.0));
    assert_ne!(*sim.shadow_helper().unwrap().corners(), before);

    sim.handle(ControlEvent::ShowShadowHelper(false));
    assert!(sim.shadow_helper().is_none());
}

#[test]
fn hiding_model_keeps_its_shadow() {
    let mut sim = session();
    sim.handle(ControlEvent::ShowModel(false));

    let model = sim.model().unwrap();
    assert!(model.materials().all(|m| m.blending().opacity == 0.0));
    assert!(model.meshes.iter().all(|m| m.cast_shadows));
}

#[test]
fn rotation_is_relative_to_loaded_yaw() {
    let mut sim = session();
    sim.handle(ControlEvent::Rotation(90.0));
    assert!(approx(
        sim.model().unwrap().rotation_y,
        std::f32::consts::FRAC_PI_2
    ));
}

#[test]
fn base_action_event_cross_fades() {
    let mut sim = session();
    sim.handle(ControlEvent::BaseAction("walk".to_string()));
    run(&mut sim, 0.5);

    let animation = sim.animation().unwrap();
    assert_eq!(animation.current_base_action(), "walk");
    assert!(approx(animation.base_action("walk").unwrap().weight, 1.0));
    assert!(approx(animation.base_action("idle").unwrap().weight, 0.0));
}

// ============================================================================
// Walks
// ============================================================================

#[test]
fn walk_in_glides_back_to_home() {
    let mut sim = session();
    sim.handle(ControlEvent::WalkIn);

    let start = sim.top_down_camera().position();
    assert!(approx(start.z, TOP_DOWN_HOME.z + 10.0));
    assert_eq!(sim.walk().unwrap().direction, WalkDirection::In);
    assert_eq!(sim.animation().unwrap().current_base_action(), "walk");

    run(&mut sim, 1.5);
    let mid = sim.top_down_camera().position();
    assert!(approx(mid.z, TOP_DOWN_HOME.z + 5.0), "got {mid}");

    run(&mut sim, 2.0);
    let end = sim.top_down_camera().position();
    assert!(approx(end.z, TOP_DOWN_HOME.z), "got {end}");
    assert!(sim.walk().is_none());
}

#[test]
fn walk_out_leaves_home() {
    let mut sim = session();
    sim.handle(ControlEvent::WalkOut);
    assert!(approx(sim.top_down_camera().position().z, TOP_DOWN_HOME.z));

    run(&mut sim, 3.5);
    let end = sim.top_down_camera().position();
    assert!(approx(end.z, TOP_DOWN_HOME.z - 10.0), "got {end}");
    assert!(approx(end.y, TOP_DOWN_HOME.y));
}

#[test]
fn finished_walk_returns_to_idle() {
    let mut sim = session();
    sim.handle(ControlEvent::WalkIn);
    // Walk, then wait out the loop-synchronized fade back
    run(&mut sim, 6.0);

    assert!(sim.walk().is_none());
    assert_eq!(sim.animation().unwrap().current_base_action(), "idle");
}

#[test]
fn walk_in_again_keeps_walking() {
    let config = SimConfig {
        walk_duration_ms: 3500,
        ..SimConfig::default()
    };
    let mut sim = ShadowSim::new(config, 1280, 720);
    sim.on_model_loaded(character());

    sim.handle(ControlEvent::WalkIn);
    run(&mut sim, 3.6);
    // The walk is over but the fade back to idle still waits for a loop.
    assert!(sim.walk().is_none());
    assert_eq!(sim.animation().unwrap().current_base_action(), "walk");
    assert!(sim.animation().unwrap().scheduler().pending().is_some());

    sim.handle(ControlEvent::WalkIn);
    assert!(sim.animation().unwrap().scheduler().pending().is_none());

    run(&mut sim, 1.0);
    let animation = sim.animation().unwrap();
    assert!(sim.walk().is_some());
    assert_eq!(animation.current_base_action(), "walk");
    assert!(approx(animation.base_action("walk").unwrap().weight, 1.0));
    assert!(approx(animation.base_action("idle").unwrap().weight, 0.0));
}

#[test]
fn instant_walk_still_reaches_its_end() {
    let config = SimConfig {
        walk_duration_ms: 0,
        ..SimConfig::default()
    };
    let mut sim = ShadowSim::new(config, 1280, 720);
    sim.on_model_loaded(character());

    sim.handle(ControlEvent::WalkIn);
    run(&mut sim, 0.05);
    assert!(sim.walk().is_none());
    assert!(approx(sim.top_down_camera().position().z, TOP_DOWN_HOME.z));

    sim.handle(ControlEvent::WalkOut);
    run(&mut sim, 0.05);
    let end = sim.top_down_camera().position();
    assert!(approx(end.z, TOP_DOWN_HOME.z - 10.0), "got {end}");
}

#[test]
fn playback_speed_reaches_the_mixer() {
    let config = SimConfig {
        playback_speed: 1.5,
        ..SimConfig::default()
    };
    let mut sim = ShadowSim::new(config, 1280, 720);
    sim.on_model_loaded(character());

    assert!(approx(sim.animation().unwrap().mixer().time_scale(), 1.5));
}

#[test]
fn top_down_camera_looks_straight_down() {
    let mut sim = session();
    sim.handle(ControlEvent::WalkOut);
    run(&mut sim, 1.0);

    let forward = sim.top_down_camera().forward();
    assert!((forward - Vec3::NEG_Y).length() < EPSILON, "got {forward}");
}

// ============================================================================
// Frame
// ============================================================================

#[test]
fn split_view_halves_the_window() {
    let mut sim = session();
    sim.resize(1600, 800);

    let frame = sim.render_frame();
    assert!(approx(frame.orbit.viewport.width, 800.0));
    assert!(approx(frame.top_down.viewport.x, 800.0));
    assert!(approx(sim.camera().aspect, 1.0));
    assert!(approx(sim.top_down_camera().aspect, 1.0));
    assert!(frame.shadow_view_projection.is_some());
}

#[test]
fn panel_state_lists_registered_actions() {
    let sim = session();
    let state = sim.panel_state();
    assert_eq!(state.base_actions, vec!["idle", "walk"]);
    assert_eq!(state.current_base_action, "idle");
}
