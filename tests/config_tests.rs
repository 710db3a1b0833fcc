//! Configuration and Control Panel Tests
//!
//! Tests for:
//! - Params / SimConfig defaults and JSON overrides
//! - Slider descriptors: ranges, clamping and step snapping
//! - Base-action button labels

use shadow_sim::gui::{ControlEvent, SLIDERS, SliderSpec, SliderTarget, base_action_labels};
use shadow_sim::params::{CROSS_FADE_DURATION_MS, Params, SimConfig, WALK_DURATION_MS};
use shadow_sim::shadow::{FrustumBound, ShadowFrustumBounds};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Params
// ============================================================================

#[test]
fn default_params_match_default_frustum() {
    let params = Params::default();
    assert_eq!(params.shadow_bounds(), ShadowFrustumBounds::default());
    assert!(params.show_model);
    assert!(!params.show_shadow_helper);
    assert!(approx(params.rotation, 0.0));
}

#[test]
fn default_config_timings() {
    let config = SimConfig::default();
    assert_eq!(config.cross_fade_duration_ms, CROSS_FADE_DURATION_MS);
    assert_eq!(config.walk_duration_ms, WALK_DURATION_MS);
    assert!(approx(config.cross_fade_duration(), 0.35));
    assert!(approx(config.walk_duration(), 3.0));
    assert!(approx(config.walk_speed(), 10.0 / 3.0));
    assert!(approx(config.playback_speed, 1.0));
}

#[test]
fn json_overrides_only_given_fields() {
    let config = SimConfig::from_json_str(
        r#"{ "modelPath": "other.glb", "playbackSpeed": 0.5, "params": { "shadowMapSize": 1024, "showModel": false } }"#,
    )
    .unwrap();

    assert_eq!(config.model_path, "other.glb");
    assert!(approx(config.playback_speed, 0.5));
    assert_eq!(config.params.shadow_map_size, 1024);
    assert!(!config.params.show_model);
    assert!(approx(config.params.shadow_far, 50.0));
    assert_eq!(config.walk_duration_ms, WALK_DURATION_MS);
}

#[test]
fn invalid_json_is_an_error() {
    assert!(SimConfig::from_json_str("{ not json").is_err());
}

#[test]
fn zero_walk_duration_has_no_speed() {
    let config = SimConfig {
        walk_duration_ms: 0,
        ..SimConfig::default()
    };
    assert!(approx(config.walk_speed(), 0.0));
}

// ============================================================================
// Sliders
// ============================================================================

fn slider(target: SliderTarget) -> SliderSpec {
    SLIDERS.into_iter().find(|s| s.target == target).unwrap()
}

#[test]
fn slider_ranges() {
    let altitude = slider(SliderTarget::Altitude);
    assert!(approx(altitude.min, 0.0) && approx(altitude.max, 180.0));

    let near = slider(SliderTarget::ShadowBound(FrustumBound::Near));
    assert!(approx(near.min, -100.0) && approx(near.max, 0.0));

    let map = slider(SliderTarget::ShadowMapSize);
    assert!(approx(map.min, 512.0) && approx(map.max, 8192.0));
    assert_eq!(map.step, Some(256.0));
}

#[test]
fn slider_events_are_clamped() {
    let azimuth = slider(SliderTarget::Azimuth);
    assert_eq!(azimuth.event(400.0), ControlEvent::Azimuth(360.0));

    let far = slider(SliderTarget::ShadowBound(FrustumBound::Far));
    assert_eq!(
        far.event(-3.0),
        ControlEvent::ShadowBound(FrustumBound::Far, 0.0)
    );
}

#[test]
fn map_size_snaps_to_step() {
    let map = slider(SliderTarget::ShadowMapSize);
    assert_eq!(map.event(1000.0), ControlEvent::ShadowMapSize(1024));
    assert_eq!(map.event(100.0), ControlEvent::ShadowMapSize(512));
}

#[test]
fn base_action_labels_start_with_none() {
    assert_eq!(
        base_action_labels(["idle", "walk"]),
        vec!["None", "idle", "walk"]
    );
}
