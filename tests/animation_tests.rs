//! Animation Mixer Tests
//!
//! Tests for:
//! - Ramp evaluation and completion
//! - AnimationAction loop modes (Once, Loop, PingPong)
//! - Weight fades and time-scale warps in mixer time
//! - Warped cross-fades between clips of different lengths
//! - AnimationClip duration from keyframe times
//! - Controller playback speed

use std::sync::Arc;

use shadow_sim::animation::{
    AnimationClip, AnimationController, AnimationMixer, LoopMode, MixerEvent, Ramp,
};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn clip(name: &str, duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(name, duration))
}

// ============================================================================
// Ramp
// ============================================================================

#[test]
fn ramp_interpolates_inside_window() {
    let ramp = Ramp::new(1.0, 2.0, 0.0, 1.0);
    assert!(approx(ramp.evaluate(2.0), 0.5));
    assert!(approx(ramp.evaluate(0.0), 0.0));
    assert!(approx(ramp.evaluate(5.0), 1.0));
}

#[test]
fn ramp_finishes_strictly_after_end() {
    let ramp = Ramp::new(0.0, 1.0, 1.0, 0.0);
    assert!(!ramp.is_finished(1.0));
    assert!(ramp.is_finished(1.01));
}

#[test]
fn ramp_zero_duration_jumps_to_target() {
    let ramp = Ramp::new(3.0, 0.0, 2.0, 7.0);
    assert!(approx(ramp.evaluate(3.0), 7.0));
}

// ============================================================================
// AnimationClip
// ============================================================================

#[test]
fn clip_duration_is_last_keyframe_time() {
    let clip = AnimationClip::from_keyframe_times("walk", [0.5, 1.25, 0.75]);
    assert_eq!(clip.name, "walk");
    assert!(approx(clip.duration, 1.25));
}

#[test]
fn clip_without_channels_has_zero_duration() {
    let clip = AnimationClip::from_keyframe_times("empty", std::iter::empty());
    assert!(approx(clip.duration, 0.0));
}

// ============================================================================
// Loop Modes
// ============================================================================

#[test]
fn loop_mode_wraps_and_reports_loop() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("walk", 1.0));
    mixer.action_mut(key).unwrap().play();

    assert!(mixer.update(0.6).is_empty());

    let events = mixer.update(0.6);
    assert_eq!(
        events.as_slice(),
        &[MixerEvent::Loop {
            action: key,
            loop_delta: 1
        }]
    );
    let time = mixer.action(key).unwrap().time;
    assert!(approx(time, 0.2), "Expected 0.2, got {time}");
}

#[test]
fn once_mode_clamps_and_finishes() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("jump", 1.0));
    {
        let action = mixer.action_mut(key).unwrap();
        action.loop_mode = LoopMode::Once;
        action.play();
    }

    let events = mixer.update(1.5);
    assert_eq!(events.as_slice(), &[MixerEvent::Finished { action: key }]);

    let action = mixer.action(key).unwrap();
    assert!(approx(action.time, 1.0));
    assert!(action.paused);
}

#[test]
fn ping_pong_bounces_at_both_ends() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("wave", 1.0));
    {
        let action = mixer.action_mut(key).unwrap();
        action.loop_mode = LoopMode::PingPong;
        action.play();
    }

    let events = mixer.update(1.25);
    assert!(matches!(
        events.as_slice(),
        [MixerEvent::Loop { loop_delta: 1, .. }]
    ));
    assert!(approx(mixer.action(key).unwrap().time, 0.75));

    // Playing backwards now
    assert!(mixer.update(0.5).is_empty());
    assert!(approx(mixer.action(key).unwrap().time, 0.25));

    let events = mixer.update(0.5);
    assert!(matches!(
        events.as_slice(),
        [MixerEvent::Loop { loop_delta: -1, .. }]
    ));
    assert!(approx(mixer.action(key).unwrap().time, 0.25));
}

#[test]
fn actions_not_playing_do_not_advance() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("idle", 2.0));

    mixer.update(0.5);
    assert!(approx(mixer.action(key).unwrap().time, 0.0));
}

#[test]
fn disabled_action_keeps_its_time() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("idle", 2.0));
    {
        let action = mixer.action_mut(key).unwrap();
        action.play();
        action.enabled = false;
    }

    mixer.update(0.5);
    let action = mixer.action(key).unwrap();
    assert!(approx(action.time, 0.0));
    assert!(approx(action.effective_weight(), 0.0));
}

// ============================================================================
// Fades
// ============================================================================

#[test]
fn clip_action_is_cached_by_clip_name() {
    let mut mixer = AnimationMixer::new();
    let a = mixer.clip_action(clip("idle", 2.0));
    let b = mixer.clip_action(clip("idle", 2.0));
    assert_eq!(a, b);
    assert_eq!(mixer.existing_action("idle"), Some(a));
    assert_eq!(mixer.list_animations(), vec!["idle"]);
}

#[test]
fn fade_in_ramps_weight_up() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("walk", 1.0));
    mixer.action_mut(key).unwrap().play();
    mixer.fade_in(key, 1.0);

    mixer.update(0.25);
    let weight = mixer.action(key).unwrap().effective_weight();
    assert!(approx(weight, 0.25), "Expected 0.25, got {weight}");
}

#[test]
fn finished_fade_out_disables_action() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("walk", 1.0));
    mixer.action_mut(key).unwrap().play();
    mixer.fade_out(key, 1.0);

    mixer.update(0.5);
    assert!(approx(mixer.action(key).unwrap().effective_weight(), 0.5));

    mixer.update(0.6);
    let action = mixer.action(key).unwrap();
    assert!(!action.enabled);
    assert!(!action.is_fading());
    assert!(approx(action.effective_weight(), 0.0));
}

#[test]
fn set_effective_weight_cancels_fade() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("walk", 1.0));
    mixer.action_mut(key).unwrap().play();
    mixer.fade_out(key, 1.0);
    mixer.action_mut(key).unwrap().set_effective_weight(0.8);

    mixer.update(0.5);
    let action = mixer.action(key).unwrap();
    assert!(!action.is_fading());
    assert!(approx(action.effective_weight(), 0.8));
}

#[test]
fn mixer_time_scale_speeds_up_fades() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("walk", 1.0));
    mixer.action_mut(key).unwrap().play();
    mixer.set_time_scale(2.0);
    mixer.fade_in(key, 1.0);

    mixer.update(0.25);
    assert!((mixer.time() - 0.5).abs() < 1e-9);
    assert!(approx(mixer.action(key).unwrap().effective_weight(), 0.5));
}

#[test]
fn short_fade_stays_sharp_after_long_session() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("walk", 1.0));
    mixer.action_mut(key).unwrap().play();

    // A bit over a day of mixer time.
    mixer.update(100_000.0);
    mixer.fade_in(key, 0.35);
    mixer.update(0.175);

    let weight = mixer.action(key).unwrap().effective_weight();
    assert!((weight - 0.5).abs() < 1e-4, "Expected 0.5, got {weight}");
}

// ============================================================================
// Warps
// ============================================================================

#[test]
fn warp_to_zero_pauses_action() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("walk", 1.0));
    let now = mixer.time();
    {
        let action = mixer.action_mut(key).unwrap();
        action.play();
        action.warp(now, 1.0, 0.0, 0.5);
    }

    mixer.update(0.6);
    let action = mixer.action(key).unwrap();
    assert!(action.paused);
    assert!(!action.is_warping());
    assert!(approx(action.effective_time_scale(), 0.0));
}

#[test]
fn cross_fade_warps_towards_matching_cycle_rates() {
    let mut mixer = AnimationMixer::new();
    let idle = mixer.clip_action(clip("idle", 1.0));
    let walk = mixer.clip_action(clip("walk", 2.0));
    mixer.action_mut(idle).unwrap().play();
    mixer.action_mut(walk).unwrap().play();

    mixer.cross_fade(idle, walk, 1.0, true);

    mixer.update(0.5);
    let from = mixer.action(idle).unwrap();
    let to = mixer.action(walk).unwrap();
    assert!(approx(from.effective_weight(), 0.5));
    assert!(approx(to.effective_weight(), 0.5));
    // idle: 1 -> 0.5, walk: 2 -> 1
    assert!(approx(from.effective_time_scale(), 0.75));
    assert!(approx(to.effective_time_scale(), 1.5));

    mixer.update(0.6);
    let from = mixer.action(idle).unwrap();
    let to = mixer.action(walk).unwrap();
    assert!(!from.enabled);
    assert!(approx(from.time_scale(), 0.5));
    assert!(approx(to.time_scale(), 1.0));
    assert!(approx(to.effective_weight(), 1.0));
}

#[test]
fn cross_fade_without_warp_keeps_time_scales() {
    let mut mixer = AnimationMixer::new();
    let idle = mixer.clip_action(clip("idle", 1.0));
    let walk = mixer.clip_action(clip("walk", 2.0));
    mixer.action_mut(idle).unwrap().play();
    mixer.action_mut(walk).unwrap().play();

    mixer.cross_fade(idle, walk, 1.0, false);
    mixer.update(0.5);

    assert!(approx(mixer.action(idle).unwrap().effective_time_scale(), 1.0));
    assert!(approx(mixer.action(walk).unwrap().effective_time_scale(), 1.0));
}

#[test]
fn stop_all_action_rewinds_everything() {
    let mut mixer = AnimationMixer::new();
    let key = mixer.clip_action(clip("walk", 1.0));
    mixer.action_mut(key).unwrap().play();
    mixer.fade_out(key, 1.0);
    mixer.update(0.3);

    mixer.stop_all_action();
    let action = mixer.action(key).unwrap();
    assert!(!action.is_running());
    assert!(!action.is_fading());
    assert!(approx(action.time, 0.0));
}

// ============================================================================
// Controller playback speed
// ============================================================================

#[test]
fn playback_speed_scales_actions_and_fades() {
    let mut controller = AnimationController::default();
    controller.setup_animations([clip("idle", 2.0), clip("walk", 1.0)]);
    controller.set_playback_speed(2.0);
    assert!(approx(controller.mixer().time_scale(), 2.0));

    controller.update(0.25);
    let idle = controller.base_action("idle").unwrap().action.unwrap();
    assert!(approx(controller.mixer().action(idle).unwrap().time, 0.5));

    // Fade durations are in mixer time, so they run twice as fast too.
    controller.select_base_action("walk", 0.5);
    controller.update(0.125);
    let walk = controller.base_action("walk").unwrap().action.unwrap();
    assert!(approx(controller.mixer().action(walk).unwrap().effective_weight(), 0.5));
}

#[test]
fn playback_speed_zero_freezes_the_pose() {
    let mut controller = AnimationController::default();
    controller.setup_animations([clip("idle", 2.0), clip("walk", 1.0)]);
    controller.set_playback_speed(0.0);
    controller.update(0.5);

    let idle = controller.base_action("idle").unwrap().action.unwrap();
    assert!(approx(controller.mixer().action(idle).unwrap().time, 0.0));
    assert!((controller.mixer().time()).abs() < 1e-9);
}
