use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::animation::action::{ActionEvent, AnimationAction};
use crate::animation::clip::AnimationClip;

new_key_type! {
    /// Stable identity of an action inside its mixer.
    pub struct ActionKey;
}

/// Notification raised by [`AnimationMixer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerEvent {
    Loop { action: ActionKey, loop_delta: i32 },
    Finished { action: ActionKey },
}

impl MixerEvent {
    #[must_use]
    pub fn action(&self) -> ActionKey {
        match *self {
            MixerEvent::Loop { action, .. } | MixerEvent::Finished { action } => action,
        }
    }
}

pub type MixerEvents = SmallVec<[MixerEvent; 4]>;

/// Owns the actions of one model and advances them with a shared clock.
///
/// Ramps (fades and warps) are expressed in mixer time, so scaling the mixer
/// also scales every transition in flight.
#[derive(Debug)]
pub struct AnimationMixer {
    actions: SlotMap<ActionKey, AnimationAction>,
    by_clip: FxHashMap<String, ActionKey>,
    time: f64,
    time_scale: f32,
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: SlotMap::with_key(),
            by_clip: FxHashMap::default(),
            time: 0.0,
            time_scale: 1.0,
        }
    }

    /// Returns the action bound to `clip`, creating it on first use.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>) -> ActionKey {
        if let Some(&key) = self.by_clip.get(&clip.name) {
            return key;
        }
        let name = clip.name.clone();
        let key = self.actions.insert(AnimationAction::new(clip));
        self.by_clip.insert(name, key);
        key
    }

    #[must_use]
    pub fn existing_action(&self, clip_name: &str) -> Option<ActionKey> {
        self.by_clip.get(clip_name).copied()
    }

    #[must_use]
    pub fn action(&self, key: ActionKey) -> Option<&AnimationAction> {
        self.actions.get(key)
    }

    pub fn action_mut(&mut self, key: ActionKey) -> Option<&mut AnimationAction> {
        self.actions.get_mut(key)
    }

    pub fn actions(&self) -> impl Iterator<Item = (ActionKey, &AnimationAction)> {
        self.actions.iter()
    }

    #[must_use]
    pub fn list_animations(&self) -> Vec<&str> {
        self.actions
            .values()
            .map(|action| action.clip().name.as_str())
            .collect()
    }

    // ========================================================================
    // Clock
    // ========================================================================

    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Global playback speed for every action of this mixer.
    pub fn set_time_scale(&mut self, speed: f32) {
        self.time_scale = speed;
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn fade_in(&mut self, key: ActionKey, duration: f32) {
        let now = self.time;
        if let Some(action) = self.actions.get_mut(key) {
            action.fade_in(now, duration);
        }
    }

    pub fn fade_out(&mut self, key: ActionKey, duration: f32) {
        let now = self.time;
        if let Some(action) = self.actions.get_mut(key) {
            action.fade_out(now, duration);
        }
    }

    /// Fades `from` out while fading `to` in over `duration` seconds.
    ///
    /// With `warp`, both time-scales are ramped so that the two clips run at
    /// matching cycle rates during the blend: `from` drifts from 1 towards
    /// `from.duration / to.duration`, `to` drifts from the inverse ratio
    /// back to 1.
    pub fn cross_fade(&mut self, from: ActionKey, to: ActionKey, duration: f32, warp: bool) {
        let (Some(from_duration), Some(to_duration)) = (
            self.actions.get(from).map(|a| a.clip().duration),
            self.actions.get(to).map(|a| a.clip().duration),
        ) else {
            log::warn!("cross_fade: unknown action key");
            return;
        };

        self.fade_out(from, duration);
        self.fade_in(to, duration);

        if warp && from_duration > 0.0 && to_duration > 0.0 {
            let now = self.time;
            let start_end_ratio = from_duration / to_duration;
            let end_start_ratio = to_duration / from_duration;

            if let Some(action) = self.actions.get_mut(from) {
                action.warp(now, 1.0, start_end_ratio, duration);
            }
            if let Some(action) = self.actions.get_mut(to) {
                action.warp(now, end_start_ratio, 1.0, duration);
            }
        }
    }

    pub fn stop_all_action(&mut self) {
        for action in self.actions.values_mut() {
            action.stop();
        }
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Advances the clock by `dt` seconds and updates every running action.
    ///
    /// Returns the loop/finish notifications raised during this step, in
    /// action order.
    pub fn update(&mut self, dt: f32) -> MixerEvents {
        let dt = dt * self.time_scale;
        self.time += f64::from(dt);
        let time = self.time;

        let mut events = MixerEvents::new();
        for (key, action) in &mut self.actions {
            if !action.is_running() {
                continue;
            }

            match action.update(time, dt) {
                Some(ActionEvent::Loop { loop_delta }) => events.push(MixerEvent::Loop {
                    action: key,
                    loop_delta,
                }),
                Some(ActionEvent::Finished) => events.push(MixerEvent::Finished { action: key }),
                None => {}
            }
        }
        events
    }
}
