//! Animation Controller
//!
//! Per-model owner of the base-action registry, the current base action and
//! the cross-fade scheduler. One controller is built for each loaded model;
//! dropping it tears the whole animation state down.
//!
//! # Frame order
//!
//! [`AnimationController::update`] advances the mixer, delivers that frame's
//! loop notifications to the scheduler (which may execute a parked
//! transition), and only then copies live weights back into the registry.

use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::animation::crossfade::{CrossFade, CrossFadeScheduler, NO_ACTION, Schedule};
use crate::animation::mixer::{ActionKey, AnimationMixer, MixerEvent, MixerEvents};

/// Clips driven by the demo, with their starting weights.
pub const DEFAULT_BASE_ACTIONS: [(&str, f32); 2] = [("idle", 1.0), ("walk", 0.0)];

/// Registry entry for one base clip.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseAction {
    pub name: String,
    pub weight: f32,
    pub action: Option<ActionKey>,
}

#[derive(Debug)]
pub struct AnimationController {
    mixer: AnimationMixer,
    base_actions: Vec<BaseAction>,
    all_actions: Vec<ActionKey>,
    current_base_action: String,
    scheduler: CrossFadeScheduler,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_ACTIONS)
    }
}

impl AnimationController {
    /// Creates a controller with the given registry, in display order.
    /// The current base action starts as `"idle"`.
    pub fn new<I, S>(base_actions: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            mixer: AnimationMixer::new(),
            base_actions: base_actions
                .into_iter()
                .map(|(name, weight)| BaseAction {
                    name: name.into(),
                    weight,
                    action: None,
                })
                .collect(),
            all_actions: Vec::new(),
            current_base_action: crate::animation::crossfade::IDLE_ACTION.to_string(),
            scheduler: CrossFadeScheduler::new(),
        }
    }

    /// Binds and starts an action for every loaded clip that has a registry
    /// entry. Clips without one are ignored. Returns the number bound.
    pub fn setup_animations<I>(&mut self, clips: I) -> usize
    where
        I: IntoIterator<Item = Arc<AnimationClip>>,
    {
        let mut bound = 0;
        for clip in clips {
            let Some(index) = self.index_of(&clip.name) else {
                log::debug!("Skipping unregistered clip '{}'", clip.name);
                continue;
            };

            let key = self.mixer.clip_action(clip);
            self.activate(key);
            self.base_actions[index].action = Some(key);
            if !self.all_actions.contains(&key) {
                self.all_actions.push(key);
            }
            bound += 1;
        }
        bound
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut AnimationMixer {
        &mut self.mixer
    }

    #[must_use]
    pub fn base_actions(&self) -> &[BaseAction] {
        &self.base_actions
    }

    #[must_use]
    pub fn base_action(&self, name: &str) -> Option<&BaseAction> {
        self.base_actions.iter().find(|b| b.name == name)
    }

    #[must_use]
    pub fn all_actions(&self) -> &[ActionKey] {
        &self.all_actions
    }

    #[must_use]
    pub fn current_base_action(&self) -> &str {
        &self.current_base_action
    }

    #[must_use]
    pub fn scheduler(&self) -> &CrossFadeScheduler {
        &self.scheduler
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.base_actions.iter().position(|b| b.name == name)
    }

    // ========================================================================
    // Weights
    // ========================================================================

    /// Applies the registered weight for the action's clip (0 when the clip
    /// has no entry), enables it and starts playback at time-scale 1.
    pub fn activate(&mut self, key: ActionKey) {
        let Some(name) = self.mixer.action(key).map(|a| a.clip().name.clone()) else {
            return;
        };
        let weight = self.base_action(&name).map_or(0.0, |b| b.weight);

        self.set_weight(key, weight);
        if let Some(action) = self.mixer.action_mut(key) {
            action.play();
        }
    }

    /// Re-enables the action and resets its time-scale before applying the
    /// weight. A finished cross-fade leaves its start action disabled and
    /// with a warped time-scale.
    pub fn set_weight(&mut self, key: ActionKey, weight: f32) {
        if let Some(action) = self.mixer.action_mut(key) {
            action.enabled = true;
            action.set_effective_time_scale(1.0);
            action.set_effective_weight(weight);
        }
    }

    /// Copies each bound action's live effective weight into the registry.
    pub fn sync_weights_from_actions(&mut self) {
        for &key in &self.all_actions {
            let Some(action) = self.mixer.action(key) else {
                continue;
            };
            let weight = action.effective_weight();
            if let Some(entry) = self
                .base_actions
                .iter_mut()
                .find(|b| b.name == action.clip().name)
            {
                entry.weight = weight;
            }
        }
    }

    /// Global playback speed.
    pub fn set_playback_speed(&mut self, speed: f32) {
        self.mixer.set_time_scale(speed);
    }

    // ========================================================================
    // Cross-fades
    // ========================================================================

    /// Switches the base pose to the clip called `name`. `"None"` (or any
    /// unbound name) fades everything out.
    ///
    /// Selecting the action that is already current starts no fade, but it
    /// still cancels a transition parked for the loop boundary: the pose the
    /// user asked for last is the one that stays.
    pub fn select_base_action(&mut self, name: &str, duration: f32) {
        let current = self
            .base_action(&self.current_base_action)
            .and_then(|b| b.action);
        let target = self.base_action(name).and_then(|b| b.action);

        if current != target {
            self.prepare_cross_fade(current, target, duration);
        } else if let Some(dropped) = self.scheduler.cancel() {
            log::debug!(
                "Cross-fade to {:?} cancelled, '{}' stays current",
                dropped.end,
                self.current_base_action
            );
        }
    }

    /// Runs the transition now, or parks it until `start` loops.
    pub fn prepare_cross_fade(
        &mut self,
        start: Option<ActionKey>,
        end: Option<ActionKey>,
        duration: f32,
    ) {
        let fade = CrossFade {
            start,
            end,
            duration,
        };

        match self.scheduler.request(&self.current_base_action, fade) {
            Schedule::Immediate(fade) => self.execute_cross_fade(fade),
            Schedule::Deferred => {
                log::debug!(
                    "Cross-fade from '{}' waits for its loop boundary",
                    self.current_base_action
                );
            }
        }
    }

    fn execute_cross_fade(&mut self, fade: CrossFade) {
        match (fade.start, fade.end) {
            (start, Some(end)) => {
                // The end action must start from full weight; the start
                // action already has it.
                self.set_weight(end, 1.0);
                if let Some(action) = self.mixer.action_mut(end) {
                    action.time = 0.0;
                }

                match start {
                    Some(start) => self.mixer.cross_fade(start, end, fade.duration, true),
                    None => self.mixer.fade_in(end, fade.duration),
                }
            }
            (Some(start), None) => self.mixer.fade_out(start, fade.duration),
            (None, None) => {}
        }

        self.current_base_action = fade
            .end
            .and_then(|key| self.mixer.action(key))
            .map_or_else(|| NO_ACTION.to_string(), |a| a.clip().name.clone());

        log::debug!("Current base action: {}", self.current_base_action);
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Advances the mixer by `dt` seconds. Returns the mixer's events for
    /// this frame.
    pub fn update(&mut self, dt: f32) -> MixerEvents {
        let events = self.mixer.update(dt);

        for event in &events {
            if let MixerEvent::Loop { action, .. } = *event
                && let Some(fade) = self.scheduler.on_loop(action)
            {
                self.execute_cross_fade(fade);
            }
        }

        self.sync_weights_from_actions();
        events
    }
}
