use std::sync::Arc;

use crate::animation::clip::AnimationClip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// Linear ramp of a multiplier over a window of mixer time.
///
/// Used for both weight fades and time-scale warps. Outside the window the
/// ramp holds its end values. The window is kept in `f64` so it stays
/// sharp however long the mixer has been running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub start_time: f64,
    pub end_time: f64,
    pub from: f32,
    pub to: f32,
}

impl Ramp {
    #[must_use]
    pub fn new(now: f64, duration: f32, from: f32, to: f32) -> Self {
        Self {
            start_time: now,
            end_time: now + f64::from(duration),
            from,
            to,
        }
    }

    #[must_use]
    pub fn evaluate(&self, time: f64) -> f32 {
        let span = self.end_time - self.start_time;
        if span <= 0.0 || time >= self.end_time {
            return self.to;
        }
        if time <= self.start_time {
            return self.from;
        }
        let t = ((time - self.start_time) / span) as f32;
        self.from + (self.to - self.from) * t
    }

    /// A ramp is done once mixer time has moved strictly past its end.
    #[must_use]
    pub fn is_finished(&self, time: f64) -> bool {
        time > self.end_time
    }
}

/// Something that happened to an action during one time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    /// Local time wrapped around a loop boundary. `loop_delta` is the number
    /// of whole loops crossed (negative when playing backwards).
    Loop { loop_delta: i32 },
    /// A `LoopMode::Once` action reached either end of its clip.
    Finished,
}

/// Playback state of one clip inside a mixer.
///
/// The *base* weight and time-scale are what the user sets. The *effective*
/// values are what the blend engine used on the last update: the base values
/// multiplied by any running fade or warp ramp.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    time_scale: f32,
    weight: f32,
    effective_time_scale: f32,
    effective_weight: f32,

    weight_fade: Option<Ramp>,
    time_scale_warp: Option<Ramp>,

    running: bool,
    reversed: bool,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
            time_scale: 1.0,
            weight: 1.0,
            effective_time_scale: 1.0,
            effective_weight: 1.0,
            weight_fade: None,
            time_scale_warp: None,
            running: false,
            reversed: false,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Schedules the action in its mixer. Time starts advancing on the next
    /// mixer update.
    pub fn play(&mut self) {
        self.running = true;
    }

    /// Removes the action from the mixer's schedule and rewinds it.
    pub fn stop(&mut self) {
        self.running = false;
        self.time = 0.0;
        self.reversed = false;
        self.stop_fading();
        self.stop_warping();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Weight
    // ========================================================================

    /// Sets the base weight and cancels any running fade.
    ///
    /// A disabled action reports an effective weight of zero until it is
    /// enabled again.
    pub fn set_effective_weight(&mut self, weight: f32) {
        self.weight = weight;
        self.effective_weight = if self.enabled { weight } else { 0.0 };
        self.stop_fading();
    }

    #[must_use]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[must_use]
    pub fn effective_weight(&self) -> f32 {
        self.effective_weight
    }

    pub fn fade_in(&mut self, now: f64, duration: f32) {
        self.schedule_fading(now, duration, 0.0, 1.0);
    }

    pub fn fade_out(&mut self, now: f64, duration: f32) {
        self.schedule_fading(now, duration, 1.0, 0.0);
    }

    pub fn stop_fading(&mut self) {
        self.weight_fade = None;
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.weight_fade.is_some()
    }

    fn schedule_fading(&mut self, now: f64, duration: f32, from: f32, to: f32) {
        self.weight_fade = Some(Ramp::new(now, duration, from, to));
    }

    // ========================================================================
    // Time scale
    // ========================================================================

    /// Sets the base time-scale and cancels any running warp.
    pub fn set_effective_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale;
        self.effective_time_scale = if self.paused { 0.0 } else { time_scale };
        self.stop_warping();
    }

    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    #[must_use]
    pub fn effective_time_scale(&self) -> f32 {
        self.effective_time_scale
    }

    /// Ramps the effective time-scale from `start_time_scale` to
    /// `end_time_scale` over `duration` seconds of mixer time. When the warp
    /// completes, the end value becomes the new base time-scale.
    pub fn warp(&mut self, now: f64, start_time_scale: f32, end_time_scale: f32, duration: f32) {
        let base = if self.time_scale.abs() > f32::EPSILON {
            self.time_scale
        } else {
            1.0
        };
        self.time_scale_warp = Some(Ramp::new(
            now,
            duration,
            start_time_scale / base,
            end_time_scale / base,
        ));
    }

    pub fn stop_warping(&mut self) {
        self.time_scale_warp = None;
    }

    #[must_use]
    pub fn is_warping(&self) -> bool {
        self.time_scale_warp.is_some()
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Advances the action. `time` is the mixer's global time after this
    /// step, `dt` the mixer's scaled delta.
    pub(crate) fn update(&mut self, time: f64, dt: f32) -> Option<ActionEvent> {
        if !self.enabled {
            self.update_weight(time);
            return None;
        }

        let time_scale = self.update_time_scale(time);
        let event = self.update_time(dt * time_scale);
        self.update_weight(time);
        event
    }

    fn update_time_scale(&mut self, time: f64) -> f32 {
        let mut time_scale = 0.0;

        if !self.paused {
            time_scale = self.time_scale;

            if let Some(warp) = self.time_scale_warp {
                time_scale *= warp.evaluate(time);

                if warp.is_finished(time) {
                    self.time_scale_warp = None;
                    if time_scale.abs() <= f32::EPSILON {
                        self.paused = true;
                    } else {
                        self.time_scale = time_scale;
                    }
                }
            }
        }

        self.effective_time_scale = time_scale;
        time_scale
    }

    fn update_weight(&mut self, time: f64) -> f32 {
        let mut weight = 0.0;

        if self.enabled {
            weight = self.weight;

            if let Some(fade) = self.weight_fade {
                let factor = fade.evaluate(time);
                weight *= factor;

                if fade.is_finished(time) {
                    self.weight_fade = None;
                    // Faded out completely
                    if factor.abs() <= f32::EPSILON {
                        self.enabled = false;
                    }
                }
            }
        }

        self.effective_weight = weight;
        weight
    }

    fn update_time(&mut self, delta: f32) -> Option<ActionEvent> {
        let duration = self.clip.duration;
        if duration <= 0.0 || delta == 0.0 {
            return None;
        }

        match self.loop_mode {
            LoopMode::Once => {
                self.time += delta;
                // Play once, stop at end or start
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                    Some(ActionEvent::Finished)
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                    Some(ActionEvent::Finished)
                } else {
                    None
                }
            }
            LoopMode::Loop => {
                self.time += delta;
                if self.time >= duration || self.time < 0.0 {
                    let loop_delta = (self.time / duration).floor();
                    self.time -= duration * loop_delta;
                    Some(ActionEvent::Loop {
                        loop_delta: loop_delta as i32,
                    })
                } else {
                    None
                }
            }
            LoopMode::PingPong => {
                self.time += if self.reversed { -delta } else { delta };
                // Bounce off either end of the clip
                let bounced = if self.time >= duration {
                    self.time = 2.0 * duration - self.time;
                    true
                } else if self.time < 0.0 {
                    self.time = -self.time;
                    true
                } else {
                    false
                };

                if bounced {
                    self.reversed = !self.reversed;
                    self.time = self.time.clamp(0.0, duration);
                    Some(ActionEvent::Loop {
                        loop_delta: if self.reversed { 1 } else { -1 },
                    })
                } else {
                    None
                }
            }
        }
    }
}
