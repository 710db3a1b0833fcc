#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Where frame deltas come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// Sampled from the monotonic clock on every tick.
    Wall,
    /// The same step every tick, for headless and reproducible runs.
    Fixed(Duration),
}

/// Frame clock feeding the mixer and the walk glide.
///
/// Wall-clock deltas are capped at [`Timer::max_delta`] so that a stalled
/// frame (window drag, breakpoint) does not skip a whole cross-fade.
#[derive(Debug, Clone)]
pub struct Timer {
    source: TimeSource,
    last_sample: Instant,
    max_delta: Duration,

    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(250);

    /// Wall-clock timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(TimeSource::Wall)
    }

    /// Timer that advances by `step` on every tick.
    #[must_use]
    pub fn fixed(step: Duration) -> Self {
        Self::with_source(TimeSource::Fixed(step))
    }

    fn with_source(source: TimeSource) -> Self {
        Self {
            source,
            last_sample: Instant::now(),
            max_delta: Self::DEFAULT_MAX_DELTA,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    #[must_use]
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Starts a new frame.
    pub fn tick(&mut self) {
        self.delta = match self.source {
            TimeSource::Wall => {
                let now = Instant::now();
                let sampled = now - self.last_sample;
                self.last_sample = now;
                sampled.min(self.max_delta)
            }
            TimeSource::Fixed(step) => step,
        };
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn source(&self) -> TimeSource {
        self.source
    }

    #[must_use]
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    /// Length of the current frame.
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Sum of all frame deltas so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
