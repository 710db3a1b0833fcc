use std::time::Duration;

/// One reporting window of the stats overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub fps: f32,
    /// Mean frame time in milliseconds
    pub frame_ms: f32,
    /// Slowest frame of the window, in milliseconds
    pub worst_frame_ms: f32,
}

/// Aggregates frame times and reports once per window (one second by
/// default).
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    frames: u32,
    accumulated: Duration,
    worst: Duration,
    last_report: Option<FrameReport>,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            frames: 0,
            accumulated: Duration::ZERO,
            worst: Duration::ZERO,
            last_report: None,
        }
    }

    /// Records a frame that took `delta`. Returns a report when the window
    /// fills up.
    pub fn record(&mut self, delta: Duration) -> Option<FrameReport> {
        self.frames += 1;
        self.accumulated += delta;
        self.worst = self.worst.max(delta);

        if self.accumulated < self.window {
            return None;
        }

        let seconds = self.accumulated.as_secs_f32();
        let report = FrameReport {
            fps: self.frames as f32 / seconds,
            frame_ms: seconds * 1000.0 / self.frames as f32,
            worst_frame_ms: self.worst.as_secs_f32() * 1000.0,
        };

        self.frames = 0;
        self.accumulated = Duration::ZERO;
        self.worst = Duration::ZERO;
        self.last_report = Some(report);
        Some(report)
    }

    /// The most recent report, for overlays that draw every frame.
    #[must_use]
    pub fn last_report(&self) -> Option<FrameReport> {
        self.last_report
    }
}
