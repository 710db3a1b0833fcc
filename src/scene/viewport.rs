/// Pixel rectangle of the framebuffer, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

/// Side-by-side layout: orbit view on the left, top-down view on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitView {
    pub left: Viewport,
    pub right: Viewport,
}

impl SplitView {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let half = width as f32 / 2.0;
        let height = height as f32;
        Self {
            left: Viewport {
                x: 0.0,
                y: 0.0,
                width: half,
                height,
            },
            right: Viewport {
                x: half,
                y: 0.0,
                width: half,
                height,
            },
        }
    }

    /// Both halves share one aspect ratio.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.left.aspect()
    }
}
