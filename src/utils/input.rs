use glam::Vec2;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Pointer state accumulated between two frames.
///
/// The windowing host forwards raw events here; camera controls read the
/// per-frame deltas and the host calls [`Input::end_frame`] afterwards.
#[derive(Default, Debug, Clone)]
pub struct Input {
    /// Cursor position inside the window
    pub cursor_position: Vec2,
    /// Cursor movement since the previous frame
    pub cursor_delta: Vec2,
    /// Wheel movement since the previous frame
    pub scroll_delta: Vec2,
    /// Window size in pixels
    pub screen_size: Vec2,

    buttons: FxHashSet<PointerButton>,
    has_cursor: bool,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears per-frame deltas.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    pub fn handle_cursor_move(&mut self, x: f32, y: f32) {
        let new_pos = Vec2::new(x, y);
        // The first sample only establishes a reference point
        if self.has_cursor {
            self.cursor_delta += new_pos - self.cursor_position;
        }
        self.cursor_position = new_pos;
        self.has_cursor = true;
    }

    pub fn handle_button(&mut self, button: PointerButton, pressed: bool) {
        if pressed {
            self.buttons.insert(button);
        } else {
            self.buttons.remove(&button);
        }
    }

    pub fn handle_scroll(&mut self, dx: f32, dy: f32) {
        self.scroll_delta += Vec2::new(dx, dy);
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: PointerButton) -> bool {
        self.buttons.contains(&button)
    }
}
