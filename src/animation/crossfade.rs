//! Loop-Synchronized Cross-Fade Scheduling
//!
//! Transitions away from a moving base pose (a walk cycle, say) look jarring
//! when they cut in mid-stride, so they wait for the start action's next loop
//! boundary. Transitions away from the static idle pose, or to/from "no
//! action", fire immediately.
//!
//! The scheduler is a plain state value. It never touches the mixer itself:
//! [`CrossFadeScheduler::request`] and [`CrossFadeScheduler::on_loop`] hand
//! back the [`CrossFade`] that is due, and the owner executes it.

use crate::animation::mixer::ActionKey;

/// Base action name whose transitions never wait for a loop boundary.
pub const IDLE_ACTION: &str = "idle";

/// Name recorded as the current base action when nothing is playing.
pub const NO_ACTION: &str = "None";

/// One requested transition. Either side may be absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossFade {
    pub start: Option<ActionKey>,
    pub end: Option<ActionKey>,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CrossFadeState {
    #[default]
    Idle,
    WaitingForLoop(CrossFade),
}

/// Outcome of a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Schedule {
    /// Execute this transition now.
    Immediate(CrossFade),
    /// Parked until the start action loops.
    Deferred,
}

#[derive(Debug, Default)]
pub struct CrossFadeScheduler {
    state: CrossFadeState,
}

impl CrossFadeScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &CrossFadeState {
        &self.state
    }

    #[must_use]
    pub fn pending(&self) -> Option<&CrossFade> {
        match &self.state {
            CrossFadeState::WaitingForLoop(fade) => Some(fade),
            CrossFadeState::Idle => None,
        }
    }

    /// Decides when `fade` runs, given the name of the current base action.
    ///
    /// Any pending request is dropped: only the latest request survives.
    pub fn request(&mut self, current_action: &str, fade: CrossFade) -> Schedule {
        if let CrossFadeState::WaitingForLoop(previous) = self.state {
            log::debug!("Cross-fade to {:?} superseded by {:?}", previous.end, fade.end);
        }

        if current_action == IDLE_ACTION || fade.start.is_none() || fade.end.is_none() {
            self.state = CrossFadeState::Idle;
            Schedule::Immediate(fade)
        } else {
            self.state = CrossFadeState::WaitingForLoop(fade);
            Schedule::Deferred
        }
    }

    /// Feeds a loop-completion notification. Returns the pending transition
    /// if `action` is exactly its start action.
    pub fn on_loop(&mut self, action: ActionKey) -> Option<CrossFade> {
        match self.state {
            CrossFadeState::WaitingForLoop(fade) if fade.start == Some(action) => {
                self.state = CrossFadeState::Idle;
                Some(fade)
            }
            _ => None,
        }
    }

    /// Drops the pending transition, if any.
    pub fn cancel(&mut self) -> Option<CrossFade> {
        match std::mem::take(&mut self.state) {
            CrossFadeState::WaitingForLoop(fade) => Some(fade),
            CrossFadeState::Idle => None,
        }
    }
}
