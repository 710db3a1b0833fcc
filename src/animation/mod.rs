pub mod action;
pub mod clip;
pub mod controller;
pub mod crossfade;
pub mod mixer;

pub use action::{ActionEvent, AnimationAction, LoopMode, Ramp};
pub use clip::AnimationClip;
pub use controller::{AnimationController, BaseAction, DEFAULT_BASE_ACTIONS};
pub use crossfade::{CrossFade, CrossFadeScheduler, CrossFadeState, IDLE_ACTION, NO_ACTION, Schedule};
pub use mixer::{ActionKey, AnimationMixer, MixerEvent, MixerEvents};
