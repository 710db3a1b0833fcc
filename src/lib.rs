#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod gui;
pub mod params;
pub mod scene;
pub mod session;
pub mod shadow;
pub mod sun;
pub mod utils;

pub use animation::{
    ActionKey, AnimationAction, AnimationClip, AnimationController, AnimationMixer,
    CrossFadeScheduler, LoopMode,
};
pub use assets::{GltfLoader, LoadedModel};
pub use errors::{Result, SimError};
pub use gui::{ControlEvent, ControlPanel};
pub use params::{Params, SimConfig};
pub use scene::{DirectionalLight, GroundPlane, Model, PerspectiveCamera, SplitView};
pub use session::{ShadowSim, WalkDirection};
pub use shadow::{
    DirectionalShadow, FrustumBound, ShadowCameraHelper, ShadowFrustumBounds,
    ShadowFrustumConfigurator,
};
pub use sun::SunAngles;
pub use utils::{FpsCounter, Input, OrbitControls, Timer};
