//! Scene Objects
//!
//! The handful of scene objects the preview drives: one sun, two cameras, a
//! ground plane and the loaded character.

pub mod camera;
pub mod light;
pub mod material;
pub mod model;
pub mod viewport;

pub use camera::PerspectiveCamera;
pub use light::{DirectionalLight, color_from_hex};
pub use material::{Blending, Material, MaterialVisitor, MeshMaterials, OpacityVisitor};
pub use model::{Aabb, GroundPlane, Model, ModelMesh};
pub use viewport::{SplitView, Viewport};
