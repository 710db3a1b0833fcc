use glam::{Vec3, Vec4};

use crate::scene::material::{Material, MeshMaterials, OpacityVisitor};

/// Axis-aligned bounding box. An empty box has `min > max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Bounds after scaling about the origin and then translating.
    #[must_use]
    pub fn scaled_translated(&self, scale: Vec3, translation: Vec3) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let a = self.min * scale;
        let b = self.max * scale;
        Aabb {
            min: a.min(b) + translation,
            max: a.max(b) + translation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelMesh {
    pub name: String,
    pub skinned: bool,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
    pub materials: MeshMaterials,
}

/// A loaded character: its meshes, bind-pose bounds and placement.
///
/// Only yaw rotation is modelled, so world bounds along Y are exact.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<ModelMesh>,
    pub local_bounds: Aabb,

    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: Vec3,

    original_rotation_y: f32,
}

impl Model {
    #[must_use]
    pub fn new(name: impl Into<String>, meshes: Vec<ModelMesh>, local_bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            meshes,
            local_bounds,
            position: Vec3::ZERO,
            rotation_y: 0.0,
            scale: Vec3::ONE,
            original_rotation_y: 0.0,
        }
    }

    #[must_use]
    pub fn has_skeleton(&self) -> bool {
        self.meshes.iter().any(|m| m.skinned)
    }

    #[must_use]
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds
            .scaled_translated(self.scale, self.position)
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::splat(scale);
    }

    /// Lifts (or lowers) the model so its lowest point rests on y = 0.
    pub fn place_on_ground(&mut self) {
        let bounds = self.world_bounds();
        if !bounds.is_empty() {
            self.position.y -= bounds.min.y;
        }
    }

    /// Remembers the current yaw as the reference for
    /// [`Self::set_rotation_degrees`].
    pub fn capture_original_rotation(&mut self) {
        self.original_rotation_y = self.rotation_y;
    }

    /// Yaw relative to the yaw captured at load time.
    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.rotation_y = self.original_rotation_y + degrees.to_radians();
    }

    /// Makes every mesh cast shadows and switches its materials to alpha
    /// blending, so the model can later be hidden while its shadow stays.
    pub fn prepare_for_shadow_preview(&mut self, visible: bool) {
        let mut visitor = OpacityVisitor {
            opacity: Self::opacity_for(visible),
            make_transparent: true,
        };
        for mesh in &mut self.meshes {
            mesh.cast_shadows = true;
            mesh.materials.accept(&mut visitor);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        let mut visitor = OpacityVisitor {
            opacity: Self::opacity_for(visible),
            make_transparent: false,
        };
        for mesh in &mut self.meshes {
            mesh.materials.accept(&mut visitor);
        }
    }

    fn opacity_for(visible: bool) -> f32 {
        if visible { 1.0 } else { 0.0 }
    }

    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.meshes.iter().flat_map(|m| m.materials.iter())
    }
}

/// Shadow-receiving floor under the model.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPlane {
    pub width: f32,
    pub depth: f32,
    pub receive_shadows: bool,
    pub material: Material,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 100.0,
            receive_shadows: true,
            material: Material::lambert(Vec4::ONE),
        }
    }
}
