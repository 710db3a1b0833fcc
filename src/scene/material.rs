//! Material Variants
//!
//! The preview only ever touches blending state (transparency and opacity),
//! but loaded models carry a closed set of concrete materials. Traversal is a
//! typed visitor over those variants rather than runtime shape checks.

use glam::Vec4;

/// Blend state shared by every material variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blending {
    pub transparent: bool,
    pub opacity: f32,
}

impl Default for Blending {
    fn default() -> Self {
        Self {
            transparent: false,
            opacity: 1.0,
        }
    }
}

/// Unlit.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicMaterial {
    pub color: Vec4,
    pub blending: Blending,
}

/// Diffuse-only lighting; what the ground plane uses.
#[derive(Debug, Clone, PartialEq)]
pub struct LambertMaterial {
    pub color: Vec4,
    pub blending: Blending,
}

/// Metallic-roughness PBR, as authored in glTF.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: Vec4,
    pub metalness: f32,
    pub roughness: f32,
    pub blending: Blending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Basic(BasicMaterial),
    Lambert(LambertMaterial),
    Standard(StandardMaterial),
}

impl Material {
    #[must_use]
    pub fn basic(color: Vec4) -> Self {
        Material::Basic(BasicMaterial {
            color,
            blending: Blending::default(),
        })
    }

    #[must_use]
    pub fn lambert(color: Vec4) -> Self {
        Material::Lambert(LambertMaterial {
            color,
            blending: Blending::default(),
        })
    }

    #[must_use]
    pub fn standard(color: Vec4, metalness: f32, roughness: f32) -> Self {
        Material::Standard(StandardMaterial {
            color,
            metalness,
            roughness,
            blending: Blending::default(),
        })
    }

    pub fn accept<V: MaterialVisitor + ?Sized>(&mut self, visitor: &mut V) {
        match self {
            Material::Basic(m) => visitor.visit_basic(m),
            Material::Lambert(m) => visitor.visit_lambert(m),
            Material::Standard(m) => visitor.visit_standard(m),
        }
    }

    #[must_use]
    pub fn blending(&self) -> &Blending {
        match self {
            Material::Basic(m) => &m.blending,
            Material::Lambert(m) => &m.blending,
            Material::Standard(m) => &m.blending,
        }
    }
}

/// Visits each concrete material kind. Every method defaults to the shared
/// [`MaterialVisitor::visit_blending`] hook.
pub trait MaterialVisitor {
    fn visit_blending(&mut self, _blending: &mut Blending) {}

    fn visit_basic(&mut self, material: &mut BasicMaterial) {
        self.visit_blending(&mut material.blending);
    }

    fn visit_lambert(&mut self, material: &mut LambertMaterial) {
        self.visit_blending(&mut material.blending);
    }

    fn visit_standard(&mut self, material: &mut StandardMaterial) {
        self.visit_blending(&mut material.blending);
    }
}

/// A mesh is drawn with one material, or one per primitive group.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshMaterials {
    Single(Material),
    Multi(Vec<Material>),
}

impl MeshMaterials {
    pub fn accept<V: MaterialVisitor + ?Sized>(&mut self, visitor: &mut V) {
        match self {
            MeshMaterials::Single(material) => material.accept(visitor),
            MeshMaterials::Multi(materials) => {
                for material in materials {
                    material.accept(visitor);
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        let slice = match self {
            MeshMaterials::Single(material) => std::slice::from_ref(material),
            MeshMaterials::Multi(materials) => materials.as_slice(),
        };
        slice.iter()
    }
}

/// Sets opacity on every material it visits, optionally switching them to
/// alpha blending first.
#[derive(Debug, Clone, Copy)]
pub struct OpacityVisitor {
    pub opacity: f32,
    pub make_transparent: bool,
}

impl MaterialVisitor for OpacityVisitor {
    fn visit_blending(&mut self, blending: &mut Blending) {
        if self.make_transparent {
            blending.transparent = true;
        }
        blending.opacity = self.opacity;
    }
}
