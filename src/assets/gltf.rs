//! glTF / GLB Loader
//!
//! Extracts what the preview needs from a rigged character asset: clip names
//! and durations, meshes with typed materials, skinning, and bind-pose
//! bounds. Pose data stays inside the document for the renderer.

use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};

use crate::animation::clip::AnimationClip;
use crate::errors::{Result, SimError};
use crate::scene::material::{Material, MeshMaterials};
use crate::scene::model::{Aabb, Model, ModelMesh};

/// A decoded asset, ready to hand to a session.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: Model,
    pub clips: Vec<Arc<AnimationClip>>,
}

impl LoadedModel {
    #[must_use]
    pub fn clip_names(&self) -> Vec<&str> {
        self.clips.iter().map(|c| c.name.as_str()).collect()
    }
}

pub struct GltfLoader;

impl GltfLoader {
    /// Loads a `.gltf` or `.glb` file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<LoadedModel> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SimError::AssetNotFound(path.display().to_string()));
        }

        let (document, buffers, _images) = gltf::import(path)?;
        let name = path
            .file_stem()
            .map_or_else(|| "model".to_string(), |s| s.to_string_lossy().into_owned());

        Self::build(&name, &document, &buffers)
    }

    /// Loads an in-memory GLB (or self-contained glTF) blob.
    pub fn load_slice(name: &str, bytes: &[u8]) -> Result<LoadedModel> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;
        Self::build(name, &document, &buffers)
    }

    fn build(
        name: &str,
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
    ) -> Result<LoadedModel> {
        let mut meshes = Vec::new();
        let mut bounds = Aabb::EMPTY;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| SimError::EmptyAsset(format!("{name}: no scene")))?;

        for node in scene.nodes() {
            collect_meshes(&node, Mat4::IDENTITY, &mut meshes, &mut bounds);
        }

        let clips: Vec<Arc<AnimationClip>> = document
            .animations()
            .map(|animation| Arc::new(read_clip(&animation, buffers)))
            .collect();

        log::info!(
            "Loaded '{}': {} meshes, {} animations",
            name,
            meshes.len(),
            clips.len()
        );
        for clip in &clips {
            log::info!(" - {} ({:.2}s)", clip.name, clip.duration);
        }

        let model = Model::new(name, meshes, bounds);
        log::info!("Model contains skeleton: {}", model.has_skeleton());

        Ok(LoadedModel { model, clips })
    }
}

fn collect_meshes(
    node: &gltf::Node<'_>,
    parent: Mat4,
    meshes: &mut Vec<ModelMesh>,
    bounds: &mut Aabb,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let skinned = node.skin().is_some();
        if skinned {
            log::debug!("Found skinned mesh: {}", node.name().unwrap_or("<unnamed>"));
        }

        let mut materials = Vec::new();
        for primitive in mesh.primitives() {
            let bb = primitive.bounding_box();
            *bounds = bounds.union(&transform_bounds(
                world,
                Vec3::from(bb.min),
                Vec3::from(bb.max),
            ));
            materials.push(convert_material(&primitive.material()));
        }

        let materials = if materials.len() == 1 {
            MeshMaterials::Single(materials.remove(0))
        } else {
            MeshMaterials::Multi(materials)
        };

        meshes.push(ModelMesh {
            name: mesh
                .name()
                .or_else(|| node.name())
                .map_or_else(|| format!("mesh_{}", mesh.index()), str::to_string),
            skinned,
            cast_shadows: false,
            receive_shadows: false,
            materials,
        });
    }

    for child in node.children() {
        collect_meshes(&child, world, meshes, bounds);
    }
}

fn transform_bounds(world: Mat4, min: Vec3, max: Vec3) -> Aabb {
    let mut out = Aabb::EMPTY;
    for i in 0..8 {
        let corner = Vec3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 4 == 0 { min.z } else { max.z },
        );
        let p = world.transform_point3(corner);
        out = out.union(&Aabb::new(p, p));
    }
    out
}

fn convert_material(material: &gltf::Material<'_>) -> Material {
    let pbr = material.pbr_metallic_roughness();
    let color = Vec4::from(pbr.base_color_factor());

    if material.unlit() {
        Material::basic(color)
    } else {
        Material::standard(color, pbr.metallic_factor(), pbr.roughness_factor())
    }
}

fn read_clip(animation: &gltf::Animation<'_>, buffers: &[gltf::buffer::Data]) -> AnimationClip {
    let name = animation
        .name()
        .map_or_else(|| format!("animation_{}", animation.index()), str::to_string);

    let end_times = animation.channels().filter_map(|channel| {
        let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
        reader
            .read_inputs()
            .and_then(|inputs| inputs.reduce(f32::max))
    });

    AnimationClip::from_keyframe_times(name, end_times)
}
