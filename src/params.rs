//! Configuration
//!
//! [`Params`] holds every value the control panel edits; [`SimConfig`] wraps
//! it with the startup settings of a session. Both deserialize from JSON and
//! fall back to the defaults below for any missing field.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::shadow::ShadowFrustumBounds;

/// Length of a base-action cross-fade triggered from the panel.
pub const CROSS_FADE_DURATION_MS: u64 = 350;

/// Length of a walk-in / walk-out glide.
pub const WALK_DURATION_MS: u64 = 3000;

/// Distance the top-down camera glides during a walk.
pub const WALK_DISTANCE: f32 = 10.0;

pub const DEFAULT_MODEL_PATH: &str = "assets/models/xbot-default.glb";

/// Values bound to the control panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Params {
    /// Model yaw in degrees, relative to its loaded orientation
    pub rotation: f32,
    pub azimuth: f32,
    pub altitude: f32,
    pub shadow_near: f32,
    pub shadow_far: f32,
    pub shadow_left: f32,
    pub shadow_right: f32,
    pub shadow_top: f32,
    pub shadow_bottom: f32,
    pub shadow_map_size: u32,
    pub show_shadow_helper: bool,
    pub show_model: bool,
}

impl Default for Params {
    fn default() -> Self {
        let bounds = ShadowFrustumBounds::default();
        Self {
            rotation: 0.0,
            azimuth: 0.0,
            altitude: 0.0,
            shadow_near: bounds.near,
            shadow_far: bounds.far,
            shadow_left: bounds.left,
            shadow_right: bounds.right,
            shadow_top: bounds.top,
            shadow_bottom: bounds.bottom,
            shadow_map_size: bounds.map_size,
            show_shadow_helper: false,
            show_model: true,
        }
    }
}

impl Params {
    #[must_use]
    pub fn shadow_bounds(&self) -> ShadowFrustumBounds {
        ShadowFrustumBounds {
            near: self.shadow_near,
            far: self.shadow_far,
            left: self.shadow_left,
            right: self.shadow_right,
            top: self.shadow_top,
            bottom: self.shadow_bottom,
            map_size: self.shadow_map_size,
        }
    }
}

/// Startup settings for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    pub model_path: String,
    pub cross_fade_duration_ms: u64,
    pub walk_duration_ms: u64,
    pub walk_distance: f32,
    pub model_scale: f32,
    /// Global animation speed of the loaded character.
    pub playback_speed: f32,
    pub params: Params,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            cross_fade_duration_ms: CROSS_FADE_DURATION_MS,
            walk_duration_ms: WALK_DURATION_MS,
            walk_distance: WALK_DISTANCE,
            model_scale: 4.0,
            playback_speed: 1.0,
            params: Params::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    #[must_use]
    pub fn cross_fade_duration(&self) -> f32 {
        self.cross_fade_duration_ms as f32 / 1000.0
    }

    #[must_use]
    pub fn walk_duration(&self) -> f32 {
        self.walk_duration_ms as f32 / 1000.0
    }

    /// Top-down camera glide speed in units per second.
    #[must_use]
    pub fn walk_speed(&self) -> f32 {
        let duration = self.walk_duration();
        if duration > 0.0 {
            self.walk_distance / duration
        } else {
            0.0
        }
    }
}
