//! Control Panel
//!
//! Describes every user-adjustable parameter and the event a change to it
//! produces. The session consumes [`ControlEvent`]s; how they are rendered is
//! up to the host ([`panel`] draws them with egui).

pub mod panel;

pub use panel::{ControlPanel, PanelState};

use crate::shadow::FrustumBound;

/// A change requested from the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    Rotation(f32),
    Azimuth(f32),
    Altitude(f32),
    ShadowBound(FrustumBound, f32),
    ShadowMapSize(u32),
    ShowShadowHelper(bool),
    ShowModel(bool),
    /// Switch the base pose; `"None"` fades everything out.
    BaseAction(String),
    WalkIn,
    WalkOut,
}

/// Which parameter a slider edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderTarget {
    Rotation,
    Azimuth,
    Altitude,
    ShadowBound(FrustumBound),
    ShadowMapSize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub label: &'static str,
    pub target: SliderTarget,
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
}

impl SliderSpec {
    const fn new(label: &'static str, target: SliderTarget, min: f32, max: f32) -> Self {
        Self {
            label,
            target,
            min,
            max,
            step: None,
        }
    }

    /// Builds the event for a new slider value, clamped into range and
    /// snapped to the step when there is one.
    #[must_use]
    pub fn event(&self, value: f32) -> ControlEvent {
        let mut value = value.clamp(self.min, self.max);
        if let Some(step) = self.step {
            value = self.min + ((value - self.min) / step).round() * step;
        }

        match self.target {
            SliderTarget::Rotation => ControlEvent::Rotation(value),
            SliderTarget::Azimuth => ControlEvent::Azimuth(value),
            SliderTarget::Altitude => ControlEvent::Altitude(value),
            SliderTarget::ShadowBound(bound) => ControlEvent::ShadowBound(bound, value),
            SliderTarget::ShadowMapSize => ControlEvent::ShadowMapSize(value as u32),
        }
    }
}

/// Panel sliders, in display order.
pub const SLIDERS: [SliderSpec; 10] = [
    SliderSpec::new("rotation", SliderTarget::Rotation, 0.0, 360.0),
    SliderSpec::new("azimuth", SliderTarget::Azimuth, 0.0, 360.0),
    SliderSpec::new("altitude", SliderTarget::Altitude, 0.0, 180.0),
    SliderSpec::new(
        "shadowNear",
        SliderTarget::ShadowBound(FrustumBound::Near),
        -100.0,
        0.0,
    ),
    SliderSpec::new(
        "shadowFar",
        SliderTarget::ShadowBound(FrustumBound::Far),
        0.0,
        100.0,
    ),
    SliderSpec::new(
        "shadowLeft",
        SliderTarget::ShadowBound(FrustumBound::Left),
        -100.0,
        0.0,
    ),
    SliderSpec::new(
        "shadowRight",
        SliderTarget::ShadowBound(FrustumBound::Right),
        0.0,
        100.0,
    ),
    SliderSpec::new(
        "shadowTop",
        SliderTarget::ShadowBound(FrustumBound::Top),
        0.0,
        100.0,
    ),
    SliderSpec::new(
        "shadowBottom",
        SliderTarget::ShadowBound(FrustumBound::Bottom),
        -100.0,
        0.0,
    ),
    SliderSpec {
        label: "shadowMapSize",
        target: SliderTarget::ShadowMapSize,
        min: 512.0,
        max: 8192.0,
        step: Some(256.0),
    },
];

pub const WALK_IN_LABEL: &str = "Walk In";
pub const WALK_OUT_LABEL: &str = "Walk Out";

/// Button labels of the "Base Actions" folder: `"None"` first, then every
/// registered base action in registry order.
#[must_use]
pub fn base_action_labels<'a>(registered: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    std::iter::once(crate::animation::NO_ACTION)
        .chain(registered)
        .collect()
}
