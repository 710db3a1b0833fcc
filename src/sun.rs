//! Sun Position Model
//!
//! Maps compass angles of a directional light to a position on a sphere
//! around the origin, and back.
//!
//! Conventions (degrees in, degrees out):
//! - azimuth is measured in the XZ plane from +X towards +Z,
//! - altitude is measured from the XZ plane towards +Y.
//!
//! The math runs in `f64` so that angle round trips hold to 1e-6 degrees;
//! callers that feed a light take the `f32` position via
//! [`light_position`].

use glam::{DVec3, Vec3};

/// Horizontal and vertical angle of the sun, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SunAngles {
    pub azimuth: f64,
    pub altitude: f64,
}

/// Cartesian position on a sphere of radius `distance`.
///
/// Defined for every real input. Altitudes above 90° run over the zenith and
/// come down on the opposite side, which is a valid point but not one that
/// [`angles_from_position`] will map back to the same angles.
#[must_use]
pub fn position_from_angles(azimuth: f64, altitude: f64, distance: f64) -> DVec3 {
    let theta = azimuth.to_radians();
    let phi = altitude.to_radians();
    DVec3::new(
        distance * phi.cos() * theta.cos(),
        distance * phi.sin(),
        distance * phi.cos() * theta.sin(),
    )
}

/// Inverse of [`position_from_angles`].
///
/// Azimuth comes back in `[0, 360)` and altitude in `(-90, 90]`. A position
/// produced from an altitude `alt > 90` yields `(azimuth ± 180, 180 - alt)`:
/// both angle pairs name the same point, and the sphere parameterization
/// cannot tell them apart.
#[must_use]
pub fn angles_from_position(position: DVec3) -> SunAngles {
    let horizontal = (position.x * position.x + position.z * position.z).sqrt();
    let altitude = position.y.atan2(horizontal);

    let mut azimuth = position.z.atan2(position.x);
    if azimuth < 0.0 {
        azimuth += std::f64::consts::TAU;
    }
    // Tiny negative angles round up to exactly TAU
    if azimuth >= std::f64::consts::TAU {
        azimuth = 0.0;
    }

    SunAngles {
        azimuth: azimuth.to_degrees(),
        altitude: altitude.to_degrees(),
    }
}

/// [`position_from_angles`] narrowed to the renderer's `f32` space.
#[must_use]
pub fn light_position(angles: SunAngles, distance: f32) -> Vec3 {
    position_from_angles(angles.azimuth, angles.altitude, f64::from(distance)).as_vec3()
}

/// [`angles_from_position`] for an `f32` light position.
#[must_use]
pub fn light_angles(position: Vec3) -> SunAngles {
    angles_from_position(position.as_dvec3())
}
