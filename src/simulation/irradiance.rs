//! Plane-of-array irradiance with the isotropic sky model.

use super::{DecomposedIrradiance, SolarPosition};

/// Ground reflectance assumed in front of the array
pub const GROUND_ALBEDO: f64 = 0.25;

/// Fixed mounting of the PV array
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayOrientation {
    /// Tilt from horizontal (degrees)
    pub tilt_deg: f64,
    /// Facing direction, clockwise from north (degrees)
    pub azimuth_deg: f64,
}

impl ArrayOrientation {
    /// South-facing array tilted at the site latitude.
    ///
    /// Only meaningful in the northern hemisphere; a southern site gets a negative tilt
    /// and is not corrected here.
    pub fn latitude_tilt(latitude_deg: f64) -> Self {
        Self {
            tilt_deg: latitude_deg,
            azimuth_deg: 180.0,
        }
    }

    /// Cosine of the angle of incidence between the sun and the array normal
    pub fn incidence_cosine(&self, zenith_deg: f64, azimuth_deg: f64) -> f64 {
        let tilt = self.tilt_deg.to_radians();
        let zenith = zenith_deg.to_radians();
        let cos_aoi = tilt.cos() * zenith.cos()
            + tilt.sin() * zenith.sin() * (azimuth_deg - self.azimuth_deg).to_radians().cos();
        cos_aoi.clamp(-1.0, 1.0)
    }
}

/// Irradiance on the array surface, by component (W/m²)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoaIrradiance {
    pub beam: f64,
    pub sky_diffuse: f64,
    pub ground_reflected: f64,
    pub global: f64,
}

impl PoaIrradiance {
    pub fn zero() -> Self {
        Self {
            beam: 0.0,
            sky_diffuse: 0.0,
            ground_reflected: 0.0,
            global: 0.0,
        }
    }
}

/// Combine beam, sky-diffuse and ground-reflected light on the array.
///
/// The beam term uses the apparent (refracted) sun position. Everything is zero once
/// the geometric sun is at or below the horizon.
pub fn plane_of_array(
    orientation: &ArrayOrientation,
    sun: &SolarPosition,
    components: &DecomposedIrradiance,
    ghi: f64,
) -> PoaIrradiance {
    if sun.is_night() {
        return PoaIrradiance::zero();
    }

    let ghi = ghi.max(0.0);
    let tilt = orientation.tilt_deg.to_radians();
    let cos_aoi = orientation.incidence_cosine(sun.apparent_zenith_deg, sun.azimuth_deg);

    let beam = (components.dni * cos_aoi).max(0.0);
    let sky_diffuse = components.dhi * (1.0 + tilt.cos()) / 2.0;
    let ground_reflected = ghi * GROUND_ALBEDO * (1.0 - tilt.cos()) / 2.0;

    PoaIrradiance {
        beam,
        sky_diffuse,
        ground_reflected,
        global: beam + sky_diffuse + ground_reflected,
    }
}
