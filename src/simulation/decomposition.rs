//! Splitting global horizontal irradiance into beam and diffuse parts (Erbs model).

use std::f64::consts::PI;

/// Solar constant used by the Spencer extraterrestrial model (W/m²)
pub const SOLAR_CONSTANT: f64 = 1366.1;

/// Zenith beyond which the beam component is considered unreliable
const MAX_BEAM_ZENITH_DEG: f64 = 87.0;
/// Floor on cos(zenith) when normalising GHI, avoids blow-ups at grazing sun
const MIN_COS_ZENITH: f64 = 0.065;
const MAX_CLEARNESS_INDEX: f64 = 2.0;

/// Beam and diffuse components estimated from GHI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedIrradiance {
    /// Direct normal irradiance (W/m²)
    pub dni: f64,
    /// Diffuse horizontal irradiance (W/m²)
    pub dhi: f64,
    /// Clearness index used for the split
    pub clearness_index: f64,
}

impl DecomposedIrradiance {
    pub fn zero() -> Self {
        Self {
            dni: 0.0,
            dhi: 0.0,
            clearness_index: 0.0,
        }
    }
}

/// Extraterrestrial normal irradiance for a day of year (Spencer, 1971)
pub fn extraterrestrial_irradiance(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (f64::from(day_of_year) - 1.0) / 365.0;
    let distance_factor = 1.00011
        + 0.034221 * b.cos()
        + 0.00128 * b.sin()
        + 0.000719 * (2.0 * b).cos()
        + 0.000077 * (2.0 * b).sin();
    SOLAR_CONSTANT * distance_factor
}

/// Ratio of GHI to the irradiance a horizontal surface would get above the atmosphere
pub fn clearness_index(ghi: f64, zenith_deg: f64, extraterrestrial: f64) -> f64 {
    let cos_zenith = zenith_deg.to_radians().cos().max(MIN_COS_ZENITH);
    let horizontal_extra = extraterrestrial * cos_zenith;
    (ghi / horizontal_extra).clamp(0.0, MAX_CLEARNESS_INDEX)
}

/// Erbs diffuse fraction as a function of clearness index
fn diffuse_fraction(kt: f64) -> f64 {
    if kt <= 0.22 {
        1.0 - 0.09 * kt
    } else if kt <= 0.8 {
        0.9511 - 0.1604 * kt + 4.388 * kt.powi(2) - 16.638 * kt.powi(3) + 12.336 * kt.powi(4)
    } else {
        0.165
    }
}

/// Estimate DNI and DHI from GHI and the true solar zenith.
///
/// Negative GHI is treated as zero. With the sun at or below the horizon both
/// components are zero. Between 87° and 90° all irradiance is assigned to the
/// diffuse component.
pub fn erbs(ghi: f64, zenith_deg: f64, day_of_year: u32) -> DecomposedIrradiance {
    let ghi = ghi.max(0.0);
    if zenith_deg >= 90.0 || ghi == 0.0 {
        return DecomposedIrradiance::zero();
    }

    let kt = clearness_index(ghi, zenith_deg, extraterrestrial_irradiance(day_of_year));
    let dhi = diffuse_fraction(kt) * ghi;

    if zenith_deg > MAX_BEAM_ZENITH_DEG {
        return DecomposedIrradiance {
            dni: 0.0,
            dhi: ghi,
            clearness_index: kt,
        };
    }

    let dni = ((ghi - dhi) / zenith_deg.to_radians().cos()).max(0.0);
    DecomposedIrradiance {
        dni,
        dhi,
        clearness_index: kt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraterrestrial_irradiance_range() {
        let min = (1..=365).map(extraterrestrial_irradiance).fold(f64::INFINITY, f64::min);
        let max = (1..=365)
            .map(extraterrestrial_irradiance)
            .fold(f64::NEG_INFINITY, f64::max);

        // Perihelion in early January, aphelion in early July
        assert!(max > 1405.0 && max < 1420.0, "max {max}");
        assert!(min > 1315.0 && min < 1325.0, "min {min}");
        assert!(extraterrestrial_irradiance(3) > extraterrestrial_irradiance(185));
    }

    #[test]
    fn test_clearness_index_is_clipped() {
        assert_eq!(clearness_index(5000.0, 10.0, 1366.1), 2.0);
        assert_eq!(clearness_index(-10.0, 10.0, 1366.1), 0.0);
    }

    #[test]
    fn test_diffuse_fraction_branches() {
        assert!((diffuse_fraction(0.1) - 0.991).abs() < 1e-12);
        assert!((diffuse_fraction(0.5) - 0.65915).abs() < 1e-6);
        assert_eq!(diffuse_fraction(0.9), 0.165);
    }

    #[test]
    fn test_components_rebuild_ghi() {
        let zenith: f64 = 30.0;
        let result = erbs(800.0, zenith, 172);
        let rebuilt = result.dni * zenith.to_radians().cos() + result.dhi;
        assert!((rebuilt - 800.0).abs() < 1e-9);
        assert!(result.dni > 0.0 && result.dhi > 0.0);
    }

    #[test]
    fn test_sun_below_horizon_gives_zero() {
        assert_eq!(erbs(120.0, 90.0, 172), DecomposedIrradiance::zero());
        assert_eq!(erbs(120.0, 120.0, 172), DecomposedIrradiance::zero());
    }

    #[test]
    fn test_grazing_sun_is_all_diffuse() {
        let result = erbs(40.0, 88.5, 172);
        assert_eq!(result.dni, 0.0);
        assert_eq!(result.dhi, 40.0);
    }

    #[test]
    fn test_negative_ghi_is_clamped() {
        assert_eq!(erbs(-3.5, 40.0, 100), DecomposedIrradiance::zero());
    }
}
