//! # Solar Position
//!
//! Sun position from the NOAA low-precision ephemeris (Meeus, "Astronomical
//! Algorithms"), with atmospheric refraction corrected from ambient pressure and
//! temperature using the NREL SPA refraction formula.
//!
//! Accuracy is about 0.01° in zenith for dates between 1800 and 2100, which is far
//! below the resolution of hourly weather forecasts.

use chrono::{DateTime, Timelike, Utc};

/// Julian day of the Unix epoch
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Julian day of J2000.0
const J2000_JD: f64 = 2_451_545.0;
/// Apparent solar radius plus standard refraction at the horizon (degrees)
const REFRACTION_THRESHOLD_DEG: f64 = -(0.26667 + 0.5667);

/// Sun position at one instant and location.
///
/// All angles in degrees. Azimuth is measured clockwise from north
/// (0 = north, 90 = east, 180 = south, 270 = west).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Geometric zenith, without refraction
    pub zenith_deg: f64,
    /// Zenith as seen through the atmosphere
    pub apparent_zenith_deg: f64,
    pub azimuth_deg: f64,
}

impl SolarPosition {
    pub fn elevation_deg(&self) -> f64 {
        90.0 - self.zenith_deg
    }

    pub fn apparent_elevation_deg(&self) -> f64 {
        90.0 - self.apparent_zenith_deg
    }

    /// Geometric sun at or below the horizon
    pub fn is_night(&self) -> bool {
        self.zenith_deg >= 90.0
    }
}

/// Calculate the sun position for a UTC instant.
///
/// `pressure_pa` and `temperature_c` only affect the refraction term, so they shift
/// `apparent_zenith_deg` near the horizon and leave `zenith_deg` untouched.
pub fn solar_position(
    time: DateTime<Utc>,
    latitude_deg: f64,
    longitude_deg: f64,
    pressure_pa: f64,
    temperature_c: f64,
) -> SolarPosition {
    let seconds = time.timestamp() as f64 + f64::from(time.nanosecond()) * 1e-9;
    let julian_day = seconds / 86_400.0 + UNIX_EPOCH_JD;
    let jc = (julian_day - J2000_JD) / 36_525.0;

    // Geometric mean longitude and anomaly of the sun
    let mean_longitude = (280.46646 + jc * (36_000.76983 + jc * 0.0003032)).rem_euclid(360.0);
    let mean_anomaly = 357.52911 + jc * (35_999.05029 - 0.0001537 * jc);
    let eccentricity = 0.016708634 - jc * (0.000042037 + 0.0000001267 * jc);

    let m = mean_anomaly.to_radians();
    let equation_of_center = m.sin() * (1.914602 - jc * (0.004817 + 0.000014 * jc))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * jc)
        + (3.0 * m).sin() * 0.000289;

    let true_longitude = mean_longitude + equation_of_center;
    let omega = (125.04 - 1934.136 * jc).to_radians();
    let apparent_longitude = true_longitude - 0.00569 - 0.00478 * omega.sin();

    let mean_obliquity =
        23.0 + (26.0 + (21.448 - jc * (46.815 + jc * (0.00059 - jc * 0.001813))) / 60.0) / 60.0;
    let obliquity = (mean_obliquity + 0.00256 * omega.cos()).to_radians();

    let declination = (obliquity.sin() * apparent_longitude.to_radians().sin()).asin();

    // Equation of time (minutes)
    let y = (obliquity / 2.0).tan().powi(2);
    let l0 = mean_longitude.to_radians();
    let equation_of_time = 4.0
        * (y * (2.0 * l0).sin() - 2.0 * eccentricity * m.sin()
            + 4.0 * eccentricity * y * m.sin() * (2.0 * l0).cos()
            - 0.5 * y * y * (4.0 * l0).sin()
            - 1.25 * eccentricity * eccentricity * (2.0 * m).sin())
        .to_degrees();

    let minutes_of_day = seconds.rem_euclid(86_400.0) / 60.0;
    let true_solar_minutes =
        (minutes_of_day + equation_of_time + 4.0 * longitude_deg).rem_euclid(1440.0);
    let hour_angle = (true_solar_minutes / 4.0 - 180.0).to_radians();

    let lat = latitude_deg.to_radians();
    let cos_zenith = (lat.sin() * declination.sin()
        + lat.cos() * declination.cos() * hour_angle.cos())
    .clamp(-1.0, 1.0);
    let zenith_deg = cos_zenith.acos().to_degrees();

    // Meeus 13.5, measured westward from south, then shifted to north-based
    let azimuth_deg = (hour_angle
        .sin()
        .atan2(hour_angle.cos() * lat.sin() - declination.tan() * lat.cos())
        .to_degrees()
        + 180.0)
        .rem_euclid(360.0);

    let apparent_zenith_deg =
        zenith_deg - refraction_correction(90.0 - zenith_deg, pressure_pa, temperature_c);

    SolarPosition {
        zenith_deg,
        apparent_zenith_deg,
        azimuth_deg,
    }
}

/// Refraction lift of the solar disc (degrees), zero well below the horizon
fn refraction_correction(elevation_deg: f64, pressure_pa: f64, temperature_c: f64) -> f64 {
    if elevation_deg < REFRACTION_THRESHOLD_DEG {
        return 0.0;
    }
    let kelvin = 273.0 + temperature_c;
    if kelvin <= 0.0 {
        return 0.0;
    }
    let pressure_hpa = (pressure_pa / 100.0).max(0.0);
    let arg = (elevation_deg + 10.3 / (elevation_deg + 5.11)).to_radians();
    (pressure_hpa / 1010.0) * (283.0 / kelvin) * 1.02 / (60.0 * arg.tan())
}
