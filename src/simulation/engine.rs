use chrono::Datelike;
use thiserror::Error;
use tracing::debug;

use super::{
    erbs, plane_of_array, power_output, relative_efficiency, solar_position, ArrayOrientation,
    FaimanModel, SimulationParameters,
};
use crate::domain::{SeriesError, SimulationResult, TimeSeries, WeatherObservation};

/// Structural problems that make an observation unusable for simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid simulation input: {0}")]
    InvalidInput(String),
}

impl From<SeriesError> for SimulationError {
    fn from(err: SeriesError) -> Self {
        SimulationError::InvalidInput(err.to_string())
    }
}

/// Run the five-stage PV pipeline over every timestamp of an observation.
///
/// Stages, in order: solar position, Erbs decomposition, plane-of-array irradiance
/// on a latitude-tilted south-facing array, Faiman module temperature, ADR efficiency
/// and power. Physically implausible values are clamped; only structural problems
/// produce an error. The result shares the observation's timestamp index.
///
/// Finite but extreme inputs (GHI near `f64::MAX`) are not clamped and can overflow
/// to non-finite outputs. The encoder rejects those with `EncodeError::NonFinite`,
/// so such a message is dropped rather than published.
pub fn simulate(
    observation: &WeatherObservation,
    params: &SimulationParameters,
) -> Result<SimulationResult, SimulationError> {
    check_structure(observation)?;

    let index = &observation.observation_time;
    let pressure = observation.air_pressure.values();
    let air_temperature = observation.air_temperature.values();
    let wind_speed = observation.wind_speed.values();
    let ghi = observation.global_horizontal_irradiance.values();

    let n = index.len();
    let orientation = ArrayOrientation::latitude_tilt(observation.latitude);
    let thermal = FaimanModel::default();

    // Stage 1: solar position
    let sun: Vec<_> = index
        .iter()
        .enumerate()
        .map(|(i, ts)| {
            solar_position(
                *ts,
                observation.latitude,
                observation.longitude,
                pressure[i],
                air_temperature[i],
            )
        })
        .collect();

    // Stage 2: beam/diffuse split, negative GHI clamped
    let ghi: Vec<f64> = ghi.iter().map(|g| g.max(0.0)).collect();
    let components: Vec<_> = index
        .iter()
        .enumerate()
        .map(|(i, ts)| erbs(ghi[i], sun[i].zenith_deg, ts.ordinal()))
        .collect();

    // Stage 3: plane-of-array irradiance
    let poa: Vec<f64> = (0..n)
        .map(|i| plane_of_array(&orientation, &sun[i], &components[i], ghi[i]).global)
        .collect();

    // Stage 4: module temperature
    let module_temperature: Vec<f64> = (0..n)
        .map(|i| thermal.module_temperature(poa[i], air_temperature[i], wind_speed[i]))
        .collect();

    // Stage 5: efficiency and power
    let efficiency: Vec<f64> = (0..n)
        .map(|i| relative_efficiency(poa[i], module_temperature[i], params))
        .collect();
    let power: Vec<f64> = (0..n)
        .map(|i| power_output(efficiency[i], poa[i], params))
        .collect();

    debug!(
        station = %observation.station_id,
        entries = n,
        "simulated PV power output"
    );

    Ok(SimulationResult {
        power_output: TimeSeries::new(index.clone(), power)?,
        plane_of_array_irradiance: TimeSeries::new(index.clone(), poa)?,
        module_efficiency: TimeSeries::new(index.clone(), efficiency)?,
    })
}

fn check_structure(observation: &WeatherObservation) -> Result<(), SimulationError> {
    if observation.is_empty() {
        return Err(SimulationError::InvalidInput(
            "observation has no timestamps".to_string(),
        ));
    }

    let (lat, lon) = (observation.latitude, observation.longitude);
    if !lat.is_finite() || !lon.is_finite() {
        return Err(SimulationError::InvalidInput(format!(
            "non-finite coordinates ({lat}, {lon})"
        )));
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(SimulationError::InvalidInput(format!(
            "coordinates out of range ({lat}, {lon})"
        )));
    }

    for (name, series) in observation.weather_series() {
        if !series.index().is_aligned_with(&observation.observation_time) {
            return Err(SimulationError::InvalidInput(format!(
                "{name} has {} entries not aligned with {} observation timestamps",
                series.len(),
                observation.len()
            )));
        }
        if let Some(position) = series.values().iter().position(|v| !v.is_finite()) {
            return Err(SimulationError::InvalidInput(format!(
                "{name} has a non-finite value at position {position}"
            )));
        }
    }
    Ok(())
}
