use thiserror::Error;

use super::fields;
use super::wire::{
    encode_number_list, encode_timestamp_list, parse_number_list, parse_scalar,
    parse_timestamp_list, WireError,
};
use crate::domain::{SeriesError, StreamMessage, TimeIndex, TimeSeries, WeatherObservation};

/// Input message rejected at the parse-and-validate boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed field `{field}`: {reason}")]
    Malformed { field: &'static str, reason: String },
    #[error("field `{field}` has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl DecodeError {
    fn malformed(field: &'static str, reason: impl ToString) -> Self {
        DecodeError::Malformed {
            field,
            reason: reason.to_string(),
        }
    }
}

fn required<'a>(raw: &'a StreamMessage, field: &'static str) -> Result<&'a str, DecodeError> {
    raw.get(field)
        .map(String::as_str)
        .ok_or_else(|| DecodeError::malformed(field, "field is missing"))
}

fn series(
    raw: &StreamMessage,
    field: &'static str,
    index: &TimeIndex,
) -> Result<TimeSeries<f64>, DecodeError> {
    let values = parse_number_list(required(raw, field)?)
        .map_err(|e: WireError| DecodeError::malformed(field, e))?;
    TimeSeries::new(index.clone(), values).map_err(|e| match e {
        SeriesError::LengthMismatch { expected, actual } => DecodeError::LengthMismatch {
            field,
            expected,
            actual,
        },
        other => DecodeError::malformed(field, other),
    })
}

fn scalar(raw: &StreamMessage, field: &'static str) -> Result<f64, DecodeError> {
    parse_scalar(required(raw, field)?).map_err(|e| DecodeError::malformed(field, e))
}

/// Parse a raw input stream message into a typed observation.
///
/// Every weather series must have exactly as many entries as `observation_time`.
pub fn decode(raw: &StreamMessage) -> Result<WeatherObservation, DecodeError> {
    let station_id = required(raw, fields::STATION)?.to_string();
    let forecast_time = required(raw, fields::FORECAST_TIME)?.to_string();

    let timestamps = parse_timestamp_list(required(raw, fields::OBSERVATION_TIME)?)
        .map_err(|e| DecodeError::malformed(fields::OBSERVATION_TIME, e))?;
    let observation_time = TimeIndex::new(timestamps)
        .map_err(|e| DecodeError::malformed(fields::OBSERVATION_TIME, e))?;

    Ok(WeatherObservation {
        station_id,
        forecast_time,
        air_pressure: series(raw, fields::AIR_PRESSURE, &observation_time)?,
        air_temperature: series(raw, fields::AIR_TEMPERATURE, &observation_time)?,
        wind_speed: series(raw, fields::WIND_SPEED, &observation_time)?,
        global_horizontal_irradiance: series(raw, fields::GHI, &observation_time)?,
        latitude: scalar(raw, fields::LATITUDE)?,
        longitude: scalar(raw, fields::LONGITUDE)?,
        observation_time,
    })
}

/// Write an observation in the input wire format, the inverse of [`decode`]
pub fn encode_observation(
    observation: &WeatherObservation,
) -> Result<StreamMessage, serde_json::Error> {
    Ok(StreamMessage::from([
        (fields::STATION.to_string(), observation.station_id.clone()),
        (
            fields::FORECAST_TIME.to_string(),
            observation.forecast_time.clone(),
        ),
        (
            fields::OBSERVATION_TIME.to_string(),
            encode_timestamp_list(observation.observation_time.as_slice())?,
        ),
        (
            fields::AIR_PRESSURE.to_string(),
            encode_number_list(observation.air_pressure.values())?,
        ),
        (
            fields::AIR_TEMPERATURE.to_string(),
            encode_number_list(observation.air_temperature.values())?,
        ),
        (
            fields::WIND_SPEED.to_string(),
            encode_number_list(observation.wind_speed.values())?,
        ),
        (
            fields::GHI.to_string(),
            encode_number_list(observation.global_horizontal_irradiance.values())?,
        ),
        (fields::LATITUDE.to_string(), observation.latitude.to_string()),
        (fields::LONGITUDE.to_string(), observation.longitude.to_string()),
    ]))
}
