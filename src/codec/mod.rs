//! Conversion between stream messages and typed values.
//!
//! - [`decoder`]: input message -> [`WeatherObservation`](crate::domain::WeatherObservation)
//! - [`encoder`]: [`SimulationResult`](crate::domain::SimulationResult) -> output event
//! - [`wire`]: list and timestamp encodings shared by both directions

pub mod decoder;
pub mod encoder;
pub mod wire;

pub use decoder::{decode, encode_observation, DecodeError};
pub use encoder::{encode, EncodeError};

/// Input message field names
pub mod fields {
    pub const STATION: &str = "station";
    pub const FORECAST_TIME: &str = "forecast_time";
    pub const OBSERVATION_TIME: &str = "observation_time";
    pub const AIR_PRESSURE: &str = "air_pressure";
    pub const AIR_TEMPERATURE: &str = "air_temperature_2m";
    pub const WIND_SPEED: &str = "wind_speed_10m";
    pub const GHI: &str = "global_horizontal_irradiation";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
}
