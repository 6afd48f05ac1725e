#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use pv_forecast_service::domain::{StreamMessage, TimeIndex, TimeSeries, WeatherObservation};

pub const BERLIN_LAT: f64 = 52.5;
pub const BERLIN_LON: f64 = 13.4;

/// Local solar noon in Berlin on the June solstice
pub fn berlin_solar_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 21, 11, 8, 0).unwrap()
}

pub fn hourly(start: DateTime<Utc>, n: usize) -> Vec<DateTime<Utc>> {
    (0..n as i64).map(|h| start + Duration::hours(h)).collect()
}

/// Observation with constant weather and the given irradiance per timestamp
pub fn observation_at(
    times: Vec<DateTime<Utc>>,
    ghi: Vec<f64>,
    latitude: f64,
    longitude: f64,
) -> WeatherObservation {
    let n = times.len();
    let index = TimeIndex::new(times).unwrap();
    WeatherObservation {
        station_id: "10382".into(),
        forecast_time: "2024-06-21T03:00:00Z".into(),
        air_pressure: TimeSeries::new(index.clone(), vec![101_325.0; n]).unwrap(),
        air_temperature: TimeSeries::new(index.clone(), vec![20.0; n]).unwrap(),
        wind_speed: TimeSeries::new(index.clone(), vec![2.0; n]).unwrap(),
        global_horizontal_irradiance: TimeSeries::new(index.clone(), ghi).unwrap(),
        latitude,
        longitude,
        observation_time: index,
    }
}

/// Well-formed input message for three midday hours in Berlin
pub fn weather_message() -> StreamMessage {
    StreamMessage::from([
        ("station".to_string(), "10382".to_string()),
        ("forecast_time".to_string(), "2024-06-21T03:00:00Z".to_string()),
        (
            "observation_time".to_string(),
            "['2024-06-21 10:00:00+00:00', '2024-06-21 11:00:00+00:00', '2024-06-21 12:00:00+00:00']"
                .to_string(),
        ),
        ("air_pressure".to_string(), "[101325.0, 101300.0, 101280.0]".to_string()),
        ("air_temperature_2m".to_string(), "[19.5, 20.0, 21.0]".to_string()),
        ("wind_speed_10m".to_string(), "[2.0, None, 3.5]".to_string()),
        ("global_horizontal_irradiation".to_string(), "[650.0, 800.0, 780.0]".to_string()),
        ("latitude".to_string(), "52.5".to_string()),
        ("longitude".to_string(), "13.4".to_string()),
    ])
}
