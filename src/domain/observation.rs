use super::{ForecastContext, TimeIndex, TimeSeries};

/// One weather forecast for a station, as received from the input stream
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub station_id: String,
    /// Opaque token forwarded untouched to the output event
    pub forecast_time: String,
    pub observation_time: TimeIndex,
    /// Ambient pressure (Pa)
    pub air_pressure: TimeSeries<f64>,
    /// Air temperature at 2 m (°C)
    pub air_temperature: TimeSeries<f64>,
    /// Wind speed at 10 m (m/s)
    pub wind_speed: TimeSeries<f64>,
    /// Global horizontal irradiance (W/m²)
    pub global_horizontal_irradiance: TimeSeries<f64>,
    pub latitude: f64,
    pub longitude: f64,
}

impl WeatherObservation {
    pub fn len(&self) -> usize {
        self.observation_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observation_time.is_empty()
    }

    /// Weather series paired with their wire names, in a fixed order
    pub fn weather_series(&self) -> [(&'static str, &TimeSeries<f64>); 4] {
        [
            ("air_pressure", &self.air_pressure),
            ("air_temperature", &self.air_temperature),
            ("wind_speed", &self.wind_speed),
            (
                "global_horizontal_irradiance",
                &self.global_horizontal_irradiance,
            ),
        ]
    }

    pub fn context(&self) -> ForecastContext {
        ForecastContext {
            forecast_time: self.forecast_time.clone(),
            location: self.station_id.clone(),
        }
    }
}
