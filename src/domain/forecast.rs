use super::{StreamMessage, TimeIndex, TimeSeries};

/// Identifies this engine in the `data_provider` field, JSON-quoted
pub const DATA_PROVIDER: &str = "\"PVSystemSim\"";

/// Output of one simulation pass, aligned to the observation's timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// PV power output (W)
    pub power_output: TimeSeries<f64>,
    /// Total plane-of-array irradiance (W/m²)
    pub plane_of_array_irradiance: TimeSeries<f64>,
    /// Relative module efficiency (1.0 at STC)
    pub module_efficiency: TimeSeries<f64>,
}

impl SimulationResult {
    pub fn index(&self) -> &TimeIndex {
        self.power_output.index()
    }

    pub fn len(&self) -> usize {
        self.power_output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.power_output.is_empty()
    }
}

/// Passthrough values carried from the observation into the forecast event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastContext {
    pub forecast_time: String,
    pub location: String,
}

/// Output stream message, every field already in its wire encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastEvent {
    pub p_forecast: String,
    pub irrad_forecast: String,
    pub eta_forecast: String,
    pub ts_forecast: String,
    pub forecast_time: String,
    pub data_provider: String,
    pub location: String,
}

impl ForecastEvent {
    pub fn into_message(self) -> StreamMessage {
        StreamMessage::from([
            ("p_forecast".to_string(), self.p_forecast),
            ("irrad_forecast".to_string(), self.irrad_forecast),
            ("eta_forecast".to_string(), self.eta_forecast),
            ("ts_forecast".to_string(), self.ts_forecast),
            ("forecast_time".to_string(), self.forecast_time),
            ("data_provider".to_string(), self.data_provider),
            ("location".to_string(), self.location),
        ])
    }
}
