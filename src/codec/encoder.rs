use thiserror::Error;

use super::wire::{encode_number_list, encode_timestamp_list};
use crate::domain::{ForecastContext, ForecastEvent, SimulationResult, TimeSeries, DATA_PROVIDER};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{field} has a non-finite value at position {index}")]
    NonFinite { field: &'static str, index: usize },
    #[error("failed to serialize {field}: {source}")]
    Json {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn encode_series(field: &'static str, series: &TimeSeries<f64>) -> Result<String, EncodeError> {
    if let Some(index) = series.values().iter().position(|v| !v.is_finite()) {
        return Err(EncodeError::NonFinite { field, index });
    }
    encode_number_list(series.values()).map_err(|source| EncodeError::Json { field, source })
}

/// Serialize a simulation result into an output event.
///
/// A failure here is final for the message; encoding the same values again cannot
/// succeed.
pub fn encode(
    result: &SimulationResult,
    context: &ForecastContext,
) -> Result<ForecastEvent, EncodeError> {
    let ts_forecast = encode_timestamp_list(result.index().as_slice()).map_err(|source| {
        EncodeError::Json {
            field: "ts_forecast",
            source,
        }
    })?;

    Ok(ForecastEvent {
        p_forecast: encode_series("p_forecast", &result.power_output)?,
        irrad_forecast: encode_series("irrad_forecast", &result.plane_of_array_irradiance)?,
        eta_forecast: encode_series("eta_forecast", &result.module_efficiency)?,
        ts_forecast,
        forecast_time: context.forecast_time.clone(),
        data_provider: DATA_PROVIDER.to_string(),
        location: context.location.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeIndex;
    use chrono::{TimeZone, Utc};

    fn result(power: Vec<f64>) -> SimulationResult {
        let index = TimeIndex::new(
            (0..power.len() as u32)
                .map(|h| Utc.with_ymd_and_hms(2024, 6, 21, 10 + h, 0, 0).unwrap())
                .collect(),
        )
        .unwrap();
        let n = power.len();
        SimulationResult {
            power_output: TimeSeries::new(index.clone(), power).unwrap(),
            plane_of_array_irradiance: TimeSeries::new(index.clone(), vec![500.0; n]).unwrap(),
            module_efficiency: TimeSeries::new(index, vec![0.95; n]).unwrap(),
        }
    }

    fn context() -> ForecastContext {
        ForecastContext {
            forecast_time: "2024-06-21T03:00:00Z".into(),
            location: "10382".into(),
        }
    }

    #[test]
    fn test_encode_event_fields() {
        let event = encode(&result(vec![2375.0, 2400.5]), &context()).unwrap();
        assert_eq!(event.p_forecast, "[2375.0,2400.5]");
        assert_eq!(event.irrad_forecast, "[500.0,500.0]");
        assert_eq!(event.eta_forecast, "[0.95,0.95]");
        assert_eq!(
            event.ts_forecast,
            "[\"2024-06-21T10:00:00+00:00\",\"2024-06-21T11:00:00+00:00\"]"
        );
        assert_eq!(event.forecast_time, "2024-06-21T03:00:00Z");
        assert_eq!(event.data_provider, "\"PVSystemSim\"");
        assert_eq!(event.location, "10382");
    }

    #[test]
    fn test_encoded_arrays_are_json() {
        let event = encode(&result(vec![1.25]), &context()).unwrap();
        let power: Vec<f64> = serde_json::from_str(&event.p_forecast).unwrap();
        let timestamps: Vec<String> = serde_json::from_str(&event.ts_forecast).unwrap();
        let provider: String = serde_json::from_str(&event.data_provider).unwrap();
        assert_eq!(power, vec![1.25]);
        assert_eq!(timestamps.len(), 1);
        assert_eq!(provider, "PVSystemSim");
    }

    #[test]
    fn test_non_finite_value_fails() {
        let err = encode(&result(vec![10.0, f64::NAN]), &context()).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::NonFinite {
                field: "p_forecast",
                index: 1
            }
        ));
    }
}
