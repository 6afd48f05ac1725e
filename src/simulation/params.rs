use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected simulation parameters, reported once at startup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}

/// PV array rating and ADR efficiency coefficients.
///
/// Built once from configuration and shared read-only by every simulation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Rated array output at STC (W)
    #[serde(default = "default_p_stc")]
    pub p_stc: f64,
    /// Irradiance needed to reach rated output (W/m²)
    #[serde(default = "default_g_stc")]
    pub g_stc: f64,
    #[serde(default = "default_k_a")]
    pub k_a: f64,
    #[serde(default = "default_k_d")]
    pub k_d: f64,
    #[serde(default = "default_tc_d")]
    pub tc_d: f64,
    #[serde(default = "default_k_rs")]
    pub k_rs: f64,
    #[serde(default = "default_k_rsh")]
    pub k_rsh: f64,
}

fn default_p_stc() -> f64 {
    5000.0
}
fn default_g_stc() -> f64 {
    1000.0
}
fn default_k_a() -> f64 {
    0.99924
}
fn default_k_d() -> f64 {
    -5.49097
}
fn default_tc_d() -> f64 {
    0.01918
}
fn default_k_rs() -> f64 {
    0.06999
}
fn default_k_rsh() -> f64 {
    0.2614
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            p_stc: default_p_stc(),
            g_stc: default_g_stc(),
            k_a: default_k_a(),
            k_d: default_k_d(),
            tc_d: default_tc_d(),
            k_rs: default_k_rs(),
            k_rsh: default_k_rsh(),
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (name, value) in [("p_stc", self.p_stc), ("g_stc", self.g_stc)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParameterError::NotPositive { name, value });
            }
        }
        for (name, value) in [
            ("k_a", self.k_a),
            ("k_d", self.k_d),
            ("tc_d", self.tc_d),
            ("k_rs", self.k_rs),
            ("k_rsh", self.k_rsh),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NotFinite { name, value });
            }
        }
        Ok(())
    }
}
