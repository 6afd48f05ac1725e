//! Relative module efficiency (ADR model, Driesse & Stein 2020) and array power.

use super::SimulationParameters;

/// Irradiance at which the ADR coefficients are normalised (W/m²)
const ADR_REFERENCE_IRRADIANCE: f64 = 1000.0;
/// Module temperature at which the ADR coefficients are normalised (°C)
const ADR_REFERENCE_TEMPERATURE: f64 = 25.0;

/// Efficiency relative to STC for a POA irradiance (W/m²) and module temperature (°C).
///
/// Exactly zero when there is no light on the array.
pub fn relative_efficiency(
    poa_global: f64,
    module_temperature: f64,
    params: &SimulationParameters,
) -> f64 {
    if poa_global <= 0.0 {
        return 0.0;
    }

    let s = poa_global / ADR_REFERENCE_IRRADIANCE;
    let dt = module_temperature - ADR_REFERENCE_TEMPERATURE;

    let s_o = 10f64.powf(params.k_d + dt * params.tc_d);
    let s_o_ref = 10f64.powf(params.k_d);

    let v = (s / s_o).ln_1p() / (1.0 / s_o_ref).ln_1p();

    params.k_a * ((1.0 + params.k_rs + params.k_rsh) * v - params.k_rs * s - params.k_rsh * v * v)
}

/// Array output (W) for a relative efficiency and POA irradiance
pub fn power_output(efficiency: f64, poa_global: f64, params: &SimulationParameters) -> f64 {
    if poa_global <= 0.0 {
        return 0.0;
    }
    params.p_stc * efficiency * (poa_global / params.g_stc)
}
