//! Module temperature from a steady-state heat balance (Faiman, 2008).

/// Faiman heat-loss coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaimanModel {
    /// Constant heat transfer component (W/(m²·K))
    pub u0: f64,
    /// Convective heat transfer component (W·s/(m³·K))
    pub u1: f64,
}

impl Default for FaimanModel {
    /// Published coefficients for a free-standing c-Si module
    fn default() -> Self {
        Self { u0: 25.0, u1: 6.84 }
    }
}

impl FaimanModel {
    /// Module temperature (°C) for POA irradiance (W/m²), air temperature (°C) and
    /// wind speed (m/s). Negative wind speeds are treated as calm.
    pub fn module_temperature(&self, poa_global: f64, air_temperature: f64, wind_speed: f64) -> f64 {
        let heat_loss = self.u0 + self.u1 * wind_speed.max(0.0);
        air_temperature + poa_global / heat_loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_module_is_at_air_temperature() {
        let model = FaimanModel::default();
        assert_eq!(model.module_temperature(0.0, 12.5, 3.0), 12.5);
    }

    #[test]
    fn test_reference_point() {
        // 1000 W/m², 25 °C, 1 m/s -> 25 + 1000 / 31.84
        let t = FaimanModel::default().module_temperature(1000.0, 25.0, 1.0);
        assert!((t - 56.407).abs() < 1e-3, "t = {t}");
    }

    #[test]
    fn test_wind_cools_module() {
        let model = FaimanModel::default();
        let calm = model.module_temperature(800.0, 20.0, 0.0);
        let windy = model.module_temperature(800.0, 20.0, 8.0);
        assert!(windy < calm);
    }

    #[test]
    fn test_negative_wind_is_calm() {
        let model = FaimanModel::default();
        assert_eq!(
            model.module_temperature(800.0, 20.0, -2.0),
            model.module_temperature(800.0, 20.0, 0.0)
        );
    }
}
