//! # PV Simulation Module
//!
//! Converts a weather forecast into a PV power forecast for a single fixed array.
//!
//! ## Stages
//!
//! - **Solar**: sun zenith/azimuth per timestamp, refraction from pressure and temperature
//! - **Decomposition**: Erbs split of GHI into direct-normal and diffuse-horizontal parts
//! - **Irradiance**: isotropic-sky plane-of-array irradiance, tilt = latitude, facing south
//! - **Temperature**: Faiman module temperature from irradiance, air temperature and wind
//! - **Efficiency**: ADR relative efficiency and resulting array power
//!
//! The engine runs these stages in that order; each consumes only the previous stage's
//! output plus the original observation and parameters.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pv_forecast_service::simulation::{simulate, SimulationParameters};
//!
//! let params = SimulationParameters::default();
//! let result = simulate(&observation, &params)?;
//!
//! let peak_w = result
//!     .power_output
//!     .values()
//!     .iter()
//!     .cloned()
//!     .fold(0.0, f64::max);
//! ```

pub mod decomposition;
pub mod efficiency;
pub mod engine;
pub mod irradiance;
pub mod params;
pub mod solar;
pub mod temperature;

pub use decomposition::{clearness_index, erbs, extraterrestrial_irradiance, DecomposedIrradiance};
pub use efficiency::{power_output, relative_efficiency};
pub use engine::{simulate, SimulationError};
pub use irradiance::{plane_of_array, ArrayOrientation, PoaIrradiance, GROUND_ALBEDO};
pub use params::{ParameterError, SimulationParameters};
pub use solar::{solar_position, SolarPosition};
pub use temperature::FaimanModel;
