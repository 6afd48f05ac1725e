pub mod forecast;
pub mod observation;
pub mod series;

pub use forecast::*;
pub use observation::*;
pub use series::*;

/// Flat field map of a single stream entry, values in their string encoding
pub type StreamMessage = std::collections::HashMap<String, String>;
