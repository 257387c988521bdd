use serde::{Deserialize, Serialize};

/// Sub-satellite point: latitude/longitude in degrees, altitude in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticSample {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

/// Azimuth/elevation in degrees as seen from the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAngleSample {
    pub az: f64,
    pub el: f64,
}
