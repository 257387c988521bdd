pub mod api;
pub mod ranking;
pub mod samples;
pub mod selection;
pub mod series;
pub mod tracking;
pub mod visibility;

pub use api::*;
pub use ranking::{SUGGESTION_LIMIT, levenshtein, rank};
pub use samples::{GeodeticSample, LookAngleSample};
pub use selection::SelectedSatelliteSet;
pub use series::{IndexPolicy, SampleSeries};
pub use tracking::{LiveTracking, OrbitalElements, PassPlayback};
pub use visibility::{VisibilityState, VisibilityWindow};
