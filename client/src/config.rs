/// Prefix of every orbital API endpoint served by the gateway.
pub const API_BASE: &str = "/api";

/// Period of the view ticker.
pub const TICK_INTERVAL_MS: u32 = 1_000;

pub use satwatch_shared::SUGGESTION_LIMIT;

// Pass search form defaults.
pub use satwatch_shared::DEFAULT_PASS_DURATION_HOURS;
pub const DEFAULT_MIN_ELEVATION: f64 = 0.0;
pub const DEFAULT_MIN_APOGEE: f64 = 0.0;
pub const DEFAULT_OBSERVER_ALT_M: f64 = 0.0;

pub fn api_url(endpoint: &str) -> String {
    format!("{API_BASE}/{endpoint}")
}
