use std::time::Duration;

pub const DEFAULT_ORBIT_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_CATALOG_REFRESH_SECS: u64 = 3600; // hourly

pub use satwatch_shared::{
    PASSES_LIST_ENDPOINT, SATELLITE_DATA_ENDPOINT, SATELLITES_LIST_ENDPOINT, TRAJECTORY_ENDPOINT,
};

fn positive_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value > T::default())
}

/// Base URL of the orbital service, without a trailing slash.
pub fn orbit_api_url() -> String {
    std::env::var("ORBIT_API_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ORBIT_API_URL.to_owned())
}

pub fn server_port() -> u16 {
    positive_env("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn static_dir() -> String {
    std::env::var("STATIC_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned())
}

pub fn upstream_http_timeout() -> Duration {
    Duration::from_secs(
        positive_env("UPSTREAM_HTTP_TIMEOUT_SECS").unwrap_or(DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS),
    )
}

pub fn upstream_connect_timeout() -> Duration {
    Duration::from_secs(
        positive_env("UPSTREAM_CONNECT_TIMEOUT_SECS")
            .unwrap_or(DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS),
    )
}

pub fn catalog_refresh_interval() -> Duration {
    Duration::from_secs(positive_env("CATALOG_REFRESH_SECS").unwrap_or(DEFAULT_CATALOG_REFRESH_SECS))
}
