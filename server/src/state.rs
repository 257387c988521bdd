use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::{orbit_api_url, upstream_connect_timeout, upstream_http_timeout};

/// Satellite name list as last fetched from the orbital service.
#[derive(Debug, Clone)]
pub struct CachedCatalog {
    pub names: Vec<String>,
    /// Pre-serialized JSON array, shared by every request.
    pub json: Arc<Bytes>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedCatalog {
    pub fn new(names: Vec<String>) -> Self {
        let json = serde_json::to_vec(&names)
            .map(Bytes::from)
            .unwrap_or_else(|_| Bytes::from_static(b"[]"));
        Self {
            names,
            json: Arc::new(json),
            fetched_at: Utc::now(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    /// Upstream base URL, no trailing slash.
    pub orbit_api_url: Arc<str>,
    pub catalog: Arc<RwLock<Option<CachedCatalog>>>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    proxied_requests_total: AtomicU64,
    upstream_errors_total: AtomicU64,
    catalog_cache_hits_total: AtomicU64,
    catalog_cache_misses_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservabilitySnapshot {
    pub proxied_requests_total: u64,
    pub upstream_errors_total: u64,
    pub catalog_cache_hits_total: u64,
    pub catalog_cache_misses_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            proxied_requests_total: self.proxied_requests_total.load(Ordering::Relaxed),
            upstream_errors_total: self.upstream_errors_total.load(Ordering::Relaxed),
            catalog_cache_hits_total: self.catalog_cache_hits_total.load(Ordering::Relaxed),
            catalog_cache_misses_total: self.catalog_cache_misses_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_proxied_request(&self) {
        self.proxied_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_catalog_cache_hit(&self) {
        self.catalog_cache_hits_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_catalog_cache_miss(&self) {
        self.catalog_cache_misses_total
            .fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_upstream(orbit_api_url())
    }

    pub fn with_upstream(orbit_api_url: impl Into<String>) -> Self {
        let request_timeout = upstream_http_timeout();
        let connect_timeout = upstream_connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("satwatch/0.1")
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, retrying without custom user-agent"
                );
                reqwest::Client::builder()
                    .timeout(request_timeout)
                    .connect_timeout(connect_timeout)
                    .build()
            })
            .unwrap_or_else(|e| {
                panic!("failed to build timeout-configured HTTP client: {e}");
            });
        let orbit_api_url: String = orbit_api_url.into();
        Self {
            http_client,
            orbit_api_url: Arc::from(orbit_api_url.trim_end_matches('/')),
            catalog: Arc::new(RwLock::new(None)),
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }

    /// Name count and fetch time of the cached catalog, if one is loaded.
    pub async fn catalog_summary(&self) -> (usize, Option<DateTime<Utc>>) {
        self.catalog
            .read()
            .await
            .as_ref()
            .map_or((0, None), |catalog| (catalog.names.len(), Some(catalog.fetched_at)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_catalog_serializes_once() {
        let catalog = CachedCatalog::new(vec!["NOAA 19".into(), "ISS (ZARYA)".into()]);
        assert_eq!(catalog.json.as_ref(), &Bytes::from_static(br#"["NOAA 19","ISS (ZARYA)"]"#));
    }

    #[tokio::test]
    async fn summary_reports_loaded_catalog() {
        let state = AppState::with_upstream("http://127.0.0.1:9");
        let before = Utc::now();
        *state.catalog.write().await = Some(CachedCatalog::new(vec!["NOAA 19".into()]));
        let (size, fetched_at) = state.catalog_summary().await;
        assert_eq!(size, 1);
        assert!(fetched_at.is_some_and(|at| at >= before && at <= Utc::now()));
    }

    #[test]
    fn counters_accumulate() {
        let counters = ObservabilityCounters::default();
        counters.record_proxied_request();
        counters.record_proxied_request();
        counters.record_upstream_error();
        counters.record_catalog_cache_miss();
        assert_eq!(
            counters.snapshot(),
            ObservabilitySnapshot {
                proxied_requests_total: 2,
                upstream_errors_total: 1,
                catalog_cache_hits_total: 0,
                catalog_cache_misses_total: 1,
            }
        );
    }

    #[tokio::test]
    async fn upstream_url_loses_trailing_slash() {
        let state = AppState::with_upstream("http://127.0.0.1:9/");
        assert_eq!(&*state.orbit_api_url, "http://127.0.0.1:9");
        assert_eq!(state.catalog_summary().await, (0, None));
    }
}
