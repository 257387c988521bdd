use tracing::{info, warn};

use crate::config::{SATELLITES_LIST_ENDPOINT, catalog_refresh_interval};
use crate::state::{AppState, CachedCatalog};

pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(catalog_refresh_interval());

    // First tick fires immediately, so the cache is warm shortly after startup.
    loop {
        interval.tick().await;

        match refresh(&state).await {
            Ok(catalog) => info!("loaded satellite catalog with {} names", catalog.names.len()),
            Err(e) => warn!("failed to refresh satellite catalog: {e}"),
        }
    }
}

/// Fetches the name list and replaces the cached copy.
pub async fn refresh(state: &AppState) -> Result<CachedCatalog, reqwest::Error> {
    let names = fetch_catalog(&state.http_client, &state.orbit_api_url).await?;
    let catalog = CachedCatalog::new(names);
    *state.catalog.write().await = Some(catalog.clone());
    Ok(catalog)
}

async fn fetch_catalog(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<String>, reqwest::Error> {
    let resp = client
        .get(format!("{base_url}/api/{SATELLITES_LIST_ENDPOINT}"))
        .send()
        .await?
        .error_for_status()?;
    let names: Vec<String> = resp.json().await?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::get};

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake upstream");
        let addr = listener.local_addr().expect("upstream address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve fake upstream");
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn refresh_replaces_cached_catalog() {
        let upstream = spawn_upstream(Router::new().route(
            "/api/get-satellites-list",
            get(|| async { Json(vec!["NOAA 19", "ISS (ZARYA)"]) }),
        ))
        .await;
        let state = AppState::with_upstream(upstream);

        let catalog = refresh(&state).await.expect("refresh catalog");
        assert_eq!(catalog.names, vec!["NOAA 19", "ISS (ZARYA)"]);
        assert_eq!(state.catalog_summary().await.0, 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_catalog() {
        let upstream = spawn_upstream(Router::new().route(
            "/api/get-satellites-list",
            get(|| async { axum::http::StatusCode::SERVICE_UNAVAILABLE }),
        ))
        .await;
        let state = AppState::with_upstream(upstream);
        *state.catalog.write().await = Some(CachedCatalog::new(vec!["NOAA 15".into()]));

        assert!(refresh(&state).await.is_err());
        assert_eq!(state.catalog_summary().await.0, 1);
    }
}
