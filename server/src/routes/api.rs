use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use tracing::warn;

use crate::config::{
    PASSES_LIST_ENDPOINT, SATELLITE_DATA_ENDPOINT, TRAJECTORY_ENDPOINT,
};
use crate::services::catalog_loader;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (catalog_size, catalog_fetched_at) = state.catalog_summary().await;
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "catalog_size": catalog_size,
        "catalog_fetched_at": catalog_fetched_at.map(|at| at.to_rfc3339()),
        "observability": {
            "proxied_requests_total": observability.proxied_requests_total,
            "upstream_errors_total": observability.upstream_errors_total,
            "catalog_cache_hits_total": observability.catalog_cache_hits_total,
            "catalog_cache_misses_total": observability.catalog_cache_misses_total,
        }
    }))
}

/// Serve the cached, pre-serialized name list; fetch it on a cold cache.
pub async fn get_satellites_list(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let cached = state
        .catalog
        .read()
        .await
        .as_ref()
        .map(|catalog| Arc::clone(&catalog.json));

    let json = match cached {
        Some(json) => {
            state.observability.record_catalog_cache_hit();
            json
        }
        None => {
            state.observability.record_catalog_cache_miss();
            let catalog = catalog_loader::refresh(&state).await.map_err(|e| {
                warn!(error = %e, "satellite catalog fetch on cache miss failed");
                state.observability.record_upstream_error();
                StatusCode::BAD_GATEWAY
            })?;
            catalog.json
        }
    };

    Ok(json_bytes_response(
        (*json).clone(),
        "public, max-age=300",
        None,
    ))
}

pub async fn get_satellite_data(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, StatusCode> {
    forward(&state, SATELLITE_DATA_ENDPOINT, query.as_deref()).await
}

pub async fn get_passes_list(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, StatusCode> {
    forward(&state, PASSES_LIST_ENDPOINT, query.as_deref()).await
}

pub async fn get_trajectory(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, StatusCode> {
    forward(&state, TRAJECTORY_ENDPOINT, query.as_deref()).await
}

fn upstream_url(base: &str, endpoint: &str, query: Option<&str>) -> Result<reqwest::Url, StatusCode> {
    let mut url = reqwest::Url::parse(&format!("{base}/api/{endpoint}"))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

/// Relays one GET to the orbital service. The raw query string is passed through
/// untouched. Error statuses keep the upstream body so the client sees its payload.
async fn forward(
    state: &AppState,
    endpoint: &'static str,
    query: Option<&str>,
) -> Result<Response, StatusCode> {
    state.observability.record_proxied_request();
    let url = upstream_url(&state.orbit_api_url, endpoint, query)?;

    let resp = state.http_client.get(url).send().await.map_err(|e| {
        warn!(error = %e, endpoint, "orbital service request failed");
        state.observability.record_upstream_error();
        StatusCode::BAD_GATEWAY
    })?;

    let status =
        StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| HeaderValue::from_bytes(value.as_bytes()).ok());
    if !status.is_success() {
        warn!(endpoint, %status, "orbital service returned an error status");
        state.observability.record_upstream_error();
    }

    let body = resp.bytes().await.map_err(|e| {
        warn!(error = %e, endpoint, "failed to read orbital service response");
        state.observability.record_upstream_error();
        StatusCode::BAD_GATEWAY
    })?;

    let mut response = json_bytes_response(body, "no-store", content_type);
    *response.status_mut() = status;
    Ok(response)
}

fn json_bytes_response(
    body: Bytes,
    cache_control: &'static str,
    content_type: Option<HeaderValue>,
) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        content_type.unwrap_or_else(|| HeaderValue::from_static("application/json")),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    response
}
