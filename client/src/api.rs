use serde::de::DeserializeOwned;

use satwatch_shared::{
    PASSES_LIST_ENDPOINT, Pass, PassSearchParams, PassViewParams, PassesListResponse,
    SATELLITE_DATA_ENDPOINT, SATELLITES_LIST_ENDPOINT, SatelliteData, SatelliteQuery,
    TRAJECTORY_ENDPOINT, TrajectoryResponse,
};

use crate::config::api_url;

async fn get_json<T: DeserializeOwned>(
    endpoint: &str,
    query: Vec<(&'static str, String)>,
) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(&api_url(endpoint))
        .query(query)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<T>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Every satellite name the orbital service tracks.
pub async fn fetch_satellites_list() -> Result<Vec<String>, String> {
    get_json(SATELLITES_LIST_ENDPOINT, Vec::new()).await
}

pub async fn fetch_satellite_data(query: &SatelliteQuery) -> Result<SatelliteData, String> {
    get_json(SATELLITE_DATA_ENDPOINT, query.to_query_pairs()).await
}

/// Upcoming passes. An error payload in a 200 body is reported as an error.
pub async fn fetch_passes(params: &PassSearchParams) -> Result<Vec<Pass>, String> {
    get_json::<PassesListResponse>(PASSES_LIST_ENDPOINT, params.to_query_pairs())
        .await?
        .into_result()
}

pub async fn fetch_trajectory(params: &PassViewParams) -> Result<TrajectoryResponse, String> {
    get_json(TRAJECTORY_ENDPOINT, params.to_query_pairs()).await
}
