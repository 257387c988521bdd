use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::samples::{GeodeticSample, LookAngleSample};
use crate::selection::SelectedSatelliteSet;
use crate::tracking::OrbitalElements;

/// Minute-precision UTC timestamp used in page links and pass-search parameters.
pub const LINK_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Orbital service endpoints, relative to `/api/`.
pub const SATELLITES_LIST_ENDPOINT: &str = "get-satellites-list";
pub const SATELLITE_DATA_ENDPOINT: &str = "get-satellite-data";
pub const PASSES_LIST_ENDPOINT: &str = "get-passes-list";
pub const TRAJECTORY_ENDPOINT: &str = "get-trajectory";

/// Pass search horizon used when the form is first shown, in hours.
pub const DEFAULT_PASS_DURATION_HOURS: u32 = 24;

/// Ground observer. Altitude is meters above sea level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl Observer {
    fn push_query_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        pairs.push(("lat", self.lat.to_string()));
        pairs.push(("lon", self.lon.to_string()));
        pairs.push(("alt", self.alt.to_string()));
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            lat: parse_param(lookup, "lat")?,
            lon: parse_param(lookup, "lon")?,
            alt: parse_param(lookup, "alt")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    #[serde(default)]
    pub satellite_name: String,
    pub rise_time: DateTime<Utc>,
    pub rise_azimuth: f64,
    pub apogee_time: DateTime<Utc>,
    pub apogee_azimuth: f64,
    pub apogee_elevation: f64,
    pub fall_time: DateTime<Utc>,
    pub fall_azimuth: f64,
}

/// Body of `GET /api/get-satellite-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteData {
    #[serde(default)]
    pub satellite_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub norad_id: String,
    pub trajectory: Vec<GeodeticSample>,
    #[serde(default)]
    pub look_angles: Vec<LookAngleSample>,
    #[serde(default)]
    pub passes: Vec<Pass>,
    #[serde(default)]
    pub is_geostationary: bool,
    #[serde(flatten)]
    pub elements: OrbitalElements,
}

/// Body of `GET /api/get-trajectory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryResponse {
    pub trajectory: Vec<GeodeticSample>,
}

/// Body of `GET /api/get-passes-list`: either the passes or whatever error payload the
/// orbital service produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PassesListResponse {
    Passes(Vec<Pass>),
    Failure(serde_json::Value),
}

impl PassesListResponse {
    pub fn into_result(self) -> Result<Vec<Pass>, String> {
        match self {
            Self::Passes(passes) => Ok(passes),
            Self::Failure(payload) => Err(format!("server error: {payload}")),
        }
    }
}

/// Query of `GET /api/get-satellite-data`.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteQuery {
    pub satellite_name: String,
    pub observer: Observer,
}

impl SatelliteQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("satellite_name", self.satellite_name.clone())];
        self.observer.push_query_pairs(&mut pairs);
        pairs
    }
}

/// Parameters of the pass search (`/passes?...` page and `GET /api/get-passes-list`).
#[derive(Debug, Clone, PartialEq)]
pub struct PassSearchParams {
    pub observer: Observer,
    pub min_elevation: f64,
    pub min_apogee: f64,
    /// UTC, minute precision.
    pub start_time: NaiveDateTime,
    /// Hours.
    pub duration: u32,
    pub satellites: SelectedSatelliteSet,
}

impl PassSearchParams {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(8);
        self.observer.push_query_pairs(&mut pairs);
        pairs.push(("min_elevation", self.min_elevation.to_string()));
        pairs.push(("min_apogee", self.min_apogee.to_string()));
        pairs.push((
            "start_time",
            self.start_time.format(LINK_TIME_FORMAT).to_string(),
        ));
        pairs.push(("duration", self.duration.to_string()));
        pairs.push(("satellites", self.satellites.joined()));
        pairs
    }

    /// Returns `None` unless every parameter is present and parses.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            observer: Observer::from_lookup(&lookup)?,
            min_elevation: parse_param(&lookup, "min_elevation")?,
            min_apogee: parse_param(&lookup, "min_apogee")?,
            start_time: parse_link_time(&lookup("start_time")?)?.naive_utc(),
            duration: parse_param::<u32>(&lookup, "duration").filter(|d| *d > 0)?,
            satellites: SelectedSatelliteSet::from_joined(&lookup("satellites")?),
        })
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start_time.and_utc()
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.start_utc() + Duration::hours(i64::from(self.duration))
    }
}

/// Parameters of the pass view (`/pass?...` page and `GET /api/get-trajectory`).
#[derive(Debug, Clone, PartialEq)]
pub struct PassViewParams {
    pub satellite: String,
    pub observer: Observer,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl PassViewParams {
    /// Link target for a row of a passes table. Rise and fall are cut to the minute.
    pub fn for_pass(pass: &Pass, observer: Observer) -> Self {
        Self {
            satellite: pass.satellite_name.clone(),
            observer,
            start_time: truncate_to_minute(pass.rise_time),
            end_time: truncate_to_minute(pass.fall_time),
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("satellite", self.satellite.clone())];
        self.observer.push_query_pairs(&mut pairs);
        pairs.push((
            "start_time",
            self.start_time.format(LINK_TIME_FORMAT).to_string(),
        ));
        pairs.push(("end_time", self.end_time.format(LINK_TIME_FORMAT).to_string()));
        pairs
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            satellite: lookup("satellite").filter(|s| !s.trim().is_empty())?,
            observer: Observer::from_lookup(&lookup)?,
            start_time: parse_link_time(&lookup("start_time")?)?,
            end_time: parse_link_time(&lookup("end_time")?)?,
        })
    }
}

/// Parses a UTC link timestamp. Accepts minute precision, second precision, or RFC 3339.
pub fn parse_link_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, LINK_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

pub fn truncate_to_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    let secs = t.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(60), 0).unwrap_or(t)
}

fn parse_param<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    lookup(key)?.trim().parse().ok()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected string or number for norad_id, got {other}"
        ))),
    }
}
