use std::ops::RangeInclusive;

use chrono::Utc;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use satwatch_shared::{
    LINK_TIME_FORMAT, Observer, PassSearchParams, SelectedSatelliteSet, parse_link_time,
    truncate_to_minute,
};

use crate::api;
use crate::app::{Failure, HEADING_STYLE, LoadState, Loading, load_once};
use crate::config::{DEFAULT_MIN_APOGEE, DEFAULT_MIN_ELEVATION, DEFAULT_OBSERVER_ALT_M, DEFAULT_PASS_DURATION_HOURS};
use crate::geolocate::locate;
use crate::route::{Route, navigate};
use crate::search::SearchField;
use crate::tables::PassesTable;
use crate::time_format::utc_minute;

const LAT_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LON_RANGE: RangeInclusive<f64> = -180.0..=180.0;
const ALT_RANGE_M: RangeInclusive<f64> = 0.0..=10_000.0;
const ANGLE_RANGE: RangeInclusive<f64> = 0.0..=90.0;
const DURATION_RANGE_H: RangeInclusive<u32> = 1..=240;

const FIELD_STYLE: &str = "display: flex; flex-direction: column; gap: 4px; font-size: 0.8rem;";
const INPUT_STYLE: &str = "padding: 6px 10px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; font-family: inherit;";

/// Raw text of the pass search form, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassFormInput {
    pub lat: String,
    pub lon: String,
    pub alt: String,
    pub start_time: String,
    pub duration: String,
    pub min_elevation: String,
    pub min_apogee: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn number_in(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    raw: &str,
    range: RangeInclusive<f64>,
) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && range.contains(&value) => value,
        Ok(_) => {
            errors.push(FieldError::new(
                field,
                format!("must be between {} and {}", range.start(), range.end()),
            ));
            0.0
        }
        Err(_) => {
            errors.push(FieldError::new(field, "must be a number"));
            0.0
        }
    }
}

/// Checks every field and returns either the search parameters or all problems found.
pub fn validate(
    input: &PassFormInput,
    satellites: &SelectedSatelliteSet,
) -> Result<PassSearchParams, Vec<FieldError>> {
    let mut errors = Vec::new();

    let lat = number_in(&mut errors, "lat", &input.lat, LAT_RANGE);
    let lon = number_in(&mut errors, "lon", &input.lon, LON_RANGE);
    let alt = number_in(&mut errors, "alt", &input.alt, ALT_RANGE_M);
    let min_elevation = number_in(&mut errors, "min_elevation", &input.min_elevation, ANGLE_RANGE);
    let min_apogee = number_in(&mut errors, "min_apogee", &input.min_apogee, ANGLE_RANGE);

    let start_time = parse_link_time(&input.start_time);
    if start_time.is_none() {
        errors.push(FieldError::new("start_time", "must be a date and time"));
    }

    let duration = match input.duration.trim().parse::<u32>() {
        Ok(hours) if DURATION_RANGE_H.contains(&hours) => hours,
        _ => {
            errors.push(FieldError::new(
                "duration",
                format!(
                    "must be a whole number of hours between {} and {}",
                    DURATION_RANGE_H.start(),
                    DURATION_RANGE_H.end()
                ),
            ));
            0
        }
    };

    if satellites.is_empty() {
        errors.push(FieldError::new("satellites", "pick at least one satellite"));
    }

    match start_time {
        Some(start) if errors.is_empty() => Ok(PassSearchParams {
            observer: Observer { lat, lon, alt },
            min_elevation,
            min_apogee,
            start_time: truncate_to_minute(start).naive_utc(),
            duration,
            satellites: satellites.clone(),
        }),
        _ => Err(errors),
    }
}

/// Title of the results page.
pub fn results_title(params: &PassSearchParams) -> String {
    format!(
        "Passes from {} UTC to {} UTC",
        utc_minute(params.start_utc()),
        utc_minute(params.end_utc())
    )
}

fn default_input() -> PassFormInput {
    PassFormInput {
        lat: String::new(),
        lon: String::new(),
        alt: DEFAULT_OBSERVER_ALT_M.to_string(),
        start_time: truncate_to_minute(Utc::now())
            .format(LINK_TIME_FORMAT)
            .to_string(),
        duration: DEFAULT_PASS_DURATION_HOURS.to_string(),
        min_elevation: DEFAULT_MIN_ELEVATION.to_string(),
        min_apogee: DEFAULT_MIN_APOGEE.to_string(),
    }
}

#[component]
fn Field(
    label: &'static str,
    name: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<Vec<FieldError>>,
    #[prop(optional)] kind: Option<&'static str>,
) -> impl IntoView {
    let message = move || {
        errors.with(|all| {
            all.iter()
                .find(|e| e.field == name)
                .map(|e| e.message.clone())
        })
    };
    view! {
        <label style=FIELD_STYLE>
            {label}
            <input
                type=kind.unwrap_or("text")
                name=name
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                style=INPUT_STYLE
            />
            <span style="color: #e0685b; min-height: 1em;">{message}</span>
        </label>
    }
}

/// `/passes` without parameters: observer, time range, thresholds and satellites.
#[component]
pub fn PassSearchForm() -> impl IntoView {
    let defaults = default_input();
    let lat = RwSignal::new(defaults.lat);
    let lon = RwSignal::new(defaults.lon);
    let alt = RwSignal::new(defaults.alt);
    let start_time = RwSignal::new(defaults.start_time);
    let duration = RwSignal::new(defaults.duration);
    let min_elevation = RwSignal::new(defaults.min_elevation);
    let min_apogee = RwSignal::new(defaults.min_apogee);
    let selected = RwSignal::new(SelectedSatelliteSet::new());
    let errors = RwSignal::new(Vec::<FieldError>::new());

    spawn_local(async move {
        let observer = locate().await;
        // Keep whatever the user typed while the position was pending.
        if lat.with_untracked(String::is_empty) {
            lat.set(observer.lat.to_string());
        }
        if lon.with_untracked(String::is_empty) {
            lon.set(observer.lon.to_string());
        }
    });

    let add_satellite = Callback::new(move |name: String| {
        selected.update(|set| {
            set.insert(name);
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = PassFormInput {
            lat: lat.get_untracked(),
            lon: lon.get_untracked(),
            alt: alt.get_untracked(),
            start_time: start_time.get_untracked(),
            duration: duration.get_untracked(),
            min_elevation: min_elevation.get_untracked(),
            min_apogee: min_apogee.get_untracked(),
        };
        match selected.with_untracked(|set| validate(&input, set)) {
            Ok(params) => navigate(&Route::Passes(Some(params))),
            Err(found) => errors.set(found),
        }
    };

    let satellite_error = move || {
        errors.with(|all| {
            all.iter()
                .find(|e| e.field == "satellites")
                .map(|e| e.message.clone())
        })
    };

    view! {
        <form
            method="get"
            action="/passes"
            on:submit=on_submit
            style="display: flex; flex-direction: column; gap: 12px; padding: 24px; max-width: 560px;"
        >
            <h2 style=HEADING_STYLE>"Pass search"</h2>
            <div style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px;">
                <Field label="Latitude, °" name="lat" value=lat errors=errors/>
                <Field label="Longitude, °" name="lon" value=lon errors=errors/>
                <Field label="Altitude, m" name="alt" value=alt errors=errors/>
                <Field label="Start, UTC" name="start_time" value=start_time errors=errors kind="datetime-local"/>
                <Field label="Duration, h" name="duration" value=duration errors=errors kind="number"/>
                <div></div>
                <Field label="Min elevation, °" name="min_elevation" value=min_elevation errors=errors/>
                <Field label="Min apogee, °" name="min_apogee" value=min_apogee errors=errors/>
            </div>
            <div style=FIELD_STYLE>
                "Satellites"
                <SearchField on_select=add_satellite placeholder="Add a satellite..." clear_on_select=true/>
                <ul style="list-style: none; margin: 0; padding: 0; display: flex; flex-wrap: wrap; gap: 6px;">
                    <For
                        each=move || selected.with(|set| set.iter().map(str::to_owned).collect::<Vec<_>>())
                        key=|name| name.clone()
                        children=move |name| {
                            let label = name.clone();
                            view! {
                                <li style="display: flex; align-items: center; gap: 6px; padding: 3px 8px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px;">
                                    {label}
                                    <button
                                        type="button"
                                        on:click=move |_| {
                                            selected.update(|set| {
                                                set.remove(&name);
                                            });
                                        }
                                        style="background: none; border: none; color: #8a8778; cursor: pointer;"
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
                <input type="hidden" name="satellites" prop:value=move || selected.with(SelectedSatelliteSet::joined)/>
                <span style="color: #e0685b; min-height: 1em;">{satellite_error}</span>
            </div>
            <button
                type="submit"
                style="align-self: flex-start; padding: 6px 16px; background: #f5c542; color: #13161f; border: none; border-radius: 6px; font-family: inherit; cursor: pointer;"
            >
                "Search"
            </button>
        </form>
    }
}

/// `/passes` with parameters: one fetch, then the table.
#[component]
pub fn PassesList(params: PassSearchParams) -> impl IntoView {
    let title = results_title(&params);
    let observer = params.observer;
    let state = load_once("passes", async move { api::fetch_passes(&params).await });

    move || match state.get() {
        LoadState::Loading => view! { <Loading/> }.into_any(),
        LoadState::Failed => view! { <Failure/> }.into_any(),
        LoadState::Ready(passes) => view! {
            <section style="padding: 16px;">
                <h2 style=HEADING_STYLE>{title.clone()}</h2>
                <PassesTable passes=passes show_name=true track_from=observer/>
            </section>
        }
        .into_any(),
    }
}
