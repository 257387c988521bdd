use std::sync::Arc;

use chrono::Utc;
use leptos::prelude::*;

use satwatch_shared::{LiveTracking, Observer, SatelliteQuery};

use crate::api;
use crate::app::{Failure, HEADING_STYLE, LoadState, Loading, MAIN_STYLE, PAGE_STYLE, SIDE_STYLE, load_once};
use crate::geolocate::locate;
use crate::globe::{FrameFn, Globe, GlobeFrame, GlobeScene};
use crate::tables::{
    ClockRows, CoordsRows, LookAngleRows, OrbitalElementsRows, PassesTable, Row, SatelliteTable,
};
use crate::widgets::{live_coords_signal, live_look_angles_signal, live_marker};

async fn load(name: String) -> Result<(Arc<LiveTracking>, Observer), String> {
    let observer = locate().await;
    let query = SatelliteQuery {
        satellite_name: name.clone(),
        observer,
    };
    let data = api::fetch_satellite_data(&query).await?;
    LiveTracking::from_response(data, &name, Utc::now())
        .map(|tracking| (Arc::new(tracking), observer))
        .ok_or_else(|| format!("empty trajectory for {name}"))
}

/// Live tracking page for one satellite.
#[component]
pub fn SatellitePage(name: String) -> impl IntoView {
    let state = load_once("satellite data", load(name));

    move || match state.get() {
        LoadState::Loading => view! { <Loading/> }.into_any(),
        LoadState::Failed => view! { <Failure/> }.into_any(),
        LoadState::Ready((tracking, observer)) => {
            view! { <LiveView tracking=tracking observer=observer/> }.into_any()
        }
    }
}

#[component]
fn LiveView(tracking: Arc<LiveTracking>, observer: Observer) -> impl IntoView {
    let trajectory = Arc::clone(&tracking.trajectory);
    let scene = Arc::new(GlobeScene {
        trajectory: Arc::clone(&trajectory),
        observer,
        billboards: Vec::new(),
    });
    let frame: FrameFn = {
        let trajectory = Arc::clone(&trajectory);
        Arc::new(move |now| GlobeFrame {
            marker: live_marker(&trajectory, now),
            emphasis: None,
        })
    };

    let coords = live_coords_signal(trajectory);
    let look_angles = tracking
        .look_angles
        .as_ref()
        .map(|series| live_look_angles_signal(Arc::clone(series)));

    let norad_id = tracking.norad_id.clone();
    let passes = tracking.shows_passes().then(|| {
        let passes = tracking.passes.clone();
        if passes.is_empty() {
            view! { <p>"No passes in the next 24 hours"</p> }.into_any()
        } else {
            view! { <PassesTable passes=passes track_from=observer/> }.into_any()
        }
    });

    view! {
        <div style=PAGE_STYLE>
            <div style=MAIN_STYLE>
                <Globe scene=scene frame=frame/>
            </div>
            <div style=SIDE_STYLE>
                <SatelliteTable title=tracking.satellite_name.clone()>
                    <Row label="NORAD ID" value=Signal::derive(move || norad_id.clone())/>
                    <ClockRows/>
                    <CoordsRows readout=coords/>
                    {look_angles.map(|readout| view! { <LookAngleRows readout=readout/> })}
                    <OrbitalElementsRows elements=tracking.elements.clone()/>
                </SatelliteTable>
            </div>
            {passes
                .map(|table| {
                    view! {
                        <section style="flex: 1 1 100%;">
                            <h2 style=HEADING_STYLE>"Upcoming passes"</h2>
                            {table}
                        </section>
                    }
                })}
        </div>
    }
}
