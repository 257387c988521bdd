use std::sync::Arc;

use leptos::prelude::*;

use satwatch_shared::{PassPlayback, PassViewParams};

use crate::api;
use crate::app::{Failure, LoadState, Loading, MAIN_STYLE, PAGE_STYLE, SIDE_STYLE, load_once};
use crate::globe::{Billboard, BillboardSlot, FrameFn, Globe, GlobeFrame, GlobeScene};
use crate::tables::{ClockRows, CoordsRows, Row, SatelliteTable};
use crate::time_format::local_clock;
use crate::widgets::{billboard_emphasis, pass_coords_signal, pass_marker, pass_status_signal};

async fn load(params: PassViewParams) -> Result<Arc<PassPlayback>, String> {
    let response = api::fetch_trajectory(&params).await?;
    let satellite = params.satellite.clone();
    PassPlayback::from_response(params, response)
        .map(Arc::new)
        .ok_or_else(|| format!("no pass trajectory for {satellite}"))
}

/// Static part of the pass scene: the visible arc and its two end billboards.
pub fn pass_scene(playback: &PassPlayback) -> GlobeScene {
    let trajectory = &playback.trajectory;
    let billboards = vec![
        Billboard {
            slot: BillboardSlot::Start,
            label: "Pass start".into(),
            time: local_clock(playback.window.start()),
            at: *trajectory.first(),
        },
        Billboard {
            slot: BillboardSlot::End,
            label: "Pass end".into(),
            time: local_clock(playback.window.end()),
            at: *trajectory.last(),
        },
    ];
    GlobeScene {
        trajectory: Arc::clone(trajectory),
        observer: playback.params.observer,
        billboards,
    }
}

/// `/pass`: replay of one pass against the wall clock.
#[component]
pub fn PassView(params: PassViewParams) -> impl IntoView {
    let state = load_once("pass trajectory", load(params));

    move || match state.get() {
        LoadState::Loading => view! { <Loading/> }.into_any(),
        LoadState::Failed => view! { <Failure/> }.into_any(),
        LoadState::Ready(playback) => view! { <Playback playback=playback/> }.into_any(),
    }
}

#[component]
fn Playback(playback: Arc<PassPlayback>) -> impl IntoView {
    let scene = Arc::new(pass_scene(&playback));
    let frame: FrameFn = {
        let playback = Arc::clone(&playback);
        Arc::new(move |now| GlobeFrame {
            marker: pass_marker(&playback, now),
            emphasis: billboard_emphasis(&playback.window, now),
        })
    };

    let status = pass_status_signal(Arc::clone(&playback));
    let coords = pass_coords_signal(Arc::clone(&playback));

    view! {
        <div style=PAGE_STYLE>
            <div style=MAIN_STYLE>
                <Globe scene=scene frame=frame/>
            </div>
            <div style=SIDE_STYLE>
                <SatelliteTable title=playback.params.satellite.clone()>
                    <ClockRows/>
                    <Row label="Status" value=Signal::derive(move || status.with(|s| s.label()))/>
                    <CoordsRows readout=coords/>
                </SatelliteTable>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use satwatch_shared::{GeodeticSample, Observer, TrajectoryResponse};

    #[test]
    fn scene_pins_billboards_to_the_arc_ends() {
        let params = PassViewParams {
            satellite: "NOAA 19".into(),
            observer: Observer {
                lat: 55.0,
                lon: 37.0,
                alt: 0.0,
            },
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 10, 0).unwrap(),
        };
        let trajectory = (0..600)
            .map(|i| GeodeticSample {
                lat: i as f64 / 10.0,
                lon: 20.0,
                alt: 850.0,
            })
            .collect();
        let playback =
            PassPlayback::from_response(params, TrajectoryResponse { trajectory }).unwrap();

        let scene = pass_scene(&playback);
        assert_eq!(scene.billboards.len(), 2);
        assert_eq!(scene.billboards[0].slot, BillboardSlot::Start);
        assert_eq!(scene.billboards[0].at.lat, 0.0);
        assert_eq!(scene.billboards[1].slot, BillboardSlot::End);
        assert_eq!(scene.billboards[1].at.lat, 59.9);
        assert_eq!(scene.observer, playback.params.observer);
        assert_eq!(scene.trajectory.len(), 600);
    }

    #[test]
    fn scene_shares_the_playback_series() {
        let params = PassViewParams {
            satellite: "NOAA 19".into(),
            observer: Observer::default(),
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap(),
        };
        let trajectory = vec![
            GeodeticSample {
                lat: 1.0,
                lon: 2.0,
                alt: 850.0,
            };
            300
        ];
        let playback =
            PassPlayback::from_response(params, TrajectoryResponse { trajectory }).unwrap();

        let scene = pass_scene(&playback);
        assert!(Arc::ptr_eq(&scene.trajectory, &playback.trajectory));
        assert_eq!(Arc::strong_count(&playback.trajectory), 2);
    }
}
