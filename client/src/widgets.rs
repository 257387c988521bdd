use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use satwatch_shared::{
    GeodeticSample, LookAngleSample, PassPlayback, SampleSeries, VisibilityState, VisibilityWindow,
};

use crate::globe::BillboardSlot;
use crate::ticker::{Updatable, register_with_view, unregister_from_view};
use crate::time_format::format_hms;

/// Moving satellite marker on the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerState {
    Hidden,
    At(GeodeticSample),
}

impl MarkerState {
    pub fn sample(&self) -> Option<GeodeticSample> {
        match self {
            Self::Hidden => None,
            Self::At(sample) => Some(*sample),
        }
    }
}

/// Live view: outside the series the readout pins to the nearest end.
pub fn live_sample<T: Copy>(series: &SampleSeries<T>, now: DateTime<Utc>) -> T {
    *series.clamped_at(now)
}

pub fn live_marker(series: &SampleSeries<GeodeticSample>, now: DateTime<Utc>) -> MarkerState {
    MarkerState::At(live_sample(series, now))
}

/// Pass view: the marker exists only while the window is open.
pub fn pass_marker(playback: &PassPlayback, now: DateTime<Utc>) -> MarkerState {
    if playback.window.state_at(now) != VisibilityState::Visible {
        return MarkerState::Hidden;
    }
    playback
        .trajectory
        .sample_at(now)
        .copied()
        .map_or(MarkerState::Hidden, MarkerState::At)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassStatus {
    StartsIn(i64),
    InView,
    Over,
}

impl PassStatus {
    pub fn label(&self) -> String {
        match self {
            Self::StartsIn(secs) => format!("Starts in {}", format_hms(*secs)),
            Self::InView => "In view".to_owned(),
            Self::Over => "Pass over".to_owned(),
        }
    }
}

pub fn pass_status(window: &VisibilityWindow, now: DateTime<Utc>) -> PassStatus {
    match window.state_at(now) {
        VisibilityState::Before => PassStatus::StartsIn(window.seconds_until_start(now)),
        VisibilityState::Visible => PassStatus::InView,
        VisibilityState::After => PassStatus::Over,
    }
}

/// Which window boundary the globe highlights: the next one to be crossed.
pub fn billboard_emphasis(window: &VisibilityWindow, now: DateTime<Utc>) -> Option<BillboardSlot> {
    match window.state_at(now) {
        VisibilityState::Before => Some(BillboardSlot::Start),
        VisibilityState::Visible => Some(BillboardSlot::End),
        VisibilityState::After => None,
    }
}

pub fn coords_readout(sample: Option<GeodeticSample>) -> [String; 3] {
    match sample {
        Some(s) => [
            format!("{:.3} °", s.lat),
            format!("{:.3} °", s.lon),
            format!("{:.3} km", s.alt),
        ],
        None => [String::new(), String::new(), String::new()],
    }
}

pub fn look_angle_readout(sample: LookAngleSample) -> [String; 2] {
    [format!("{:.3} °", sample.az), format!("{:.3} °", sample.el)]
}

/// Updatable that recomputes a value from `now` and pushes it into a sink.
pub struct Derived<T> {
    derive: Box<dyn Fn(DateTime<Utc>) -> T>,
    sink: Box<dyn Fn(T)>,
}

impl<T> Derived<T> {
    pub fn new(
        derive: impl Fn(DateTime<Utc>) -> T + 'static,
        sink: impl Fn(T) + 'static,
    ) -> Self {
        Self {
            derive: Box::new(derive),
            sink: Box::new(sink),
        }
    }
}

impl<T> Updatable for Derived<T> {
    fn on_tick(&self, now: DateTime<Utc>) {
        (self.sink)((self.derive)(now));
    }
}

/// Signal holding `derive(now)`, refreshed by the current view's ticker until the
/// owning component unmounts.
pub fn tick_signal<T>(derive: impl Fn(DateTime<Utc>) -> T + 'static) -> ReadSignal<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    let signal = RwSignal::new(derive(Utc::now()));
    let listener = Derived::new(derive, move |value: T| {
        if signal.with_untracked(|current| *current != value) {
            signal.set(value);
        }
    });
    if let Some(id) = register_with_view(Rc::new(listener)) {
        on_cleanup(move || unregister_from_view(id));
    }
    signal.read_only()
}

/// Coordinate readout fed from a shared live series.
pub fn live_coords_signal(series: Arc<SampleSeries<GeodeticSample>>) -> ReadSignal<[String; 3]> {
    tick_signal(move |now| coords_readout(Some(live_sample(&series, now))))
}

pub fn live_look_angles_signal(series: Arc<SampleSeries<LookAngleSample>>) -> ReadSignal<[String; 2]> {
    tick_signal(move |now| look_angle_readout(live_sample(&series, now)))
}

pub fn pass_coords_signal(playback: Arc<PassPlayback>) -> ReadSignal<[String; 3]> {
    tick_signal(move |now| coords_readout(pass_marker(&playback, now).sample()))
}

pub fn pass_status_signal(playback: Arc<PassPlayback>) -> ReadSignal<PassStatus> {
    tick_signal(move |now| pass_status(&playback.window, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::TickScheduler;
    use chrono::{Duration, TimeZone};
    use satwatch_shared::{IndexPolicy, Observer, PassViewParams, TrajectoryResponse};
    use std::cell::RefCell;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn samples(n: usize) -> Vec<GeodeticSample> {
        (0..n)
            .map(|i| GeodeticSample {
                lat: i as f64,
                lon: -(i as f64),
                alt: 800.0,
            })
            .collect()
    }

    fn playback() -> PassPlayback {
        PassPlayback::from_response(
            PassViewParams {
                satellite: "NOAA 19".into(),
                observer: Observer::default(),
                start_time: t0(),
                end_time: t0() + Duration::seconds(300),
            },
            TrajectoryResponse {
                trajectory: samples(300),
            },
        )
        .unwrap()
    }

    fn marker_log() -> (Rc<RefCell<Vec<MarkerState>>>, impl Fn(MarkerState) + 'static) {
        let log: Rc<RefCell<Vec<MarkerState>>> = Rc::default();
        let sink_log = Rc::clone(&log);
        (log, move |state| sink_log.borrow_mut().push(state))
    }

    #[test]
    fn live_marker_follows_wall_clock_from_the_midpoint() {
        let series = Arc::new(SampleSeries::new(samples(7200), t0(), IndexPolicy::Centered).unwrap());
        let ticker = TickScheduler::new();
        let (log, sink) = marker_log();
        let shared = Arc::clone(&series);
        ticker.register(Rc::new(Derived::new(move |now| live_marker(&shared, now), sink)));

        ticker.tick(t0());
        ticker.tick(t0() + Duration::seconds(10));

        let log = log.borrow();
        assert_eq!(log[0], MarkerState::At(series.samples()[3600]));
        assert_eq!(log[1], MarkerState::At(series.samples()[3610]));
    }

    #[test]
    fn live_marker_clamps_past_the_series() {
        let series = SampleSeries::new(samples(7200), t0(), IndexPolicy::Centered).unwrap();
        let late = t0() + Duration::hours(2);
        assert_eq!(live_marker(&series, late), MarkerState::At(series.samples()[7199]));
    }

    #[test]
    fn pass_marker_only_inside_the_window() {
        let playback = Arc::new(playback());
        let ticker = TickScheduler::new();
        let (log, sink) = marker_log();
        let shared = Arc::clone(&playback);
        ticker.register(Rc::new(Derived::new(move |now| pass_marker(&shared, now), sink)));

        ticker.tick(t0() - Duration::seconds(5));
        ticker.tick(t0() + Duration::seconds(150));
        ticker.tick(t0() + Duration::seconds(305));

        let log = log.borrow();
        assert_eq!(log[0], MarkerState::Hidden);
        assert_eq!(log[1], MarkerState::At(playback.trajectory.samples()[150]));
        assert_eq!(log[2], MarkerState::Hidden);
    }

    #[test]
    fn widgets_on_one_ticker_agree_on_the_index() {
        let playback = Arc::new(playback());
        let ticker = TickScheduler::new();
        let (markers, sink) = marker_log();
        let coords: Rc<RefCell<Vec<[String; 3]>>> = Rc::default();

        let for_marker = Arc::clone(&playback);
        ticker.register(Rc::new(Derived::new(move |now| pass_marker(&for_marker, now), sink)));
        let for_coords = Arc::clone(&playback);
        let coords_sink = Rc::clone(&coords);
        ticker.register(Rc::new(Derived::new(
            move |now| coords_readout(pass_marker(&for_coords, now).sample()),
            move |rows| coords_sink.borrow_mut().push(rows),
        )));

        ticker.tick(t0() + Duration::milliseconds(42_900));

        let marker = markers.borrow()[0].sample().unwrap();
        assert_eq!(marker.lat, 42.0);
        assert_eq!(coords.borrow()[0][0], "42.000 °");
    }

    #[test]
    fn pass_status_walks_through_the_window() {
        let window = playback().window;
        assert_eq!(
            pass_status(&window, t0() - Duration::seconds(3725)),
            PassStatus::StartsIn(3725)
        );
        assert_eq!(
            pass_status(&window, t0() - Duration::seconds(3725)).label(),
            "Starts in 01:02:05"
        );
        assert_eq!(pass_status(&window, t0()), PassStatus::InView);
        assert_eq!(pass_status(&window, t0() + Duration::seconds(300)), PassStatus::Over);
    }

    #[test]
    fn billboards_highlight_the_next_boundary() {
        let window = playback().window;
        assert_eq!(
            billboard_emphasis(&window, t0() - Duration::seconds(1)),
            Some(BillboardSlot::Start)
        );
        assert_eq!(billboard_emphasis(&window, t0()), Some(BillboardSlot::End));
        assert_eq!(
            billboard_emphasis(&window, t0() + Duration::seconds(301)),
            None
        );
    }

    #[test]
    fn hidden_marker_blanks_coordinates() {
        assert_eq!(coords_readout(None), [String::new(), String::new(), String::new()]);
        let rows = coords_readout(Some(GeodeticSample {
            lat: 55.75123,
            lon: -37.6,
            alt: 420.1,
        }));
        assert_eq!(rows, ["55.751 °", "-37.600 °", "420.100 km"]);
        assert_eq!(
            look_angle_readout(LookAngleSample { az: 10.0, el: -3.25 }),
            ["10.000 °", "-3.250 °"]
        );
    }
}
