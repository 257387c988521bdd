use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Pass, PassViewParams, SatelliteData, TrajectoryResponse};
use crate::samples::{GeodeticSample, LookAngleSample};
use crate::series::{IndexPolicy, SampleSeries};
use crate::visibility::VisibilityWindow;

/// Classical orbital elements as reported by the orbital service. Angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub inclination: f64,
    pub eccentricity: f64,
    pub period_minutes: f64,
    pub mean_motion: f64,
    pub argument_of_pericenter: f64,
    pub mean_anomaly: f64,
    pub raan: f64,
    pub epoch: DateTime<Utc>,
}

/// Everything the live single-satellite view needs, anchored at the moment the
/// response arrived. Series are built once and shared by every consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveTracking {
    pub satellite_name: String,
    pub norad_id: String,
    pub trajectory: Arc<SampleSeries<GeodeticSample>>,
    pub look_angles: Option<Arc<SampleSeries<LookAngleSample>>>,
    pub passes: Vec<Pass>,
    pub is_geostationary: bool,
    pub elements: OrbitalElements,
}

impl LiveTracking {
    /// The trajectory covers an hour either side of `loaded_at`; look angles cover
    /// the hour after it. Returns `None` when the trajectory is empty.
    pub fn from_response(
        data: SatelliteData,
        requested_name: &str,
        loaded_at: DateTime<Utc>,
    ) -> Option<Self> {
        let trajectory =
            SampleSeries::new(data.trajectory, loaded_at, IndexPolicy::Centered).map(Arc::new)?;
        let look_angles =
            SampleSeries::new(data.look_angles, loaded_at, IndexPolicy::Forward).map(Arc::new);
        let satellite_name = data
            .satellite_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| requested_name.to_owned());
        // Single-satellite pass lists omit the name; the pass links need it.
        let passes = data
            .passes
            .into_iter()
            .map(|mut pass| {
                if pass.satellite_name.is_empty() {
                    pass.satellite_name = satellite_name.clone();
                }
                pass
            })
            .collect();

        Some(Self {
            satellite_name,
            norad_id: data.norad_id,
            trajectory,
            look_angles,
            passes,
            is_geostationary: data.is_geostationary,
            elements: data.elements,
        })
    }

    /// Geostationary satellites have no meaningful pass list.
    pub fn shows_passes(&self) -> bool {
        !self.is_geostationary
    }
}

/// Everything the pass view needs: the visible window and the trajectory across it.
#[derive(Debug, Clone, PartialEq)]
pub struct PassPlayback {
    pub params: PassViewParams,
    pub window: VisibilityWindow,
    pub trajectory: Arc<SampleSeries<GeodeticSample>>,
}

impl PassPlayback {
    /// Returns `None` for an inverted window or an empty trajectory.
    pub fn from_response(params: PassViewParams, response: TrajectoryResponse) -> Option<Self> {
        let window = VisibilityWindow::new(params.start_time, params.end_time)?;
        let trajectory =
            SampleSeries::new(response.trajectory, params.start_time, IndexPolicy::Forward)
                .map(Arc::new)?;
        Some(Self {
            params,
            window,
            trajectory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Observer;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn geodetic(n: usize) -> Vec<GeodeticSample> {
        (0..n)
            .map(|i| GeodeticSample {
                lat: i as f64 / 100.0,
                lon: i as f64 / 50.0,
                alt: 420.0,
            })
            .collect()
    }

    fn elements() -> OrbitalElements {
        OrbitalElements {
            inclination: 98.7,
            eccentricity: 0.0013,
            period_minutes: 102.1,
            mean_motion: 14.1,
            argument_of_pericenter: 10.0,
            mean_anomaly: 20.0,
            raan: 30.0,
            epoch: t0(),
        }
    }

    fn data(trajectory: usize, look_angles: usize) -> SatelliteData {
        SatelliteData {
            satellite_name: None,
            norad_id: "33591".into(),
            trajectory: geodetic(trajectory),
            look_angles: vec![LookAngleSample { az: 0.0, el: 0.0 }; look_angles],
            passes: Vec::new(),
            is_geostationary: false,
            elements: elements(),
        }
    }

    #[test]
    fn live_trajectory_is_centered_and_look_angles_forward() {
        let live = LiveTracking::from_response(data(7200, 3600), "NOAA 19", t0()).unwrap();
        assert_eq!(live.trajectory.index_at(t0()), 3600);
        let look = live.look_angles.as_ref().unwrap();
        assert_eq!(look.index_at(t0()), 0);
        assert_eq!(look.index_at(t0() + Duration::seconds(30)), 30);
    }

    #[test]
    fn live_name_falls_back_to_request() {
        let live = LiveTracking::from_response(data(10, 0), "NOAA 19", t0()).unwrap();
        assert_eq!(live.satellite_name, "NOAA 19");
        assert!(live.look_angles.is_none());

        let mut named = data(10, 0);
        named.satellite_name = Some("NOAA 19 (REPORTED)".into());
        let live = LiveTracking::from_response(named, "NOAA 19", t0()).unwrap();
        assert_eq!(live.satellite_name, "NOAA 19 (REPORTED)");
    }

    #[test]
    fn unnamed_passes_take_the_satellite_name() {
        let pass = |name: &str| Pass {
            satellite_name: name.into(),
            rise_time: t0(),
            rise_azimuth: 10.0,
            apogee_time: t0() + Duration::seconds(300),
            apogee_azimuth: 90.0,
            apogee_elevation: 45.0,
            fall_time: t0() + Duration::seconds(600),
            fall_azimuth: 170.0,
        };
        let mut with_passes = data(10, 0);
        with_passes.passes = vec![pass(""), pass("NOAA 19 DEB")];
        let live = LiveTracking::from_response(with_passes, "NOAA 19", t0()).unwrap();
        assert_eq!(live.passes[0].satellite_name, "NOAA 19");
        assert_eq!(live.passes[1].satellite_name, "NOAA 19 DEB");
    }

    #[test]
    fn live_without_trajectory_is_rejected() {
        assert!(LiveTracking::from_response(data(0, 10), "X", t0()).is_none());
    }

    #[test]
    fn geostationary_hides_passes() {
        let mut geo = data(10, 10);
        geo.is_geostationary = true;
        let live = LiveTracking::from_response(geo, "GOES 16", t0()).unwrap();
        assert!(!live.shows_passes());
    }

    #[test]
    fn playback_anchors_at_window_start() {
        let params = PassViewParams {
            satellite: "NOAA 19".into(),
            observer: Observer::default(),
            start_time: t0(),
            end_time: t0() + Duration::seconds(300),
        };
        let playback = PassPlayback::from_response(
            params.clone(),
            TrajectoryResponse {
                trajectory: geodetic(300),
            },
        )
        .unwrap();
        assert_eq!(playback.trajectory.index_at(t0()), 0);
        assert_eq!(playback.window.end(), t0() + Duration::seconds(300));

        let inverted = PassViewParams {
            end_time: t0(),
            ..params
        };
        assert!(
            PassPlayback::from_response(
                inverted,
                TrajectoryResponse {
                    trajectory: geodetic(1)
                }
            )
            .is_none()
        );
    }
}
