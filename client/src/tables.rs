use chrono::{Local, TimeZone};
use leptos::prelude::*;

use satwatch_shared::{Observer, OrbitalElements, Pass, PassViewParams};

use crate::route::Route;
use crate::time_format::{epoch, local_clock, pass_date, utc_clock};
use crate::widgets::tick_signal;

const CELL_STYLE: &str = "border: 1px solid #282c3e; padding: 4px 8px;";
const TABLE_STYLE: &str = "border-collapse: collapse; font-family: 'JetBrains Mono', monospace; font-size: 0.8rem; color: #e2e0d8;";

pub fn orbital_element_rows(elements: &OrbitalElements) -> Vec<(&'static str, String)> {
    vec![
        ("Inclination", format!("{:.5} °", elements.inclination)),
        ("Eccentricity", format!("{:.5}", elements.eccentricity)),
        ("Period", format!("{:.2} min", elements.period_minutes)),
        ("Mean motion", format!("{:.5} °/s", elements.mean_motion)),
        (
            "Argument of pericenter",
            format!("{:.5} °", elements.argument_of_pericenter),
        ),
        ("Mean anomaly", format!("{:.5} °", elements.mean_anomaly)),
        ("RAAN", format!("{:.5} °", elements.raan)),
        ("Epoch", epoch(elements.epoch)),
    ]
}

/// Rise date, rise az, apogee time, apogee az, apogee el, fall time, fall az.
pub fn pass_cells<Tz: TimeZone>(pass: &Pass, tz: &Tz) -> [String; 7]
where
    Tz::Offset: std::fmt::Display,
{
    let time = |t: chrono::DateTime<chrono::Utc>| t.with_timezone(tz).format("%H:%M:%S").to_string();
    [
        pass_date(pass.rise_time, tz),
        format!("{:.2}", pass.rise_azimuth),
        time(pass.apogee_time),
        format!("{:.2}", pass.apogee_azimuth),
        format!("{:.2}", pass.apogee_elevation),
        time(pass.fall_time),
        format!("{:.2}", pass.fall_azimuth),
    ]
}

#[component]
pub fn Row(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <tr>
            <td style=CELL_STYLE>{label}</td>
            <td style=CELL_STYLE>{move || value.get()}</td>
        </tr>
    }
}

/// UTC and local clocks, refreshed every tick.
#[component]
pub fn ClockRows() -> impl IntoView {
    let utc = tick_signal(utc_clock);
    let local = tick_signal(local_clock);
    view! {
        <Row label="Time, UTC" value=utc/>
        <Row label="Local time" value=local/>
    }
}

#[component]
pub fn CoordsRows(readout: ReadSignal<[String; 3]>) -> impl IntoView {
    view! {
        <Row label="Latitude" value=Signal::derive(move || readout.with(|r| r[0].clone()))/>
        <Row label="Longitude" value=Signal::derive(move || readout.with(|r| r[1].clone()))/>
        <Row label="Altitude" value=Signal::derive(move || readout.with(|r| r[2].clone()))/>
    }
}

#[component]
pub fn LookAngleRows(readout: ReadSignal<[String; 2]>) -> impl IntoView {
    view! {
        <Row label="Azimuth" value=Signal::derive(move || readout.with(|r| r[0].clone()))/>
        <Row label="Elevation" value=Signal::derive(move || readout.with(|r| r[1].clone()))/>
    }
}

#[component]
pub fn OrbitalElementsRows(elements: OrbitalElements) -> impl IntoView {
    orbital_element_rows(&elements)
        .into_iter()
        .map(|(label, value)| {
            view! {
                <tr>
                    <td style=CELL_STYLE>{label}</td>
                    <td style=CELL_STYLE>{value}</td>
                </tr>
            }
        })
        .collect_view()
}

/// Side table framing a set of rows under the satellite name.
#[component]
pub fn SatelliteTable(title: String, children: Children) -> impl IntoView {
    view! {
        <table style=TABLE_STYLE>
            <thead>
                <tr>
                    <th colspan="2" style=CELL_STYLE>{title}</th>
                </tr>
            </thead>
            <tbody>{children()}</tbody>
        </table>
    }
}

/// Pass list. With `track_from` set, every row links to the pass view for that observer.
#[component]
pub fn PassesTable(
    passes: Vec<Pass>,
    #[prop(optional)] show_name: bool,
    #[prop(optional)] track_from: Option<Observer>,
) -> impl IntoView {
    let rows = passes
        .into_iter()
        .map(|pass| {
            let cells = pass_cells(&pass, &Local);
            let track = track_from.map(|observer| {
                let href = Route::Pass(PassViewParams::for_pass(&pass, observer)).href();
                view! {
                    <td style=CELL_STYLE>
                        <a href=href style="color: #f5c542;">"Track"</a>
                    </td>
                }
            });
            let name = show_name.then(|| view! { <td style=CELL_STYLE>{pass.satellite_name.clone()}</td> });
            view! {
                <tr>
                    {name}
                    {cells.into_iter().map(|cell| view! { <td style=CELL_STYLE>{cell}</td> }).collect_view()}
                    {track}
                </tr>
            }
        })
        .collect_view();

    view! {
        <table style=TABLE_STYLE>
            <thead>
                <tr>
                    {show_name.then(|| view! { <th rowspan="2" style=CELL_STYLE>"Satellite"</th> })}
                    <th colspan="2" style=CELL_STYLE>"Rise"</th>
                    <th colspan="3" style=CELL_STYLE>"Apogee"</th>
                    <th colspan="2" style=CELL_STYLE>"Set"</th>
                    {track_from.map(|_| view! { <th rowspan="2" style=CELL_STYLE></th> })}
                </tr>
                <tr>
                    <th style=CELL_STYLE>"Date, local time"</th>
                    <th style=CELL_STYLE>"Az"</th>
                    <th style=CELL_STYLE>"Local time"</th>
                    <th style=CELL_STYLE>"Az"</th>
                    <th style=CELL_STYLE>"El"</th>
                    <th style=CELL_STYLE>"Local time"</th>
                    <th style=CELL_STYLE>"Az"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn orbital_elements_use_fixed_precision() {
        let elements = OrbitalElements {
            inclination: 98.7123456,
            eccentricity: 0.0013,
            period_minutes: 102.127,
            mean_motion: 14.1,
            argument_of_pericenter: 10.0,
            mean_anomaly: 20.0,
            raan: 30.0,
            epoch: Utc.with_ymd_and_hms(2024, 5, 1, 21, 0, 5).unwrap(),
        };
        let rows = orbital_element_rows(&elements);
        assert_eq!(rows[0], ("Inclination", "98.71235 °".to_string()));
        assert_eq!(rows[1].1, "0.00130");
        assert_eq!(rows[2].1, "102.13 min");
        assert_eq!(rows[7].1, "01-05-2024 21:00:05 UTC");
    }

    #[test]
    fn pass_cells_format_times_and_angles() {
        let pass = Pass {
            satellite_name: "NOAA 19".into(),
            rise_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 3, 41).unwrap(),
            rise_azimuth: 200.127,
            apogee_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 8, 20).unwrap(),
            apogee_azimuth: 120.0,
            apogee_elevation: 41.251,
            fall_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 13, 2).unwrap(),
            fall_azimuth: 45.9,
        };
        assert_eq!(
            pass_cells(&pass, &Utc),
            [
                "01 May 12:03:41",
                "200.13",
                "12:08:20",
                "120.00",
                "41.25",
                "12:13:02",
                "45.90"
            ]
        );
    }
}
