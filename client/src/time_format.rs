use chrono::{DateTime, Local, TimeZone, Utc};

/// Format held seconds into fixed-width HH:MM:SS with cumulative hours.
pub fn format_hms(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Wall-clock time of day in `tz`.
pub fn clock<Tz: TimeZone>(t: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    t.with_timezone(tz).format("%H:%M:%S").to_string()
}

pub fn utc_clock(t: DateTime<Utc>) -> String {
    clock(t, &Utc)
}

pub fn local_clock(t: DateTime<Utc>) -> String {
    clock(t, &Local)
}

/// `01 May 12:03:41`, shown in the browser's time zone.
pub fn pass_date<Tz: TimeZone>(t: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    t.with_timezone(tz).format("%d %b %H:%M:%S").to_string()
}

/// TLE epoch, always UTC.
pub fn epoch(t: DateTime<Utc>) -> String {
    t.format("%d-%m-%Y %H:%M:%S UTC").to_string()
}

/// Minute-precision UTC stamp used in titles.
pub fn utc_minute(t: DateTime<Utc>) -> String {
    t.format("%d %b %H:%M").to_string()
}
