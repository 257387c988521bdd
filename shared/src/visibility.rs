use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Before,
    Visible,
    After,
}

/// Half-open `[start, end)` interval during which a pass is watchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl VisibilityWindow {
    /// Returns `None` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Classifies `now`. Evaluated from scratch on every call; there is no stored state.
    pub fn state_at(&self, now: DateTime<Utc>) -> VisibilityState {
        if now < self.start {
            VisibilityState::Before
        } else if now < self.end {
            VisibilityState::Visible
        } else {
            VisibilityState::After
        }
    }

    /// Whole seconds until the window opens, zero once it has.
    pub fn seconds_until_start(&self, now: DateTime<Utc>) -> i64 {
        (self.start - now).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn window() -> VisibilityWindow {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        VisibilityWindow::new(start, start + Duration::seconds(300)).unwrap()
    }

    #[test]
    fn rejects_empty_or_inverted_interval() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert!(VisibilityWindow::new(t, t).is_none());
        assert!(VisibilityWindow::new(t, t - Duration::seconds(1)).is_none());
    }

    #[test]
    fn boundaries_are_half_open() {
        let w = window();
        assert_eq!(w.state_at(w.start()), VisibilityState::Visible);
        assert_eq!(w.state_at(w.end()), VisibilityState::After);
        assert_eq!(
            w.state_at(w.end() - Duration::milliseconds(1)),
            VisibilityState::Visible
        );
        assert_eq!(
            w.state_at(w.start() - Duration::milliseconds(1)),
            VisibilityState::Before
        );
    }

    #[test]
    fn every_instant_has_exactly_one_state() {
        let w = window();
        for offset in -600..900 {
            let now = w.start() + Duration::seconds(offset);
            let state = w.state_at(now);
            let expected = if offset < 0 {
                VisibilityState::Before
            } else if offset < 300 {
                VisibilityState::Visible
            } else {
                VisibilityState::After
            };
            assert_eq!(state, expected, "offset {offset}");
        }
    }

    #[test]
    fn countdown_stops_at_zero() {
        let w = window();
        assert_eq!(w.seconds_until_start(w.start() - Duration::seconds(90)), 90);
        assert_eq!(w.seconds_until_start(w.start() + Duration::seconds(5)), 0);
    }
}
