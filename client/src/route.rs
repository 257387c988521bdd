use satwatch_shared::{PassSearchParams, PassViewParams};

/// Pages of the dashboard. Navigation between them is a full page load.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Satellite { name: String },
    /// `None` shows the search form, `Some` the results.
    Passes(Option<PassSearchParams>),
    Pass(PassViewParams),
    NotFound,
}

impl Route {
    pub fn parse(path: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        match path.trim_end_matches('/') {
            "" | "/index.html" => Self::Home,
            "/satellite" => match lookup("name") {
                Some(name) if !name.trim().is_empty() => Self::Satellite { name },
                _ => Self::NotFound,
            },
            "/passes" => Self::Passes(PassSearchParams::from_lookup(lookup)),
            "/pass" => PassViewParams::from_lookup(lookup).map_or(Self::NotFound, Self::Pass),
            _ => Self::NotFound,
        }
    }

    fn path_and_query(&self) -> (&'static str, Vec<(&'static str, String)>) {
        match self {
            Self::Home | Self::NotFound => ("/", Vec::new()),
            Self::Satellite { name } => ("/satellite", vec![("name", name.clone())]),
            Self::Passes(None) => ("/passes", Vec::new()),
            Self::Passes(Some(params)) => ("/passes", params.to_query_pairs()),
            Self::Pass(params) => ("/pass", params.to_query_pairs()),
        }
    }

    pub fn href_with(&self, encode: impl Fn(&str) -> String) -> String {
        let (path, query) = self.path_and_query();
        if query.is_empty() {
            return path.to_owned();
        }
        let query: Vec<String> = query
            .iter()
            .map(|(key, value)| format!("{key}={}", encode(value)))
            .collect();
        format!("{path}?{}", query.join("&"))
    }

    pub fn href(&self) -> String {
        self.href_with(|value| js_sys::encode_uri_component(value).into())
    }
}

/// Route of the page the browser is currently showing.
pub fn current_route() -> Route {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return Route::NotFound;
    };
    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok();
    Route::parse(&path, |key| params.as_ref().and_then(|p| p.get(key)))
}

pub fn navigate(route: &Route) {
    if let Some(window) = web_sys::window()
        && window.location().set_href(&route.href()).is_err()
    {
        web_sys::console::warn_1(&"navigation failed".into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use satwatch_shared::Observer;
    use std::collections::HashMap;

    fn parse(path: &str, pairs: &[(&str, &str)]) -> Route {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Route::parse(path, |key| map.get(key).cloned())
    }

    #[test]
    fn parses_static_pages() {
        assert_eq!(parse("/", &[]), Route::Home);
        assert_eq!(parse("", &[]), Route::Home);
        assert_eq!(parse("/passes", &[]), Route::Passes(None));
        assert_eq!(parse("/nowhere", &[]), Route::NotFound);
    }

    #[test]
    fn satellite_needs_a_name() {
        assert_eq!(
            parse("/satellite", &[("name", "ISS (ZARYA)")]),
            Route::Satellite {
                name: "ISS (ZARYA)".into()
            }
        );
        assert_eq!(parse("/satellite", &[("name", " ")]), Route::NotFound);
        assert_eq!(parse("/satellite/", &[]), Route::NotFound);
    }

    #[test]
    fn incomplete_pass_search_shows_the_form() {
        assert_eq!(parse("/passes", &[("lat", "1")]), Route::Passes(None));
        let full = parse(
            "/passes",
            &[
                ("lat", "1"),
                ("lon", "2"),
                ("alt", "0"),
                ("min_elevation", "0"),
                ("min_apogee", "0"),
                ("start_time", "2024-05-01T12:00"),
                ("duration", "24"),
                ("satellites", "NOAA 19"),
            ],
        );
        assert!(matches!(full, Route::Passes(Some(_))));
    }

    #[test]
    fn pass_route_round_trips_through_href() {
        let route = Route::Pass(PassViewParams {
            satellite: "NOAA 19".into(),
            observer: Observer {
                lat: 55.5,
                lon: 37.25,
                alt: 150.0,
            },
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 3, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 13, 0).unwrap(),
        });
        let href = route.href_with(str::to_owned);
        assert_eq!(
            href,
            "/pass?satellite=NOAA 19&lat=55.5&lon=37.25&alt=150&start_time=2024-05-01T12:03&end_time=2024-05-01T12:13"
        );

        let (path, query) = href.split_once('?').unwrap();
        let pairs: Vec<(&str, &str)> = query
            .split('&')
            .filter_map(|kv| kv.split_once('='))
            .collect();
        assert_eq!(parse(path, &pairs), route);
    }

    #[test]
    fn home_href_has_no_query() {
        assert_eq!(Route::Home.href_with(str::to_owned), "/");
        assert_eq!(
            Route::Satellite { name: "A B".into() }.href_with(|v| v.replace(' ', "%20")),
            "/satellite?name=A%20B"
        );
    }
}
