use js_sys::{Promise, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use satwatch_shared::Observer;

use crate::config::DEFAULT_OBSERVER_ALT_M;

const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;

fn number_at(value: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(value, &JsValue::from_str(key)).ok()?.as_f64()
}

fn observer_from(lat: Option<f64>, lon: Option<f64>) -> Observer {
    match (lat, lon) {
        (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Observer {
            lat,
            lon,
            alt: DEFAULT_OBSERVER_ALT_M,
        },
        _ => Observer::default(),
    }
}

async fn current_position() -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let geolocation = window.navigator().geolocation()?;

    let options = web_sys::PositionOptions::new();
    options.set_timeout(GEOLOCATION_TIMEOUT_MS);

    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
            &resolve,
            Some(&reject),
            &options,
        ) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    JsFuture::from(promise).await
}

/// One-shot browser position. Denied, unavailable or timed-out requests yield the
/// default observer at 0°, 0°.
pub async fn locate() -> Observer {
    match current_position().await {
        Ok(position) => {
            let coords = Reflect::get(&position, &JsValue::from_str("coords")).unwrap_or_default();
            observer_from(number_at(&coords, "latitude"), number_at(&coords, "longitude"))
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("geolocation unavailable: {e:?}").into());
            Observer::default()
        }
    }
}
