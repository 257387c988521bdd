use std::future::Future;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::pass_search::{PassSearchForm, PassesList};
use crate::pass_view::PassView;
use crate::route::{Route, current_route, navigate};
use crate::satellite_page::SatellitePage;
use crate::search::SearchField;
use crate::ticker::{mount_view_ticker, teardown_view_ticker};

pub(crate) const PAGE_STYLE: &str = "display: flex; gap: 16px; padding: 16px; align-items: flex-start; flex-wrap: wrap;";
pub(crate) const MAIN_STYLE: &str = "flex: 1 1 640px; min-width: 320px;";
pub(crate) const SIDE_STYLE: &str = "flex: 0 1 380px; display: flex; flex-direction: column; gap: 12px;";
pub(crate) const HEADING_STYLE: &str = "font-size: 1rem; font-weight: 600; color: #f5c542; margin: 0 0 8px;";

/// Progress of a page's one-shot data load.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LoadState<T> {
    Loading,
    Ready(T),
    Failed,
}

/// Runs `load` once and publishes its outcome. Errors are logged and collapse to
/// `Failed`; the page shows a generic message instead of the error text.
pub(crate) fn load_once<T, F>(what: &'static str, load: F) -> ReadSignal<LoadState<T>>
where
    T: Send + Sync + 'static,
    F: Future<Output = Result<T, String>> + 'static,
{
    let (state, set_state) = signal(LoadState::Loading);
    spawn_local(async move {
        match load.await {
            Ok(value) => set_state.set(LoadState::Ready(value)),
            Err(e) => {
                web_sys::console::warn_1(&format!("{what}: {e}").into());
                set_state.set(LoadState::Failed);
            }
        }
    });
    state
}

#[component]
pub(crate) fn Loading() -> impl IntoView {
    view! { <div style="padding: 24px; color: #8a8778;">"Loading..."</div> }
}

#[component]
pub(crate) fn Failure() -> impl IntoView {
    view! {
        <div style="padding: 24px;">
            <h2 style=HEADING_STYLE>"Oops, something went wrong"</h2>
            <a href="/" style="color: #f5c542;">"Back to the start page"</a>
        </div>
    }
}

#[component]
fn Navbar() -> impl IntoView {
    let go_to_satellite = Callback::new(|name: String| navigate(&Route::Satellite { name }));
    view! {
        <nav style="display: flex; align-items: center; gap: 16px; padding: 10px 16px; background: #13161f; border-bottom: 1px solid #282c3e;">
            <a href="/" style="color: #f5c542; font-weight: 700; text-decoration: none;">"satwatch"</a>
            <a href=Route::Passes(None).href() style="color: #e2e0d8; text-decoration: none;">"Pass search"</a>
            <div style="margin-left: auto; width: 320px;">
                <SearchField on_select=go_to_satellite/>
            </div>
        </nav>
    }
}

#[component]
fn Home() -> impl IntoView {
    view! {
        <div style="padding: 24px; max-width: 640px;">
            <h2 style=HEADING_STYLE>"Satellite tracker"</h2>
            <p>"Type a satellite name above to follow it live, or search for upcoming passes over your location."</p>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div style="padding: 24px;">
            <h2 style=HEADING_STYLE>"Page not found"</h2>
            <a href="/" style="color: #f5c542;">"Back to the start page"</a>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // One ticker per page load; every page-level widget registers with it.
    mount_view_ticker();
    on_cleanup(teardown_view_ticker);

    let page = match current_route() {
        Route::Home => view! { <Home/> }.into_any(),
        Route::Satellite { name } => view! { <SatellitePage name=name/> }.into_any(),
        Route::Passes(None) => view! { <PassSearchForm/> }.into_any(),
        Route::Passes(Some(params)) => view! { <PassesList params=params/> }.into_any(),
        Route::Pass(params) => view! { <PassView params=params/> }.into_any(),
        Route::NotFound => view! { <NotFound/> }.into_any(),
    };

    view! {
        <div style="min-height: 100vh; background: #0c0e17; color: #e2e0d8; font-family: 'JetBrains Mono', monospace;">
            <Navbar/>
            <main>{page}</main>
        </div>
    }
}
