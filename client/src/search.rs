use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use satwatch_shared::rank;

use crate::api;
use crate::config::SUGGESTION_LIMIT;

/// Suggestions for the current input. Nothing is suggested until the user types.
pub fn suggest(query: &str, candidates: &[String]) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    rank(query, candidates, SUGGESTION_LIMIT)
}

/// Moves the keyboard highlight one row, wrapping at both ends.
pub fn step_highlight(current: Option<usize>, len: usize, down: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, down) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

/// Satellite name input with ranked suggestions.
///
/// The candidate list is fetched once when the field mounts and ranked locally on
/// every keystroke. Picking a suggestion hands it to `on_select`; what that means
/// is up to the caller.
#[component]
pub fn SearchField(
    #[prop(into)] on_select: Callback<String>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(optional)] clear_on_select: bool,
) -> impl IntoView {
    let candidates = RwSignal::new(Vec::<String>::new());
    let query = RwSignal::new(String::new());
    let open = RwSignal::new(false);
    let highlighted = RwSignal::new(None::<usize>);

    spawn_local(async move {
        match api::fetch_satellites_list().await {
            Ok(list) => candidates.set(list),
            Err(e) => {
                web_sys::console::warn_1(&format!("satellite list fetch failed: {e}").into());
            }
        }
    });

    let suggestions = Memo::new(move |_| candidates.with(|all| suggest(&query.get(), all)));

    let select = move |name: String| {
        query.set(if clear_on_select {
            String::new()
        } else {
            name.clone()
        });
        open.set(false);
        highlighted.set(None);
        on_select.run(name);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let len = suggestions.with_untracked(Vec::len);
        match ev.key().as_str() {
            "ArrowDown" | "ArrowUp" => {
                ev.prevent_default();
                open.set(true);
                highlighted.update(|h| *h = step_highlight(*h, len, ev.key() == "ArrowDown"));
            }
            "Enter" => {
                ev.prevent_default();
                let pick = suggestions.with_untracked(|list| {
                    highlighted
                        .get_untracked()
                        .and_then(|i| list.get(i))
                        .or_else(|| list.first())
                        .cloned()
                });
                if let Some(name) = pick {
                    select(name);
                }
            }
            "Escape" => {
                open.set(false);
                highlighted.set(None);
            }
            _ => {}
        }
    };

    view! {
        <div class="search-field" style="position: relative; width: 100%;">
            <input
                type="search"
                autocomplete="off"
                placeholder=placeholder.unwrap_or("Find a satellite...")
                prop:value=move || query.get()
                on:input=move |ev| {
                    query.set(event_target_value(&ev));
                    open.set(true);
                    highlighted.set(None);
                }
                on:keydown=on_keydown
                on:blur=move |_| open.set(false)
                style="width: 100%; box-sizing: border-box; padding: 6px 10px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; font-family: inherit;"
            />
            <Show when=move || open.get() && suggestions.with(|s| !s.is_empty())>
                <ul
                    class="search-suggestions"
                    style="position: absolute; left: 0; right: 0; z-index: 30; margin: 2px 0 0; padding: 0; list-style: none; background: #13161f; border: 1px solid #282c3e; border-radius: 6px;"
                >
                    <For
                        each=move || suggestions.get().into_iter().enumerate()
                        key=|(i, name)| (*i, name.clone())
                        children=move |(i, name)| {
                            let label = name.clone();
                            view! {
                                <li
                                    on:mousedown=move |ev: web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        select(name.clone());
                                    }
                                    style:background=move || {
                                        if highlighted.get() == Some(i) { "#282c3e" } else { "transparent" }
                                    }
                                    style="padding: 5px 10px; cursor: pointer;"
                                >
                                    {label}
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<String> {
        ["NOAA 15", "NOAA 18", "NOAA 19", "ISS (ZARYA)", "METEOR-M2 3"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn blank_input_suggests_nothing() {
        assert!(suggest("", &catalog()).is_empty());
        assert!(suggest("   ", &catalog()).is_empty());
    }

    #[test]
    fn typing_ranks_locally() {
        assert_eq!(suggest("noaa 1", &catalog()), vec!["NOAA 15", "NOAA 18", "NOAA 19"]);
        assert_eq!(suggest("zarya", &catalog()), vec!["ISS (ZARYA)"]);
        assert!(suggest("goes", &catalog()).is_empty());
    }

    #[test]
    fn suggestions_are_capped() {
        let many: Vec<String> = (0..30).map(|i| format!("STARLINK-{i}")).collect();
        assert_eq!(suggest("star", &many).len(), SUGGESTION_LIMIT);
    }

    #[test]
    fn highlight_wraps() {
        assert_eq!(step_highlight(None, 3, true), Some(0));
        assert_eq!(step_highlight(None, 3, false), Some(2));
        assert_eq!(step_highlight(Some(2), 3, true), Some(0));
        assert_eq!(step_highlight(Some(0), 3, false), Some(2));
        assert_eq!(step_highlight(Some(1), 0, true), None);
    }
}
