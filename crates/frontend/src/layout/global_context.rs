use contracts::shared::list_query::QueryParams;
use leptos::logging::log;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;

/// App-wide UI state: the current location and panel visibility.
///
/// The URL is the source of truth for which page is shown and for every
/// list filter; these signals mirror `window.location` and are written
/// back through the History API.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Path part of the URL, e.g. `/categories`
    pub path: RwSignal<String>,
    /// Query string without the leading `?`
    pub search: RwSignal<String>,
    pub left_open: RwSignal<bool>,
}

fn current_location() -> (String, String) {
    let Some(location) = window().map(|w| w.location()) else {
        return ("/".to_string(), String::new());
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    (path, search.trim_start_matches('?').to_string())
}

fn build_url(path: &str, search: &str) -> String {
    if search.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{search}")
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let (path, search) = current_location();
        Self {
            path: RwSignal::new(path),
            search: RwSignal::new(search),
            left_open: RwSignal::new(true),
        }
    }

    /// Keep the signals in sync with back/forward navigation.
    pub fn init_router_integration(&self) {
        let this = *self;
        let closure = Closure::wrap(Box::new(move |_event: web_sys::PopStateEvent| {
            let (path, search) = current_location();
            log!("popstate: {}?{}", path, search);
            this.path.set(path);
            this.search.set(search);
        }) as Box<dyn FnMut(_)>);

        if let Some(w) = window() {
            let _ = w.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
            // The listener lives as long as the app.
            closure.forget();
        }
    }

    /// Parsed query parameters of the current URL.
    pub fn query(&self) -> QueryParams {
        self.search.with(|s| QueryParams::parse(s))
    }

    /// Navigate to another page; list state of the old page is dropped.
    pub fn navigate(&self, path: &str) {
        log!("navigate: {}", path);
        let (path, search) = match path.split_once('?') {
            Some((p, q)) => (p.to_string(), q.to_string()),
            None => (path.to_string(), String::new()),
        };
        self.push(&path, &search, false);
        self.path.set(path);
        self.search.set(search);
    }

    /// Rewrite the query string of the current page. A new history entry
    /// is pushed so back returns to the previous filter state.
    pub fn set_query(&self, params: &QueryParams) {
        let search = params.to_query_string();
        if self.search.with_untracked(|s| *s == search) {
            return;
        }
        let path = self.path.get_untracked();
        self.push(&path, &search, false);
        self.search.set(search);
    }

    /// Like [`set_query`](Self::set_query) without a new history entry.
    pub fn replace_query(&self, params: &QueryParams) {
        let search = params.to_query_string();
        if self.search.with_untracked(|s| *s == search) {
            return;
        }
        let path = self.path.get_untracked();
        self.push(&path, &search, true);
        self.search.set(search);
    }

    fn push(&self, path: &str, search: &str, replace: bool) {
        let url = build_url(path, search);
        let Some(history) = window().and_then(|w| w.history().ok()) else {
            return;
        };
        let result = if replace {
            history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
        } else {
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
        };
        if let Err(e) = result {
            log::warn!("history update failed for {url}: {e:?}");
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
