//! URL-backed list state: search, filters, sort and paging of one list view.
//!
//! Nothing here holds filter state in memory except the search box text
//! while its debounce is pending; every setter rewrites the URL and the
//! derived [`ListQuery`] follows from it.

use super::config::{config, list_spec};
use crate::layout::global_context::AppGlobalContext;
use contracts::shared::debounce::Debouncer;
use contracts::shared::list_query::{ListQuery, ListSpec, QueryParams};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeSet;

fn with_search(mut params: QueryParams, text: &str) -> QueryParams {
    params.set_search(text);
    params
}

/// The search box follows the URL only when the URL's search itself moved
/// (back/forward, another writer); a filter change with a pending debounce
/// keeps the typed text.
fn should_sync_input(prev_url: Option<&str>, url: &str, input: &str) -> bool {
    prev_url.is_some_and(|prev| prev != url) && input.trim() != url
}

#[derive(Clone, Copy)]
pub struct ListController {
    ctx: AppGlobalContext,
    spec: ListSpec,
    pub query: Memo<ListQuery>,
    /// Text in the search box; reaches the URL after the debounce.
    pub search_input: RwSignal<String>,
    /// Selected row ids; cleared whenever the query changes.
    pub selection: RwSignal<BTreeSet<i64>>,
    debouncer: StoredValue<Debouncer>,
}

impl ListController {
    pub fn new(spec: ListSpec) -> Self {
        let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
        let spec = list_spec(spec);
        let query = Memo::new(move |_| ListQuery::derive(&ctx.query(), &spec));
        let search_input = RwSignal::new(query.with_untracked(|q| q.search.clone()));
        let selection = RwSignal::new(BTreeSet::new());
        let debouncer = StoredValue::new(Debouncer::new());

        Effect::new(move |prev: Option<String>| {
            let url_search = query.with(|q| q.search.clone());
            let input = search_input.get_untracked();
            if should_sync_input(prev.as_deref(), &url_search, &input) {
                debouncer.update_value(|d| d.cancel());
                search_input.set(url_search.clone());
            }
            url_search
        });

        Effect::new(move |prev: Option<ListQuery>| {
            let current = query.get();
            if prev.is_some_and(|p| p != current) {
                selection.update(|s| s.clear());
            }
            current
        });

        Self {
            ctx,
            spec,
            query,
            search_input,
            selection,
            debouncer,
        }
    }

    pub fn spec(&self) -> ListSpec {
        self.spec
    }

    /// Keystroke in the search box; only the last one within the window commits.
    pub fn on_search_input(&self, text: String) {
        self.search_input.set(text);
        let Some(ticket) = self.debouncer.try_update_value(|d| d.schedule()) else {
            return;
        };
        let this = *self;
        let delay = config().list.search_debounce_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            let fire = this
                .debouncer
                .try_update_value(|d| d.fire(ticket))
                .unwrap_or(false);
            if fire {
                let text = this.search_input.get_untracked();
                let current = this.ctx.query();
                let next = with_search(current.clone(), &text);
                if next != current {
                    log::debug!("search committed: {text:?}");
                    this.ctx.replace_query(&next);
                }
            }
        });
    }

    pub fn filter(&self, key: &str) -> Option<String> {
        self.query.with(|q| q.filter(key).map(str::to_string))
    }

    pub fn set_filter(&self, key: &str, value: Option<String>) {
        let mut params = self.ctx.query();
        params.set_filter(key, value);
        self.ctx.set_query(&params);
    }

    pub fn clear_filters(&self) {
        self.debouncer.update_value(|d| d.cancel());
        self.search_input.set(String::new());
        let mut params = self.ctx.query();
        params.clear_filters(&self.spec);
        self.ctx.set_query(&params);
    }

    pub fn set_page(&self, page: u32) {
        let mut params = self.ctx.query();
        params.set_page(page);
        self.ctx.set_query(&params);
    }

    pub fn set_page_size(&self, size: u32) {
        let mut params = self.ctx.query();
        params.set_page_size(size, &self.spec);
        self.ctx.set_query(&params);
    }

    pub fn toggle_sort(&self, field: &str) {
        let mut params = self.ctx.query();
        params.toggle_sort(field);
        self.ctx.set_query(&params);
    }

    pub fn toggle_selected(&self, id: i64, checked: bool) {
        self.selection.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    }

    pub fn set_all_selected(&self, ids: Vec<i64>, checked: bool) {
        self.selection.update(|s| {
            if checked {
                s.extend(ids);
            } else {
                for id in ids {
                    s.remove(&id);
                }
            }
        });
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selection.with(|s| s.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_commit_resets_page() {
        let params = QueryParams::parse("search=shirt&page=3&parent_id=4");
        let next = with_search(params, "hats");
        assert_eq!(next.get("search"), Some("hats"));
        assert_eq!(next.get("page"), None);
        assert_eq!(next.get("parent_id"), Some("4"));
    }

    #[test]
    fn test_input_follows_url_only_when_url_search_moves() {
        // filter changed while "hat" is still debouncing
        assert!(!should_sync_input(Some(""), "", "hat"));
        // back button restored an older search
        assert!(should_sync_input(Some("hats"), "shirt", "hats"));
        // our own commit landed
        assert!(!should_sync_input(Some(""), "hats", "hats "));
        // first run
        assert!(!should_sync_input(None, "shirt", "shirt"));
    }

    #[test]
    fn test_empty_search_removes_param() {
        let next = with_search(QueryParams::parse("search=shirt"), "  ");
        assert!(next.is_empty());
    }
}
