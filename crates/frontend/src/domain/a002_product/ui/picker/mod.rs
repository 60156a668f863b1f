//! Product-form pickers: sale/purchase units and the combo line search.

use crate::domain::a002_product::api;
use crate::shared::components::Combobox;
use crate::shared::config::config;
use crate::shared::query_client::{use_cached_query, QueryKey};
use contracts::domain::a002_product::ProductSearchItem;
use contracts::domain::a003_unit::Unit;
use contracts::domain::common::dropdown::to_options;
use contracts::domain::common::AggregateRoot;
use contracts::shared::combobox::ComboOption;
use contracts::shared::debounce::Debouncer;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, PartialEq)]
struct SaleUnitKey(Option<i64>);

impl QueryKey for SaleUnitKey {
    fn cache_key(&self) -> String {
        match self.0 {
            Some(id) => format!("sale-unit|{id}"),
            None => "sale-unit|".to_string(),
        }
    }
}

/// Units a product with base unit `unit_id` can be sold or bought in.
///
/// Cached with the units so editing a unit drops stale families.
pub fn use_sale_units(unit_id: Signal<Option<i64>>) -> (Signal<Vec<ComboOption>>, Signal<bool>) {
    let state = use_cached_query(
        Unit::collection_name(),
        Signal::derive(move || SaleUnitKey(unit_id.get())),
        |key: SaleUnitKey| async move {
            match key.0 {
                Some(id) => api::fetch_sale_units(id).await.map(|items| to_options(&items)),
                None => Ok(Vec::new()),
            }
        },
    );
    let data = state.data;
    (
        Signal::derive(move || data.get().unwrap_or_default()),
        state.loading,
    )
}

/// Searches products for a combo and hands the picked one to `on_pick`.
///
/// The box always resets after a pick; lines live in the combo editor.
#[component]
pub fn ComboProductSearch(
    on_pick: Callback<ProductSearchItem>,
    #[prop(optional, into)] error: MaybeProp<String>,
) -> impl IntoView {
    let results = RwSignal::new(Vec::<ProductSearchItem>::new());
    let loading = RwSignal::new(false);
    let latest = RwSignal::new(String::new());
    let debouncer = StoredValue::new(Debouncer::new());

    let options = Signal::derive(move || {
        results.with(|items| items.iter().map(ProductSearchItem::to_option).collect::<Vec<_>>())
    });

    let on_search = Callback::new(move |text: String| {
        latest.set(text.clone());
        let Some(ticket) = debouncer.try_update_value(|d| d.schedule()) else {
            return;
        };
        let delay = config().list.search_debounce_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if !debouncer.try_update_value(|d| d.fire(ticket)).unwrap_or(false) {
                return;
            }
            let _ = loading.try_set(true);
            let outcome = api::search_combo(text.clone()).await;
            // a newer search owns the list now
            if latest.try_get_untracked().as_deref() != Some(text.as_str()) {
                return;
            }
            match outcome {
                Ok(items) => {
                    let _ = results.try_set(items);
                }
                Err(e) => {
                    log::warn!("combo search {text:?} failed: {e}");
                    let _ = results.try_set(Vec::new());
                }
            }
            let _ = loading.try_set(false);
        });
    });

    let on_change = Callback::new(move |value: Option<String>| {
        let Some(value) = value else { return };
        let picked = results.with_untracked(|items| {
            items.iter().find(|i| i.option_value() == value).cloned()
        });
        if let Some(item) = picked {
            on_pick.run(item);
        }
    });

    view! {
        <Combobox
            label="Add product"
            options=options
            value=Signal::stored(String::new())
            on_change=on_change
            on_search=on_search
            loading=loading
            error=error
            placeholder="Search by name or code..."
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_unit_key() {
        assert_eq!(SaleUnitKey(Some(4)).cache_key(), "sale-unit|4");
        assert_eq!(SaleUnitKey(None).cache_key(), "sale-unit|");
    }
}
