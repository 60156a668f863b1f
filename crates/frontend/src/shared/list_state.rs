//! Everything one entity list page holds: URL-backed query, cached page,
//! page-local facets, column visibility and the dialog provider.

use super::components::column_toggle::default_visible;
use super::crud;
use super::dialog::{provide_dialog_context, DialogContext};
use super::list_controller::ListController;
use super::query_client::{use_cached_query, QueryState};
use contracts::domain::common::{AggregateRoot, ListPage, PageMeta};
use contracts::shared::export::Exportable;
use contracts::shared::facet::{apply_facets, facet_counts, Facet, FacetFilter, Faceted};
use contracts::shared::list_query::{ListQuery, ListSpec};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;

pub struct EntityList<T: Send + Sync + 'static> {
    pub list: ListController,
    pub page: QueryState<ListPage<T>>,
    pub dialog: DialogContext<T>,
    /// Status/featured checkboxes; applied to the loaded page only.
    pub facets: RwSignal<FacetFilter>,
    pub visible: RwSignal<BTreeSet<&'static str>>,
    pub filters_expanded: RwSignal<bool>,
}

impl<T: Send + Sync + 'static> Clone for EntityList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for EntityList<T> {}

impl<T> EntityList<T>
where
    T: AggregateRoot + Exportable + Faceted + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Must run inside the list page component: the dialog context is
    /// provided to its subtree.
    pub fn new(spec: ListSpec) -> Self {
        let list = ListController::new(spec);
        let query = Signal::derive(move || list.query.get());
        let page = use_cached_query(T::collection_name(), query, |q: ListQuery| {
            crud::fetch_list::<T>(q)
        });
        Self {
            list,
            page,
            dialog: provide_dialog_context::<T>(),
            facets: RwSignal::new(FacetFilter::default()),
            visible: RwSignal::new(default_visible(T::columns())),
            filters_expanded: RwSignal::new(false),
        }
    }

    /// Rows of the loaded page that pass the facet checkboxes.
    pub fn rows(&self) -> Signal<Vec<T>> {
        let data = self.page.data;
        let facets = self.facets;
        Signal::derive(move || {
            data.with(|page| match page {
                Some(page) => facets.with(|f| apply_facets(&page.rows, f)),
                None => Vec::new(),
            })
        })
    }

    /// Every row of the loaded page, facets ignored.
    pub fn page_rows(&self) -> Signal<Vec<T>> {
        let data = self.page.data;
        Signal::derive(move || data.with(|p| p.as_ref().map(|p| p.rows.clone()).unwrap_or_default()))
    }

    pub fn meta(&self) -> Signal<Option<PageMeta>> {
        let data = self.page.data;
        Signal::derive(move || data.with(|p| p.as_ref().map(|p| p.meta)))
    }

    pub fn total(&self) -> Signal<u64> {
        let meta = self.meta();
        Signal::derive(move || meta.get().map_or(0, |m| m.total))
    }

    pub fn facet_counts(&self, facet: Facet) -> Signal<(usize, usize)> {
        let data = self.page.data;
        Signal::derive(move || {
            data.with(|p| p.as_ref().map_or((0, 0), |p| facet_counts(&p.rows, facet)))
        })
    }

    /// URL filters plus active facet checkboxes, for the panel badge.
    pub fn active_filter_count(&self) -> Signal<usize> {
        let list = self.list;
        let facets = self.facets;
        Signal::derive(move || {
            let facet_count = facets.with(|f| {
                usize::from(f.status.is_active()) + usize::from(f.featured.is_active())
            });
            list.query.with(|q| q.active_filter_count()) + facet_count
        })
    }

    pub fn clear_filters(&self) {
        self.facets.set(FacetFilter::default());
        self.list.clear_filters();
    }

    pub fn page_size(&self) -> Signal<u32> {
        let list = self.list;
        Signal::derive(move || list.query.with(|q| q.page_size))
    }
}
