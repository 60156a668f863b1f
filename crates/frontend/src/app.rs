use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::query_client::QueryClient;
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // One query cache for every list and dropdown
    provide_context(QueryClient::new());

    provide_context(ToastService::new());

    view! {
        <AppRoutes />
        <ToastHost />
    }
}
