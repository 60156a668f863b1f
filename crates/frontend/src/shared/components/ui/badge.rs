use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Badge content
    children: Children,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

/// Active / inactive flag of a record
#[component]
pub fn ActiveBadge(
    #[prop(into)]
    active: Signal<bool>,
) -> impl IntoView {
    view! {
        <span class=move || if active.get() {
            "badge badge--status badge--status-active"
        } else {
            "badge badge--status badge--status-inactive"
        }>
            {move || if active.get() { "Active" } else { "Inactive" }}
        </span>
    }
}
