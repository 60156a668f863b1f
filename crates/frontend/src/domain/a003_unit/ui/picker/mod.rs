use crate::domain::a003_unit::api;
use crate::shared::components::Combobox;
use crate::shared::query_client::use_cached_query;
use contracts::domain::a003_unit::Unit;
use contracts::domain::common::AggregateRoot;
use contracts::shared::combobox::ComboOption;
use leptos::prelude::*;

/// Base units, cached alongside the unit list and dropped with it.
pub fn use_base_units() -> (Signal<Vec<Unit>>, Signal<bool>) {
    let state = use_cached_query(
        Unit::collection_name(),
        Signal::stored("base".to_string()),
        |_key: String| api::fetch_base_units(),
    );
    let data = state.data;
    (
        Signal::derive(move || data.get().unwrap_or_default()),
        state.loading,
    )
}

fn base_options(units: &[Unit], exclude: Option<i64>) -> Vec<ComboOption> {
    units
        .iter()
        .filter(|u| Some(u.id.0) != exclude)
        .map(|u| ComboOption::new(u.id.0.to_string(), u.name.clone()).with_hint(u.code.clone()))
        .collect()
}

/// Picks a base unit; `exclude` keeps a unit from being its own base.
#[component]
pub fn BaseUnitPicker(
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<Option<String>>,
    #[prop(optional, into)] exclude: Signal<Option<i64>>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
) -> impl IntoView {
    let (units, loading) = use_base_units();
    let options = Signal::derive(move || units.with(|u| base_options(u, exclude.get())));

    view! {
        <Combobox
            label=label
            options=options
            value=value
            on_change=on_change
            loading=loading
            error=error
            placeholder=placeholder
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_options_exclude_edited_unit() {
        let units: Vec<Unit> = serde_json::from_str(
            r#"[{"id":1,"code":"pc","name":"Piece"},{"id":2,"code":"kg","name":"Kilogram"}]"#,
        )
        .unwrap();
        let options = base_options(&units, Some(2));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "1");
        assert_eq!(options[0].hint.as_deref(), Some("pc"));
    }
}
