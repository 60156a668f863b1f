use crate::shared::components::ui::{ActiveBadge, Badge};
use crate::shared::config::permissions;
use crate::shared::dialog::shell::DialogShell;
use crate::shared::dialog::use_dialog;
use contracts::domain::a001_category::Category;
use contracts::domain::common::AggregateRoot;
use contracts::shared::dialog_state::DialogKind;
use contracts::shared::permissions::Action;
use leptos::prelude::*;
use thaw::*;

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

/// Read-only details of the current row.
#[component]
pub fn CategoryView() -> impl IntoView {
    let dialog = use_dialog::<Category>();
    let open = dialog.is_open_signal(DialogKind::View);
    let can_edit = permissions().can(Category::collection_name(), Action::Edit);
    let on_close = Callback::new(move |_| dialog.close());

    view! {
        <DialogShell
            open=open
            title=Signal::derive(move || {
                dialog.current_row().map(|c| c.name).unwrap_or_else(|| "Category".to_string())
            })
            on_close=on_close
            on_exit_complete=Callback::new(move |_| dialog.exit_complete())
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
                {can_edit.then(|| view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| dialog.open(DialogKind::Edit, dialog.current_row_untracked())
                    >
                        "Edit"
                    </Button>
                })}
            }
        >
            {move || dialog.current_row().map(|category| view! {
                {category.has_image().then(|| view! {
                    <img class="details-image" src=category.image.clone().unwrap_or_default() alt="" />
                })}
                <dl class="details-list">
                    <dt>"Name"</dt>
                    <dd>{category.name.clone()}</dd>
                    <dt>"Slug"</dt>
                    <dd>{or_dash(category.slug.as_deref())}</dd>
                    <dt>"Parent"</dt>
                    <dd>{category.parent_name().unwrap_or("None (root category)").to_string()}</dd>
                    <dt>"Products"</dt>
                    <dd>{category.products_count.unwrap_or(0).to_string()}</dd>
                    <dt>"Status"</dt>
                    <dd><ActiveBadge active=category.is_active /></dd>
                    <dt>"Featured"</dt>
                    <dd>
                        {if category.featured {
                            view! { <Badge variant="primary">"Featured"</Badge> }.into_any()
                        } else {
                            "No".into_any()
                        }}
                    </dd>
                    <dt>"Sync"</dt>
                    <dd>{if category.is_sync_disable { "Disabled" } else { "Enabled" }}</dd>
                    <dt>"Page title"</dt>
                    <dd>{or_dash(category.page_title.as_deref())}</dd>
                    <dt>"Short description"</dt>
                    <dd>{or_dash(category.short_description.as_deref())}</dd>
                    <dt>"Created"</dt>
                    <dd>{category.metadata.created_display()}</dd>
                    <dt>"Updated"</dt>
                    <dd>{category.metadata.updated_display()}</dd>
                </dl>
            })}
        </DialogShell>
    }
}
