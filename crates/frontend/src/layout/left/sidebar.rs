//! Sidebar navigation with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::{MenuEntry, MENU};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: &'static [MenuEntry],
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![MenuGroup {
        id: "catalog",
        label: "Catalog",
        icon: "database",
        items: MENU,
    }]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["catalog".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let gid_click = group.id.to_string();
                let gid_exp = group.id.to_string();
                let gid_show = group.id.to_string();

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_click.clone();
                                expanded_groups.update(move |items| {
                                    if let Some(pos) = items.iter().position(|x| x == &gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_exp)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&gid_show)>
                            <div class="app-sidebar__children">
                                {group.items.iter().map(|entry| {
                                    let path = entry.path;
                                    view! {
                                        <a
                                            href=path
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.path.with(|p| p.starts_with(path))
                                            style:padding-left="10px"
                                            on:click=move |ev| {
                                                // plain clicks stay in the app; modified clicks open a new tab
                                                if !(ev.ctrl_key() || ev.meta_key() || ev.shift_key()) {
                                                    ev.prevent_default();
                                                    ctx.navigate(path);
                                                }
                                            }
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(entry.icon)}
                                                <span>{entry.label}</span>
                                            </div>
                                        </a>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
