use crate::domain::a001_category::ui::list::CategoryList;
use crate::domain::a002_product::ui::list::ProductList;
use crate::domain::a003_unit::ui::list::UnitList;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use leptos::prelude::*;

pub const CATEGORIES_PATH: &str = "/categories";
pub const PRODUCTS_PATH: &str = "/products";
pub const UNITS_PATH: &str = "/units";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const MENU: &[MenuEntry] = &[
    MenuEntry {
        path: CATEGORIES_PATH,
        label: "Categories",
        icon: "folder-closed",
    },
    MenuEntry {
        path: PRODUCTS_PATH,
        label: "Products",
        icon: "products",
    },
    MenuEntry {
        path: UNITS_PATH,
        label: "Units",
        icon: "ruler",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Categories,
    Products,
    Units,
    NotFound,
}

fn resolve(path: &str) -> Page {
    match path.trim_end_matches('/') {
        "" | CATEGORIES_PATH => Page::Categories,
        PRODUCTS_PATH => Page::Products,
        UNITS_PATH => Page::Units,
        _ => Page::NotFound,
    }
}

#[component]
fn NotFound() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    view! {
        <PageFrame page_id="not_found--system" category=PAGE_CAT_SYSTEM>
            <div class="page__content">
                <div class="empty-state">
                    <h2>"Page not found"</h2>
                    <button class="button button--primary" on:click=move |_| ctx.navigate(CATEGORIES_PATH)>
                        "Go to categories"
                    </button>
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    let page = Memo::new(move |_| ctx.path.with(|p| resolve(p)));

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    {move || match page.get() {
                        Page::Categories => view! { <CategoryList /> }.into_any(),
                        Page::Products => view! { <ProductList /> }.into_any(),
                        Page::Units => view! { <UnitList /> }.into_any(),
                        Page::NotFound => view! { <NotFound /> }.into_any(),
                    }}
                }.into_any()
            }
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! { <MainLayout /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths() {
        assert_eq!(resolve("/"), Page::Categories);
        assert_eq!(resolve("/categories/"), Page::Categories);
        assert_eq!(resolve("/products"), Page::Products);
        assert_eq!(resolve("/units"), Page::Units);
        assert_eq!(resolve("/brands"), Page::NotFound);
    }
}
