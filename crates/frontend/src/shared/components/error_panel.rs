use crate::shared::icons::icon;
use contracts::shared::error::ApiError;
use leptos::prelude::*;
use thaw::*;

/// Shown in place of a table after the automatic retry also failed.
#[component]
pub fn ErrorPanel(error: ApiError) -> impl IntoView {
    let message = error.user_message();

    view! {
        <div class="error-panel" role="alert">
            {icon("alert")}
            <div class="error-panel__text">
                <strong>"Failed to load data"</strong>
                <span>{message}</span>
            </div>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| {
                    if let Some(window) = web_sys::window() {
                        if let Err(e) = window.location().reload() {
                            log::error!("reload failed: {e:?}");
                        }
                    }
                }
            >
                {icon("refresh")}
                " Retry"
            </Button>
        </div>
    }
}
