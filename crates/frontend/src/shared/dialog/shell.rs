//! Overlay + surface for every dialog.
//!
//! Stays mounted after `open` turns false until the closing animation
//! reports `animationend`, then calls `on_exit_complete`. A timer of
//! `dialog.exit_fallback_ms` finishes the exit when no animation runs.

use crate::shared::config::config;
use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DialogShell(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    /// Overlay click, close button or Escape.
    on_close: Callback<()>,
    on_exit_complete: Callback<()>,
    /// Extra class for the surface, e.g. `dialog--wide`.
    #[prop(optional)]
    class: &'static str,
    #[prop(optional, into)] footer: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let mounted = RwSignal::new(open.get_untracked());
    let closing = RwSignal::new(false);
    // bumped per close so a late fallback timer cannot end a later exit
    let exit_round = StoredValue::new(0u64);
    let overlay_mouse_down = RwSignal::new(false);

    let finish_exit = move |round: u64| {
        if exit_round.try_get_value() != Some(round) || !closing.get_untracked() {
            return;
        }
        closing.set(false);
        mounted.set(false);
        on_exit_complete.run(());
    };

    Effect::new(move |_| {
        if open.get() {
            closing.set(false);
            mounted.set(true);
        } else if mounted.get_untracked() && !closing.get_untracked() {
            closing.set(true);
            let round = exit_round.get_value() + 1;
            exit_round.set_value(round);
            let delay = config().dialog.exit_fallback_ms;
            spawn_local(async move {
                TimeoutFuture::new(delay).await;
                finish_exit(round);
            });
        }
    });

    let escape = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" && open.get_untracked() {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only if both press and release happened on the overlay itself.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Defer to next tick: the overlay may be removed during its own click dispatch.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let handle_animation_end = move |_: ev::AnimationEvent| {
        if closing.get_untracked() {
            finish_exit(exit_round.get_value());
        }
    };

    view! {
        <Show when=move || mounted.get()>
            <div
                class="modal-overlay"
                class:modal-overlay--closing=move || closing.get()
                on:mousedown=handle_overlay_mouse_down
                on:click=handle_overlay_click
            >
                <div
                    class=format!("modal dialog {class}")
                    class:dialog--closing=move || closing.get()
                    role="dialog"
                    on:click=|ev: ev::MouseEvent| ev.stop_propagation()
                    on:animationend=handle_animation_end
                >
                    <div class="modal-header">
                        <h2 class="modal-title">{move || title.get()}</h2>
                        <button
                            class="button button--icon modal__close"
                            title="Close"
                            on:click=move |_| on_close.run(())
                        >
                            {icon("x")}
                        </button>
                    </div>
                    <div class="modal-body">{children()}</div>
                    {footer.as_ref().map(|footer| view! {
                        <div class="modal-footer">{footer.run()}</div>
                    })}
                </div>
            </div>
        </Show>
    }
}
