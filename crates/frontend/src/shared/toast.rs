//! Transient notifications for mutation results and non-field errors.

use super::config::config;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(ToastKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(ToastKind::Info, text.into());
    }

    fn push(&self, kind: ToastKind, text: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        log::debug!("toast {kind:?}: {text}");
        self.toasts.update(|t| t.push(Toast { id, kind, text }));

        let this = *self;
        let delay = config().dialog.toast_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            this.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        // the owner may be gone if the app unmounted
        let _ = self.toasts.try_update(|t| t.retain(|toast| toast.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not found")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let service = use_toast();

    view! {
        <div class="toast-host">
            <For
                each=move || service.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let intent = match toast.kind {
                        ToastKind::Success => MessageBarIntent::Success,
                        ToastKind::Error => MessageBarIntent::Error,
                        ToastKind::Info => MessageBarIntent::Info,
                    };
                    let id = toast.id;
                    view! {
                        <div class="toast-host__item" on:click=move |_| service.dismiss(id)>
                            <MessageBar intent=intent>
                                <span class="toast-host__text">{toast.text}</span>
                            </MessageBar>
                        </div>
                    }
                }
            />
        </div>
    }
}
