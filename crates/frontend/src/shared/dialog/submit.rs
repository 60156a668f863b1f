//! Create/update submission used by every entity form dialog.

use crate::shared::crud;
use crate::shared::query_client::QueryClient;
use crate::shared::toast::{use_toast, ToastService};
use contracts::domain::common::AggregateRoot;
use contracts::shared::form_payload::FormPayload;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Submission state of one form dialog.
///
/// Field errors from client validation and from a 422 response land in
/// the same map so the inputs read one source. A message for a field
/// outside `bound` has no input to show it and is toasted instead.
#[derive(Clone, Copy)]
pub struct FormSubmitter {
    pub errors: RwSignal<FieldErrors>,
    pub submitting: RwSignal<bool>,
    bound: &'static [&'static str],
    toast: ToastService,
    client: QueryClient,
}

impl FormSubmitter {
    pub fn new(bound: &'static [&'static str]) -> Self {
        Self {
            errors: RwSignal::new(FieldErrors::new()),
            submitting: RwSignal::new(false),
            bound,
            toast: use_toast(),
            client: use_context::<QueryClient>().expect("QueryClient not found"),
        }
    }

    pub fn reset(&self) {
        self.errors.set(FieldErrors::new());
        self.submitting.set(false);
    }

    /// First message for `field`, for an input's `error` prop.
    pub fn error_for(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.first(field).map(str::to_string)))
    }

    pub fn clear_field(&self, field: &str) {
        if self.errors.with_untracked(|e| e.contains(field)) {
            self.errors.update(|e| e.clear_field(field));
        }
    }

    pub fn reject(&self, errors: FieldErrors) {
        log::debug!("form rejected: {} field(s)", errors.len());
        if let Some(message) = errors.first_unbound(self.bound) {
            self.toast.error(message.to_string());
        }
        let _ = self.errors.try_set(errors);
    }

    /// `POST /{entity}` or `POST /{entity}/{id}` with `_method=PUT`.
    ///
    /// On success the entity cache is dropped and `on_saved` runs; a 422
    /// maps onto the fields and any other failure becomes a toast.
    pub fn save<T, F>(
        &self,
        editing: Option<T::Id>,
        payload: FormPayload,
        files: Vec<(String, web_sys::File)>,
        on_saved: F,
    ) where
        T: AggregateRoot + 'static,
        F: FnOnce() + 'static,
    {
        if self.submitting.get_untracked() {
            return;
        }
        self.errors.set(FieldErrors::new());
        self.submitting.set(true);
        let this = *self;
        spawn_local(async move {
            let result = match editing {
                Some(id) => crud::update::<T>(id, &payload, &files).await,
                None => crud::create::<T>(&payload, &files).await,
            };
            match result {
                Ok(response) => {
                    let verb = if editing.is_some() { "updated" } else { "created" };
                    this.toast.success(response.message_or(&format!(
                        "{} {verb} successfully",
                        T::element_name()
                    )));
                    this.client.invalidate(T::collection_name());
                    on_saved();
                }
                Err(err) => match err.field_errors() {
                    Some(fields) if !fields.is_empty() => this.reject(fields.clone()),
                    _ => this.toast.error(err.user_message()),
                },
            }
            // try_: the dialog may have been disposed with its page
            let _ = this.submitting.try_set(false);
        });
    }
}
