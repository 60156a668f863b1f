//! Per-entity dialog provider and the animated dialog shell.

pub mod bulk_delete_dialog;
pub mod delete_dialog;
pub mod export_dialog;
pub mod import_dialog;
pub mod shell;
pub mod submit;

use contracts::shared::dialog_state::{DialogKind, DialogState};
use leptos::prelude::*;

/// Which dialog of a list page is open and which row it targets.
///
/// Provided by each list page; dropped with it.
pub struct DialogContext<T: Send + Sync + 'static> {
    state: RwSignal<DialogState<T>>,
    /// Generation captured by the last explicit close.
    pending_exit: StoredValue<Option<u64>>,
}

impl<T: Send + Sync + 'static> Clone for DialogContext<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for DialogContext<T> {}

impl<T: Clone + Send + Sync + 'static> DialogContext<T> {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(DialogState::new()),
            pending_exit: StoredValue::new(None),
        }
    }

    pub fn open(&self, kind: DialogKind, row: Option<T>) {
        log::debug!("dialog open: {kind}");
        self.state.update(|s| {
            s.open(kind, row);
        });
        self.pending_exit.set_value(None);
    }

    pub fn close(&self) {
        let mut generation = 0;
        self.state.update(|s| generation = s.close());
        self.pending_exit.set_value(Some(generation));
    }

    /// The close animation ended; release the row unless a dialog was
    /// reopened in the meantime.
    pub fn exit_complete(&self) {
        let Some(generation) = self.pending_exit.get_value() else {
            return;
        };
        self.pending_exit.set_value(None);
        // try_: the provider may have been disposed with the page
        let _ = self.state.try_update(|s| {
            s.exit_complete(generation);
        });
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.state.with(|s| s.is_open(kind))
    }

    pub fn is_open_signal(&self, kind: DialogKind) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_open(kind)))
    }

    pub fn current_row(&self) -> Option<T> {
        self.state.with(|s| s.current_row().cloned())
    }

    pub fn current_row_untracked(&self) -> Option<T> {
        self.state.with_untracked(|s| s.current_row().cloned())
    }
}

impl<T: Clone + Send + Sync + 'static> Default for DialogContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_dialog_context<T: Clone + Send + Sync + 'static>() -> DialogContext<T> {
    let ctx = DialogContext::<T>::new();
    provide_context(ctx);
    ctx
}

pub fn use_dialog<T: Clone + Send + Sync + 'static>() -> DialogContext<T> {
    use_context::<DialogContext<T>>().expect("DialogContext not found")
}
