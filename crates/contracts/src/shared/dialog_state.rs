//! State machine behind every per-entity dialog provider.
//!
//! Exactly one dialog is open at a time. The selected row stays set while
//! the close animation runs and is cleared only when the exit completes,
//! so the dialog body does not flash empty while animating out.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Add,
    Edit,
    View,
    Delete,
    BulkDelete,
    Import,
    Export,
}

impl DialogKind {
    pub fn needs_row(&self) -> bool {
        matches!(self, DialogKind::Edit | DialogKind::View | DialogKind::Delete)
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DialogKind::Add => "add",
            DialogKind::Edit => "edit",
            DialogKind::View => "view",
            DialogKind::Delete => "delete",
            DialogKind::BulkDelete => "bulk-delete",
            DialogKind::Import => "import",
            DialogKind::Export => "export",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogState<T> {
    open: Option<DialogKind>,
    current_row: Option<T>,
    generation: u64,
    closing: bool,
}

impl<T> Default for DialogState<T> {
    fn default() -> Self {
        Self {
            open: None,
            current_row: None,
            generation: 0,
            closing: false,
        }
    }
}

impl<T: Clone> DialogState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a dialog; any other open dialog is replaced. Row and kind are
    /// set together.
    pub fn open(&mut self, kind: DialogKind, row: Option<T>) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.open = Some(kind);
        self.current_row = row;
        self.closing = false;
        self.generation
    }

    /// Hide the dialog; the row is retained until [`exit_complete`](Self::exit_complete).
    pub fn close(&mut self) -> u64 {
        if self.open.is_some() {
            self.open = None;
            self.closing = true;
        }
        self.generation
    }

    /// Close animation finished for `generation`. The row is cleared only
    /// if no dialog was opened in the meantime.
    pub fn exit_complete(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.open.is_none() && self.closing {
            self.current_row = None;
            self.closing = false;
            true
        } else {
            false
        }
    }

    pub fn open_kind(&self) -> Option<DialogKind> {
        self.open
    }

    pub fn is_open(&self, kind: DialogKind) -> bool {
        self.open == Some(kind)
    }

    pub fn current_row(&self) -> Option<&T> {
        self.current_row.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_sets_kind_and_row_together() {
        let mut state: DialogState<u32> = DialogState::new();
        state.open(DialogKind::Edit, Some(4));
        assert!(state.is_open(DialogKind::Edit));
        assert_eq!(state.current_row(), Some(&4));
    }

    #[test]
    fn test_row_kept_until_exit_complete() {
        let mut state: DialogState<u32> = DialogState::new();
        state.open(DialogKind::Delete, Some(9));
        let generation = state.close();
        assert_eq!(state.open_kind(), None);
        assert_eq!(state.current_row(), Some(&9));
        assert!(state.exit_complete(generation));
        assert_eq!(state.current_row(), None);
    }

    #[test]
    fn test_late_exit_does_not_clear_new_row() {
        let mut state: DialogState<u32> = DialogState::new();
        state.open(DialogKind::Edit, Some(1));
        let old = state.close();
        state.open(DialogKind::View, Some(2));
        assert!(!state.exit_complete(old));
        assert_eq!(state.current_row(), Some(&2));
        assert!(state.is_open(DialogKind::View));
    }

    #[test]
    fn test_opening_replaces_other_dialog() {
        let mut state: DialogState<u32> = DialogState::new();
        state.open(DialogKind::Import, None);
        state.open(DialogKind::Add, None);
        assert!(!state.is_open(DialogKind::Import));
        assert!(state.is_open(DialogKind::Add));
    }

    #[test]
    fn test_needs_row() {
        assert!(DialogKind::Edit.needs_row());
        assert!(!DialogKind::BulkDelete.needs_row());
    }
}
