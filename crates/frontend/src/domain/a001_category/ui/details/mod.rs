//! Category add/edit dialog.
//!
//! - view_model.rs: form state, slug following, save command
//! - view.rs: the dialog component

mod view;
mod view_model;

pub use view::CategoryDetails;
pub use view_model::CategoryDetailsViewModel;
