//! Unit add/edit dialog.
//!
//! - view_model.rs: form state, validation and save command
//! - view.rs: the dialog component

mod view;
mod view_model;

pub use view::UnitDetails;
pub use view_model::UnitDetailsViewModel;
