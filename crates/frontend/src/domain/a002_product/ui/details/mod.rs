//! Product add/edit dialog.
//!
//! One form for every product type; sections appear by type:
//!
//! - view_model.rs: form state, combo/warehouse editors, save command
//! - sections.rs: combo lines, warehouse prices, initial stock, promotion, warranty
//! - view.rs: the dialog component

mod sections;
mod view;
mod view_model;

pub use view::ProductDetails;
pub use view_model::ProductDetailsViewModel;
