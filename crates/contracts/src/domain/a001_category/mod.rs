pub mod aggregate;
pub mod form;
pub mod tree;

pub use aggregate::{Category, CategoryId, CategoryRef, LIST_SPEC};
pub use form::{CategoryDraft, CategoryForm};
pub use tree::{CategoryTree, CategoryTreeNode};
