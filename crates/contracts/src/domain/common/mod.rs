//! Common types and traits for all entities

pub mod aggregate_id;
pub mod aggregate_root;
pub mod api_response;
pub mod arena;
pub mod dropdown;
pub mod entity_metadata;
pub mod serde_helpers;

// Re-exports
pub use aggregate_id::AggregateId;
pub use aggregate_root::AggregateRoot;
pub use api_response::{ApiResponse, ListPage, PageMeta};
pub use arena::{Arena, ArenaNode};
pub use dropdown::{DropdownItem, ImportSummary};
pub use entity_metadata::EntityMetadata;
