pub mod combobox;
pub mod config;
pub mod confirm;
pub mod debounce;
pub mod dialog_state;
pub mod error;
pub mod export;
pub mod facet;
pub mod form_payload;
pub mod list_query;
pub mod permissions;
pub mod query_cache;
pub mod validation;
