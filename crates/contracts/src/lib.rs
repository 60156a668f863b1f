//! Shared contracts between the admin frontend and the inventory REST API.
//!
//! Everything here is DOM-free so it can be unit tested natively:
//! entity shapes, response envelopes, URL list state, cache bookkeeping,
//! dialog state, form marshalling and export writers.

pub mod domain;
pub mod shared;
