pub mod aggregate;
pub mod form;

pub use aggregate::{Unit, UnitId, UnitOperator, LIST_SPEC};
pub use form::{BaseConversion, UnitDraft, UnitForm};
