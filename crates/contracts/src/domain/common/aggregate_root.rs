use super::AggregateId;

/// Trait for a backend-owned record shown in an admin list.
///
/// Instance methods describe one row; the associated functions describe
/// the entity class (REST resource, UI names).
pub trait AggregateRoot {
    type Id: AggregateId;

    // ============================================================================
    // Instance
    // ============================================================================

    fn id(&self) -> Self::Id;

    /// Human-readable name of the record.
    fn display_name(&self) -> &str;

    /// Text the user must retype to confirm deleting this record.
    fn confirm_text(&self) -> &str {
        self.display_name()
    }

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Index of the entity in the system, e.g. "a001"
    fn aggregate_index() -> &'static str;

    /// REST resource and cache name, e.g. "categories"
    fn collection_name() -> &'static str;

    /// Singular UI name, e.g. "Category"
    fn element_name() -> &'static str;

    /// Plural UI name, e.g. "Categories"
    fn list_name() -> &'static str;

    /// e.g. "a001_categories"
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Page id of the list view, used for DOM ids and tabs.
    fn list_page_id() -> String {
        format!("{}--list", Self::full_name())
    }
}
