use crate::domain::common::serde_helpers::{flex_bool, flex_i64_opt, lenient_opt};
use crate::domain::common::{AggregateRoot, EntityMetadata};
use crate::shared::export::{ColumnDef, Exportable};
use crate::shared::facet::{Facet, Faceted};
use crate::shared::list_query::ListSpec;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::record_id!(CategoryId);

/// Embedded `{id, name}` reference to another category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub parent_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub parent: Option<CategoryRef>,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true", deserialize_with = "flex_bool")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub featured: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub is_sync_disable: bool,

    // SEO
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,

    #[serde(default)]
    pub products_count: Option<u64>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Category {
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.name.as_str())
    }

    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "categories"
    }

    fn element_name() -> &'static str {
        "Category"
    }

    fn list_name() -> &'static str {
        "Categories"
    }
}

// ============================================================================
// List
// ============================================================================
pub const LIST_SPEC: ListSpec = ListSpec {
    filter_keys: &["parent_id"],
    sortable: &["name", "slug", "created_at"],
    default_page_size: 10,
};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("name", "Name").sortable(),
    ColumnDef::new("parent", "Parent"),
    ColumnDef::new("slug", "Slug").sortable().hidden(),
    ColumnDef::new("products_count", "Products"),
    ColumnDef::new("status", "Status"),
    ColumnDef::new("featured", "Featured"),
    ColumnDef::new("sync", "Sync").hidden(),
    ColumnDef::new("page_title", "Page title").hidden(),
    ColumnDef::new("created_at", "Created").sortable().hidden(),
];

impl Exportable for Category {
    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "parent" => self.parent_name().unwrap_or_default().to_string(),
            "slug" => self.slug.clone().unwrap_or_default(),
            "products_count" => self
                .products_count
                .map(|c| c.to_string())
                .unwrap_or_default(),
            "status" => (if self.is_active { "Active" } else { "Inactive" }).to_string(),
            "featured" => (if self.featured { "Yes" } else { "No" }).to_string(),
            "sync" => (if self.is_sync_disable { "Disabled" } else { "Enabled" }).to_string(),
            "page_title" => self.page_title.clone().unwrap_or_default(),
            "created_at" => self.metadata.created_display(),
            _ => String::new(),
        }
    }
}

impl Faceted for Category {
    fn facet_value(&self, facet: Facet) -> Option<bool> {
        Some(match facet {
            Facet::Status => self.is_active,
            Facet::Featured => self.featured,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_list_row() {
        let c: Category = serde_json::from_str(
            r#"{"id":3,"name":"Shirts","slug":"shirts","parent_id":"2","parent":{"id":2,"name":"Men"},
                "image":null,"is_active":"1","featured":0,"is_sync_disable":false,
                "created_at":"2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();
        assert_eq!(c.parent_id, Some(2));
        assert_eq!(c.parent_name(), Some("Men"));
        assert!(c.is_active);
        assert!(!c.featured);
        assert!(!c.has_image());
        assert_eq!(c.cell("created_at"), "2024-01-02 03:04");
    }

    #[test]
    fn test_empty_parent_object_is_ignored() {
        let c: Category = serde_json::from_str(r#"{"id":1,"name":"Root","parent":[]}"#).unwrap();
        assert!(c.parent.is_none());
        assert_eq!(c.cell("parent"), "");
    }

    #[test]
    fn test_facets() {
        let c: Category =
            serde_json::from_str(r#"{"id":1,"name":"x","is_active":0,"featured":1}"#).unwrap();
        assert_eq!(c.facet_value(Facet::Status), Some(false));
        assert_eq!(c.facet_value(Facet::Featured), Some(true));
    }
}
