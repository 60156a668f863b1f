use super::aggregate::{Category, CategoryId};
use super::tree::CategoryTree;
use crate::shared::combobox::parse_selection;
use crate::shared::form_payload::FormPayload;
use crate::shared::validation::FieldErrors;

/// Fields the category dialog shows errors for inline.
pub const FORM_FIELDS: &[&str] = &[
    "name",
    "slug",
    "parent_id",
    "image",
    "page_title",
    "short_description",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub slug: String,
    /// Combobox value; empty for a root category.
    pub parent_id: String,
    pub is_active: bool,
    pub featured: bool,
    pub is_sync_disable: bool,
    pub page_title: String,
    pub short_description: String,
    /// The user removed the current image without picking a new one.
    pub remove_image: bool,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            parent_id: String::new(),
            is_active: true,
            featured: false,
            is_sync_disable: false,
            page_title: String::new(),
            short_description: String::new(),
            remove_image: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: Option<String>,
    pub parent_id: Option<i64>,
    pub is_active: bool,
    pub featured: bool,
    pub is_sync_disable: bool,
    pub page_title: Option<String>,
    pub short_description: Option<String>,
    pub remove_image: bool,
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// `Men's Shirts` -> `mens-shirts`
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut dash = false;
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            dash = false;
        } else if matches!(c, ' ' | '-' | '_' | '/' | '.') && !dash && !out.is_empty() {
            out.push('-');
            dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

impl CategoryForm {
    pub fn from_category(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            slug: c.slug.clone().unwrap_or_default(),
            parent_id: c.parent_id.map(|id| id.to_string()).unwrap_or_default(),
            is_active: c.is_active,
            featured: c.featured,
            is_sync_disable: c.is_sync_disable,
            page_title: c.page_title.clone().unwrap_or_default(),
            short_description: c.short_description.clone().unwrap_or_default(),
            remove_image: false,
        }
    }

    /// `tree` is used to reject a parent that is a descendant of the
    /// edited category; without it only the self-reference is checked.
    pub fn validate(
        &self,
        editing: Option<CategoryId>,
        tree: Option<&CategoryTree>,
    ) -> Result<CategoryDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.add("name", "The name field is required.");
        } else if name.chars().count() > 255 {
            errors.add("name", "The name may not be greater than 255 characters.");
        }

        let parent_id = parse_selection(&self.parent_id);
        if let (Some(id), Some(parent)) = (editing, parent_id) {
            if id.0 == parent {
                errors.add("parent_id", "A category cannot be its own parent.");
            } else if tree.is_some_and(|t| !t.is_valid_parent(id.0, parent)) {
                errors.add("parent_id", "A category cannot be moved under its own subcategory.");
            }
        }

        let slug = non_empty(&self.slug).map(|s| slugify(&s));
        if slug.as_deref() == Some("") {
            errors.add("slug", "The slug must contain letters or digits.");
        }

        errors.into_result()?;
        Ok(CategoryDraft {
            name,
            slug,
            parent_id,
            is_active: self.is_active,
            featured: self.featured,
            is_sync_disable: self.is_sync_disable,
            page_title: non_empty(&self.page_title),
            short_description: non_empty(&self.short_description),
            remove_image: self.remove_image,
        })
    }
}

impl CategoryDraft {
    pub fn to_payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        payload
            .text("name", &self.name)
            .opt_text("slug", self.slug.as_deref())
            .opt_number("parent_id", self.parent_id)
            .flag("is_active", self.is_active)
            .flag("featured", self.featured)
            .flag("is_sync_disable", self.is_sync_disable)
            .opt_text("page_title", self.page_title.as_deref())
            .opt_text("short_description", self.short_description.as_deref());
        if self.remove_image {
            payload.flag("remove_image", true);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::CategoryTreeNode;
    use crate::shared::error::ApiError;

    #[test]
    fn test_server_error_without_control_is_unbound() {
        let err = ApiError::from_response(
            422,
            r#"{"message":"invalid","errors":{"is_active":["must be boolean"]}}"#,
        );
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.first_unbound(FORM_FIELDS), Some("must be boolean"));

        let err = ApiError::from_response(422, r#"{"errors":{"slug":["taken"]}}"#);
        assert_eq!(err.field_errors().unwrap().first_unbound(FORM_FIELDS), None);
    }

    #[test]
    fn test_name_required() {
        let errors = CategoryForm::default().validate(None, None).unwrap_err();
        assert_eq!(errors.first("name"), Some("The name field is required."));
    }

    #[test]
    fn test_parent_cannot_be_self() {
        let form = CategoryForm {
            name: "Hats".into(),
            parent_id: "7".into(),
            ..CategoryForm::default()
        };
        let errors = form.validate(Some(CategoryId(7)), None).unwrap_err();
        assert!(errors.contains("parent_id"));
        assert!(form.validate(Some(CategoryId(8)), None).is_ok());
    }

    #[test]
    fn test_parent_cannot_be_descendant() {
        let tree = CategoryTree::from_nested(&[CategoryTreeNode {
            id: 1,
            name: "A".into(),
            children: vec![CategoryTreeNode {
                id: 2,
                name: "B".into(),
                children: vec![],
            }],
        }]);
        let form = CategoryForm {
            name: "A".into(),
            parent_id: "2".into(),
            ..CategoryForm::default()
        };
        assert!(form.validate(Some(CategoryId(1)), Some(&tree)).is_err());
    }

    #[test]
    fn test_payload_for_new_root_category() {
        let form = CategoryForm {
            name: "  Hats ".into(),
            ..CategoryForm::default()
        };
        let payload = form.validate(None, None).unwrap().to_payload();
        assert_eq!(payload.get("name"), Some("Hats"));
        assert_eq!(payload.get("parent_id"), Some(""));
        assert_eq!(payload.get("is_active"), Some("1"));
        assert_eq!(payload.get("featured"), Some("0"));
        assert!(!payload.contains("remove_image"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Men's Shirts"), "mens-shirts");
        assert_eq!(slugify("  A / B  "), "a-b");
        assert_eq!(slugify("--"), "");
    }

    #[test]
    fn test_symbol_only_slug_is_rejected() {
        let form = CategoryForm {
            name: "x".into(),
            slug: "***".into(),
            ..CategoryForm::default()
        };
        assert!(form.validate(None, None).unwrap_err().contains("slug"));
    }
}
