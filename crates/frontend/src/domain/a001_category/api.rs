use crate::shared::http;
use contracts::domain::a001_category::{CategoryTree, CategoryTreeNode};
use contracts::domain::common::DropdownItem;
use contracts::shared::error::ApiError;

/// `GET /categories/tree`, flattened for lookups by id.
pub async fn fetch_tree() -> Result<CategoryTree, ApiError> {
    let roots: Vec<CategoryTreeNode> = http::get_data("categories/tree", &[]).await?;
    log::debug!("category tree: {} root(s)", roots.len());
    Ok(CategoryTree::from_nested(&roots))
}

/// `GET /categories/parents`: categories that have at least one child.
pub async fn fetch_parents() -> Result<Vec<DropdownItem>, ApiError> {
    http::get_data("categories/parents", &[]).await
}
