//! `/categories/tree` flattened into an id-keyed arena.

use crate::domain::common::{Arena, ArenaNode};
use crate::shared::combobox::ComboOption;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Nested node as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTreeNode {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub children: Vec<CategoryTreeNode>,
}

/// Flat arena entry; the parent is an id, never an embedded object.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

impl ArenaNode for CategoryNode {
    fn node_id(&self) -> i64 {
        self.id
    }

    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    fn node_label(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    arena: Arena<CategoryNode>,
    /// Depth-first order of the payload, used for option ordering.
    order: Vec<i64>,
}

impl CategoryTree {
    pub fn from_nested(roots: &[CategoryTreeNode]) -> Self {
        let mut nodes = Vec::new();
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<(&CategoryTreeNode, Option<i64>)> =
            roots.iter().rev().map(|n| (n, None)).collect();
        while let Some((node, parent)) = stack.pop() {
            // a repeated id means a malformed payload; keep the first occurrence
            if !seen.insert(node.id) {
                continue;
            }
            nodes.push(CategoryNode {
                id: node.id,
                name: node.name.clone(),
                parent_id: parent,
            });
            order.push(node.id);
            for child in node.children.iter().rev() {
                stack.push((child, Some(node.id)));
            }
        }
        Self {
            arena: Arena::from_nodes(nodes),
            order,
        }
    }

    pub fn arena(&self) -> &Arena<CategoryNode> {
        &self.arena
    }

    pub fn path_label(&self, id: i64) -> String {
        self.arena.path_label(id)
    }

    /// Options for a parent picker. When editing, the category itself and
    /// every descendant are excluded.
    pub fn parent_options(&self, editing: Option<i64>) -> Vec<ComboOption> {
        let excluded: HashSet<i64> = match editing {
            Some(id) => {
                let mut set = self.arena.descendants(id);
                set.insert(id);
                set
            }
            None => HashSet::new(),
        };
        self.order
            .iter()
            .filter(|id| !excluded.contains(id))
            .filter_map(|id| self.arena.get(*id))
            .map(|node| ComboOption::new(node.id.to_string(), self.arena.path_label(node.id)))
            .collect()
    }

    /// Options for the list filter: every category.
    pub fn filter_options(&self) -> Vec<ComboOption> {
        self.parent_options(None)
    }

    pub fn is_valid_parent(&self, id: i64, parent: i64) -> bool {
        !self.arena.would_cycle(id, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategoryTree {
        let roots: Vec<CategoryTreeNode> = serde_json::from_str(
            r#"[
                {"id":1,"name":"Clothing","children":[
                    {"id":2,"name":"Men","children":[{"id":3,"name":"Shirts"}]},
                    {"id":5,"name":"Women"}
                ]},
                {"id":4,"name":"Food","children":[]}
            ]"#,
        )
        .unwrap();
        CategoryTree::from_nested(&roots)
    }

    #[test]
    fn test_flatten_keeps_depth_first_order() {
        let labels: Vec<String> = sample()
            .filter_options()
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Clothing",
                "Clothing / Men",
                "Clothing / Men / Shirts",
                "Clothing / Women",
                "Food"
            ]
        );
    }

    #[test]
    fn test_parent_options_exclude_self_and_descendants() {
        let values: Vec<String> = sample()
            .parent_options(Some(2))
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, vec!["1", "5", "4"]);
    }

    #[test]
    fn test_cycle_detection() {
        let tree = sample();
        assert!(!tree.is_valid_parent(1, 3));
        assert!(!tree.is_valid_parent(2, 2));
        assert!(tree.is_valid_parent(3, 4));
    }

    #[test]
    fn test_duplicate_ids_do_not_loop() {
        let roots = vec![CategoryTreeNode {
            id: 1,
            name: "A".into(),
            children: vec![CategoryTreeNode {
                id: 1,
                name: "A again".into(),
                children: vec![],
            }],
        }];
        let tree = CategoryTree::from_nested(&roots);
        assert_eq!(tree.arena().len(), 1);
        assert_eq!(tree.path_label(1), "A");
    }
}
