//! Id-keyed storage for self-referential records (category parents, unit
//! base units). Parent links are plain ids resolved through the arena, so
//! payload cycles cannot produce infinite walks.

use std::collections::{BTreeMap, HashSet};

pub trait ArenaNode {
    fn node_id(&self) -> i64;
    fn parent_id(&self) -> Option<i64>;
    fn node_label(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct Arena<T> {
    nodes: BTreeMap<i64, T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }
}

impl<T: ArenaNode> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = T>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.node_id(), n)).collect(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.nodes.values()
    }

    /// Parent chain from the direct parent up to the root. Stops at a
    /// missing parent or at the first repeated id.
    pub fn ancestors(&self, id: i64) -> Vec<&T> {
        let mut out = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.nodes.get(&id).and_then(ArenaNode::parent_id);
        while let Some(parent_id) = current {
            if !seen.insert(parent_id) {
                break;
            }
            let Some(parent) = self.nodes.get(&parent_id) else {
                break;
            };
            out.push(parent);
            current = parent.parent_id();
        }
        out
    }

    /// Ids of every node below `id`.
    pub fn descendants(&self, id: i64) -> HashSet<i64> {
        let mut out = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            for node in self.nodes.values() {
                let child = node.node_id();
                if node.parent_id() == Some(current) && child != id && out.insert(child) {
                    stack.push(child);
                }
            }
        }
        out
    }

    pub fn children(&self, id: Option<i64>) -> Vec<&T> {
        self.nodes
            .values()
            .filter(|n| n.parent_id() == id)
            .collect()
    }

    /// `Clothing / Men / Shirts`
    pub fn path_label(&self, id: i64) -> String {
        let Some(node) = self.nodes.get(&id) else {
            return String::new();
        };
        let mut parts: Vec<&str> = self
            .ancestors(id)
            .iter()
            .rev()
            .map(|n| n.node_label())
            .collect();
        parts.push(node.node_label());
        parts.join(" / ")
    }

    /// Would setting `parent` as the parent of `id` create a cycle?
    pub fn would_cycle(&self, id: i64, parent: i64) -> bool {
        parent == id || self.descendants(id).contains(&parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Node {
        id: i64,
        parent: Option<i64>,
        name: &'static str,
    }

    impl ArenaNode for Node {
        fn node_id(&self) -> i64 {
            self.id
        }
        fn parent_id(&self) -> Option<i64> {
            self.parent
        }
        fn node_label(&self) -> &str {
            self.name
        }
    }

    fn tree() -> Arena<Node> {
        Arena::from_nodes([
            Node { id: 1, parent: None, name: "Clothing" },
            Node { id: 2, parent: Some(1), name: "Men" },
            Node { id: 3, parent: Some(2), name: "Shirts" },
            Node { id: 4, parent: None, name: "Food" },
        ])
    }

    #[test]
    fn test_path_label() {
        assert_eq!(tree().path_label(3), "Clothing / Men / Shirts");
        assert_eq!(tree().path_label(4), "Food");
        assert_eq!(tree().path_label(99), "");
    }

    #[test]
    fn test_descendants_and_cycles() {
        let arena = tree();
        let below: HashSet<i64> = arena.descendants(1);
        assert_eq!(below, HashSet::from([2, 3]));
        assert!(arena.would_cycle(1, 3));
        assert!(arena.would_cycle(2, 2));
        assert!(!arena.would_cycle(3, 4));
    }

    #[test]
    fn test_cyclic_payload_terminates() {
        let arena = Arena::from_nodes([
            Node { id: 1, parent: Some(2), name: "A" },
            Node { id: 2, parent: Some(1), name: "B" },
        ]);
        assert_eq!(arena.ancestors(1).len(), 1);
        assert_eq!(arena.path_label(1), "B / A");
        assert_eq!(arena.descendants(1), HashSet::from([2]));
    }

    #[test]
    fn test_children_of_root() {
        let arena = tree();
        let roots: Vec<i64> = arena.children(None).iter().map(|n| n.id).collect();
        assert_eq!(roots, vec![1, 4]);
    }
}
