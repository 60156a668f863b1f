//! Permission checks used to hide actions the current user cannot perform.
//!
//! Grants are strings of the form `resource.action`; `*` grants everything
//! and `resource.*` grants every action on one resource.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Import,
    Export,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Import => "import",
            Action::Export => "export",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(BTreeSet<String>);

impl Permissions {
    pub fn all() -> Self {
        Self::from_grants(["*"])
    }

    pub fn from_grants<I, S>(grants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            grants
                .into_iter()
                .map(|g| g.as_ref().trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
        )
    }

    pub fn can(&self, resource: &str, action: Action) -> bool {
        self.0.contains("*")
            || self.0.contains(&format!("{resource}.*"))
            || self.0.contains(&format!("{resource}.{}", action.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcards() {
        assert!(Permissions::all().can("units", Action::Delete));
        let p = Permissions::from_grants(["categories.*", "units.view"]);
        assert!(p.can("categories", Action::Import));
        assert!(p.can("units", Action::View));
        assert!(!p.can("units", Action::Delete));
        assert!(!p.can("products", Action::View));
    }

    #[test]
    fn test_empty_grants_deny() {
        assert!(!Permissions::default().can("units", Action::View));
    }
}
