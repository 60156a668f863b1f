//! Faceted filters (status / featured) applied to the rows of the current page.
//!
//! These facets do not round-trip through the backend; counts and
//! filtering only ever cover the page that is loaded.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facet {
    Status,
    Featured,
}

impl Facet {
    pub fn label(&self) -> &'static str {
        match self {
            Facet::Status => "Status",
            Facet::Featured => "Featured",
        }
    }

    pub fn value_labels(&self) -> (&'static str, &'static str) {
        match self {
            Facet::Status => ("Active", "Inactive"),
            Facet::Featured => ("Featured", "Not featured"),
        }
    }
}

/// Selected values of one facet. Nothing selected means no filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelection {
    pub yes: bool,
    pub no: bool,
}

impl FacetSelection {
    pub fn is_active(&self) -> bool {
        self.yes != self.no
    }

    pub fn accepts(&self, value: bool) -> bool {
        if !self.is_active() {
            return true;
        }
        if value {
            self.yes
        } else {
            self.no
        }
    }
}

pub trait Faceted {
    fn facet_value(&self, facet: Facet) -> Option<bool>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FacetFilter {
    pub status: FacetSelection,
    pub featured: FacetSelection,
}

impl FacetFilter {
    pub fn selection(&self, facet: Facet) -> FacetSelection {
        match facet {
            Facet::Status => self.status,
            Facet::Featured => self.featured,
        }
    }

    pub fn selection_mut(&mut self, facet: Facet) -> &mut FacetSelection {
        match facet {
            Facet::Status => &mut self.status,
            Facet::Featured => &mut self.featured,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active() || self.featured.is_active()
    }

    pub fn accepts<T: Faceted>(&self, row: &T) -> bool {
        [Facet::Status, Facet::Featured].iter().all(|facet| {
            match row.facet_value(*facet) {
                Some(value) => self.selection(*facet).accepts(value),
                None => true,
            }
        })
    }
}

pub fn apply_facets<T: Faceted + Clone>(rows: &[T], filter: &FacetFilter) -> Vec<T> {
    rows.iter().filter(|r| filter.accepts(*r)).cloned().collect()
}

/// `(true_count, false_count)` for a facet over the loaded page.
pub fn facet_counts<T: Faceted>(rows: &[T], facet: Facet) -> (usize, usize) {
    rows.iter()
        .filter_map(|r| r.facet_value(facet))
        .fold((0, 0), |(yes, no), v| if v { (yes + 1, no) } else { (yes, no + 1) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        active: bool,
        featured: bool,
    }

    impl Faceted for Row {
        fn facet_value(&self, facet: Facet) -> Option<bool> {
            Some(match facet {
                Facet::Status => self.active,
                Facet::Featured => self.featured,
            })
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { active: true, featured: true },
            Row { active: true, featured: false },
            Row { active: false, featured: false },
        ]
    }

    #[test]
    fn test_counts_cover_page_only() {
        assert_eq!(facet_counts(&rows(), Facet::Status), (2, 1));
        assert_eq!(facet_counts(&rows(), Facet::Featured), (1, 2));
    }

    #[test]
    fn test_empty_or_full_selection_is_noop() {
        let mut filter = FacetFilter::default();
        assert_eq!(apply_facets(&rows(), &filter).len(), 3);
        filter.status = FacetSelection { yes: true, no: true };
        assert_eq!(apply_facets(&rows(), &filter).len(), 3);
    }

    #[test]
    fn test_combined_facets() {
        let mut filter = FacetFilter::default();
        filter.selection_mut(Facet::Status).yes = true;
        filter.selection_mut(Facet::Featured).no = true;
        let out = apply_facets(&rows(), &filter);
        assert_eq!(out, vec![Row { active: true, featured: false }]);
    }
}
