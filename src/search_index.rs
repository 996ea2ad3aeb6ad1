//! Catalog Search Index
//!
//! Flattens the catalog into one query-ready list:
//! - one result per category (`/category/{id}`)
//! - one result per calculator (`/calculator/{id}`), tagged with its category name
//!
//! Filtering is case-folded substring containment over name, description and
//! parent category name. Results keep catalog order: all categories first,
//! then calculators in traversal order. An empty query matches nothing.

use serde::Serialize;

use crate::catalog::Catalog;

/// What a search hit points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Category,
    Calculator,
}

/// A single searchable record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub kind: ResultKind,
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: String,
    pub parent_category_name: Option<String>,
}

/// Lowercased copies of the matchable fields, aligned with `results`
#[derive(Debug, Clone)]
struct FoldedFields {
    name: String,
    description: String,
    parent: Option<String>,
}

impl FoldedFields {
    fn of(result: &SearchResult) -> Self {
        Self {
            name: result.name.to_lowercase(),
            description: result.description.to_lowercase(),
            parent: result.parent_category_name.as_ref().map(|p| p.to_lowercase()),
        }
    }

    fn contains(&self, folded_query: &str) -> bool {
        self.name.contains(folded_query)
            || self.description.contains(folded_query)
            || self
                .parent
                .as_deref()
                .is_some_and(|p| p.contains(folded_query))
    }
}

/// Flat search index over a catalog
pub struct SearchIndex {
    /// All records in catalog order
    results: Vec<SearchResult>,
    folded: Vec<FoldedFields>,
}

impl SearchIndex {
    /// Build the index from a catalog
    pub fn build(catalog: &Catalog) -> Self {
        let mut results: Vec<SearchResult> = Vec::new();

        // 1. Categories
        for category in catalog.list_categories() {
            results.push(SearchResult {
                kind: ResultKind::Category,
                id: category.id.to_string(),
                name: category.name.to_string(),
                description: category.description.to_string(),
                path: category.path(),
                parent_category_name: None,
            });
        }

        // 2. Calculators, tagged with the owning category
        for location in catalog.locations() {
            results.push(SearchResult {
                kind: ResultKind::Calculator,
                id: location.entry.id.to_string(),
                name: location.entry.name.to_string(),
                description: location.entry.description.to_string(),
                path: location.entry.path(),
                parent_category_name: Some(location.category.name.to_string()),
            });
        }

        let folded = results.iter().map(FoldedFields::of).collect();

        tracing::debug!("Search index built ({} records)", results.len());

        Self { results, folded }
    }

    /// All records matching `query`, in catalog order
    pub fn filter(&self, query: &str) -> Vec<&SearchResult> {
        if query.is_empty() {
            return vec![];
        }

        let folded_query = query.to_lowercase();

        self.results
            .iter()
            .zip(&self.folded)
            .filter(|(_, folded)| folded.contains(&folded_query))
            .map(|(result, _)| result)
            .collect()
    }

    /// Like `filter`, capped at `limit` records
    pub fn search(&self, query: &str, limit: usize) -> Vec<&SearchResult> {
        let start = std::time::Instant::now();
        let mut hits = self.filter(query);
        hits.truncate(limit);
        tracing::debug!(
            "Search '{}' returned {} results in {:?}",
            query,
            hits.len(),
            start.elapsed()
        );
        hits
    }

    /// Every record, in catalog order
    pub fn records(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Get index statistics
    pub fn stats(&self) -> SearchIndexStats {
        let category_count = self
            .results
            .iter()
            .filter(|r| r.kind == ResultKind::Category)
            .count();
        SearchIndexStats {
            category_count,
            calculator_count: self.results.len() - category_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchIndexStats {
    pub category_count: usize,
    pub calculator_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CalculatorEntry, Category, CategoryContents, Subcategory};

    static FIXTURE: &[Category] = &[
        Category {
            id: "alpha",
            name: "Alpha",
            description: "First category",
            icon: "A",
            color_token: "red",
            contents: CategoryContents::Subcategories(&[Subcategory {
                id: "inner",
                name: "Inner",
                description: "Nested",
                calculators: &[CalculatorEntry {
                    id: "widget",
                    name: "Widget Counter",
                    description: "Counts widgets",
                }],
            }]),
        },
        Category {
            id: "beta",
            name: "Beta",
            description: "Second category",
            icon: "B",
            color_token: "blue",
            contents: CategoryContents::Calculators(&[CalculatorEntry {
                id: "gadget",
                name: "Gadget Sizer",
                description: "Sizes gadgets",
            }]),
        },
    ];

    fn fixture_index() -> SearchIndex {
        SearchIndex::build(&Catalog::new(FIXTURE))
    }

    #[test]
    fn test_build_order_categories_first() {
        let index = fixture_index();
        let kinds: Vec<ResultKind> = index.results.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ResultKind::Category,
                ResultKind::Category,
                ResultKind::Calculator,
                ResultKind::Calculator
            ]
        );
        assert_eq!(index.results[2].path, "/calculator/widget");
        assert_eq!(index.results[2].parent_category_name.as_deref(), Some("Alpha"));
        assert_eq!(index.results[0].path, "/category/alpha");
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(fixture_index().filter("").is_empty());
        assert!(SearchIndex::build(&Catalog::builtin()).filter("").is_empty());
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let index = fixture_index();
        let hits = index.filter("WIDGET");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "widget");
    }

    #[test]
    fn test_parent_category_match() {
        // "alpha" matches the category itself and its calculator via parent name
        let index = fixture_index();
        let hits = index.filter("alpha");
        let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "widget"]);
    }

    #[test]
    fn test_description_match() {
        let index = fixture_index();
        let hits = index.filter("sizes");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "gadget");
    }

    #[test]
    fn test_search_limit() {
        let index = SearchIndex::build(&Catalog::builtin());
        assert_eq!(index.search("calculator", 3).len(), 3);
    }

    #[test]
    fn test_stats() {
        let stats = fixture_index().stats();
        assert_eq!(stats.category_count, 2);
        assert_eq!(stats.calculator_count, 2);
    }
}
