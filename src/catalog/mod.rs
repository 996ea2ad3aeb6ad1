//! Calculator Catalog
//!
//! Static registry of categories, subcategories and calculator metadata.
//! Navigation, search and the category pages are all driven from this one
//! table; nothing here is mutated after startup.
//!
//! Layout:
//! - Biology and Chemistry group their calculators into subcategories
//! - every other category carries a flat calculator list

use serde::Serialize;

pub mod data;

// ============================================================================
// Types
// ============================================================================

/// One calculator as listed in navigation and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculatorEntry {
    /// URL-safe slug, unique across the whole catalog
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl CalculatorEntry {
    pub fn path(&self) -> String {
        format!("/calculator/{}", self.id)
    }
}

/// Presentational grouping inside a category. Unique within its parent.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Subcategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub calculators: &'static [CalculatorEntry],
}

/// How a category arranges its calculators.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum CategoryContents {
    Subcategories(&'static [Subcategory]),
    Calculators(&'static [CalculatorEntry]),
}

/// Top-level category. Display order is the order of the static table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Emoji shown on cards and headers
    pub icon: &'static str,
    /// Style token, mapped to a CSS class by the templates
    pub color_token: &'static str,
    pub contents: CategoryContents,
}

impl Category {
    pub fn path(&self) -> String {
        format!("/category/{}", self.id)
    }

    /// Subcategories, or an empty slice for flat categories.
    pub fn subcategories(&self) -> &'static [Subcategory] {
        match self.contents {
            CategoryContents::Subcategories(subs) => subs,
            CategoryContents::Calculators(_) => &[],
        }
    }

    /// Every calculator in display order, flattened across subcategories.
    pub fn calculators(&self) -> Vec<&'static CalculatorEntry> {
        match self.contents {
            CategoryContents::Subcategories(subs) => {
                subs.iter().flat_map(|s| s.calculators.iter()).collect()
            }
            CategoryContents::Calculators(list) => list.iter().collect(),
        }
    }

    /// Total calculators, recounted from the table on every call.
    pub fn calculator_count(&self) -> usize {
        match self.contents {
            CategoryContents::Subcategories(subs) => {
                subs.iter().map(|s| s.calculators.len()).sum()
            }
            CategoryContents::Calculators(list) => list.len(),
        }
    }
}

/// Where a calculator sits in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CalculatorLocation {
    pub category: &'static Category,
    pub subcategory: Option<&'static Subcategory>,
    pub entry: &'static CalculatorEntry,
}

impl CalculatorLocation {
    /// Link back to the narrowest page listing this calculator.
    pub fn back_link(&self) -> String {
        match self.subcategory {
            Some(sub) if self.category.id == "biology" => {
                format!("/category/biology/{}", sub.id)
            }
            _ => self.category.path(),
        }
    }

    pub fn back_label(&self) -> String {
        match self.subcategory {
            Some(sub) if self.category.id == "biology" => format!("{} Calculators", sub.name),
            _ => format!("{} Calculators", self.category.name),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Read-only view over a static category table.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    categories: &'static [Category],
}

impl Catalog {
    pub const fn new(categories: &'static [Category]) -> Self {
        Self { categories }
    }

    /// The catalog published on the site.
    pub fn builtin() -> Self {
        Self::new(data::CATEGORIES)
    }

    pub fn list_categories(&self) -> &'static [Category] {
        self.categories
    }

    pub fn find_category(&self, category_id: &str) -> Option<&'static Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Subcategories of a category; empty for unknown ids and flat categories.
    pub fn get_subcategories_for(&self, category_id: &str) -> &'static [Subcategory] {
        self.find_category(category_id)
            .map(Category::subcategories)
            .unwrap_or(&[])
    }

    pub fn find_subcategory(
        &self,
        category_id: &str,
        subcategory_id: &str,
    ) -> Option<&'static Subcategory> {
        self.get_subcategories_for(category_id)
            .iter()
            .find(|s| s.id == subcategory_id)
    }

    /// Calculators of one subcategory (`Some(id)`) or of a flat category (`None`).
    ///
    /// Anything that does not resolve yields an empty slice.
    pub fn get_calculators_for(
        &self,
        category_id: &str,
        subcategory_id: Option<&str>,
    ) -> &'static [CalculatorEntry] {
        let Some(category) = self.find_category(category_id) else {
            return &[];
        };
        match (category.contents, subcategory_id) {
            (CategoryContents::Subcategories(subs), Some(sub_id)) => subs
                .iter()
                .find(|s| s.id == sub_id)
                .map(|s| s.calculators)
                .unwrap_or(&[]),
            (CategoryContents::Calculators(list), None) => list,
            _ => &[],
        }
    }

    /// All calculators of a category, flattened in display order.
    pub fn calculators_in(&self, category_id: &str) -> Vec<&'static CalculatorEntry> {
        self.find_category(category_id)
            .map(Category::calculators)
            .unwrap_or_default()
    }

    /// Every calculator in traversal order (category, then subcategory, then entry).
    pub fn locations(&self) -> Vec<CalculatorLocation> {
        let mut out = Vec::new();
        for category in self.categories {
            match category.contents {
                CategoryContents::Subcategories(subs) => {
                    for sub in subs {
                        for entry in sub.calculators {
                            out.push(CalculatorLocation {
                                category,
                                subcategory: Some(sub),
                                entry,
                            });
                        }
                    }
                }
                CategoryContents::Calculators(list) => {
                    for entry in list {
                        out.push(CalculatorLocation {
                            category,
                            subcategory: None,
                            entry,
                        });
                    }
                }
            }
        }
        out
    }

    pub fn find_calculator(&self, calculator_id: &str) -> Option<CalculatorLocation> {
        self.locations()
            .into_iter()
            .find(|loc| loc.entry.id == calculator_id)
    }

    pub fn all_calculator_ids(&self) -> Vec<&'static str> {
        self.locations().iter().map(|loc| loc.entry.id).collect()
    }

    pub fn calculator_count(&self) -> usize {
        self.categories.iter().map(Category::calculator_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_thirteen_categories_in_display_order() {
        let ids: Vec<&str> = Catalog::builtin()
            .list_categories()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "biology", "chemistry", "ecology", "conversion", "construction", "everyday",
                "finance", "math", "sport", "food", "health", "statistics", "other",
            ]
        );
    }

    #[test]
    fn test_calculator_ids_unique() {
        let ids = Catalog::builtin().all_calculator_ids();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn test_subcategory_ids_unique_within_category() {
        for category in Catalog::builtin().list_categories() {
            let subs = category.subcategories();
            let unique: HashSet<&str> = subs.iter().map(|s| s.id).collect();
            assert_eq!(subs.len(), unique.len(), "duplicate subcategory in {}", category.id);
        }
    }

    #[test]
    fn test_ids_are_url_safe() {
        for id in Catalog::builtin().all_calculator_ids() {
            assert!(
                id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{id} is not a slug"
            );
        }
    }

    #[test]
    fn test_unknown_lookups_are_empty() {
        let catalog = Catalog::builtin();
        assert!(catalog.get_subcategories_for("astrology").is_empty());
        assert!(catalog.get_calculators_for("astrology", None).is_empty());
        assert!(catalog.get_calculators_for("biology", Some("zoology")).is_empty());
        // Grouped categories have no flat list
        assert!(catalog.get_calculators_for("biology", None).is_empty());
        // Flat categories have no subcategories
        assert!(catalog.get_subcategories_for("ecology").is_empty());
    }

    #[test]
    fn test_genetics_lookup() {
        let catalog = Catalog::builtin();
        let genetics = catalog.get_calculators_for("biology", Some("genetics"));
        assert!(genetics.iter().any(|c| c.id == "hardy-weinberg"));
    }

    #[test]
    fn test_find_calculator_back_links() {
        let catalog = Catalog::builtin();
        let loc = catalog.find_calculator("cell-size").unwrap();
        assert_eq!(loc.category.id, "biology");
        assert_eq!(loc.back_link(), "/category/biology/cell-biology");

        let loc = catalog.find_calculator("molarity").unwrap();
        assert_eq!(loc.back_link(), "/category/chemistry");

        let loc = catalog.find_calculator("shannon-diversity").unwrap();
        assert!(loc.subcategory.is_none());
        assert_eq!(loc.back_link(), "/category/ecology");
    }

    #[test]
    fn test_calculator_count_matches_subcategory_lengths() {
        for category in Catalog::builtin().list_categories() {
            let expected: usize = match category.contents {
                CategoryContents::Subcategories(subs) => {
                    subs.iter().map(|s| s.calculators.len()).sum()
                }
                CategoryContents::Calculators(list) => list.len(),
            };
            assert_eq!(category.calculator_count(), expected);
            assert_eq!(category.calculators().len(), expected);
        }
    }
}
