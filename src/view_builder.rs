//! Category Page View Builder
//!
//! Turns catalog lookups into render-ready view models for the category and
//! biology subcategory pages. Counts are recomputed from the catalog on every
//! call. Unknown ids produce a `NotFound` state instead of an error.

use serde::Serialize;

use crate::catalog::{CalculatorEntry, Catalog, Category, CategoryContents, Subcategory};

/// Link card for one calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorLink {
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: String,
}

impl From<&CalculatorEntry> for CalculatorLink {
    fn from(entry: &CalculatorEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            description: entry.description.to_string(),
            path: entry.path(),
        }
    }
}

/// A titled group of links; flat categories render one untitled group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Dedicated subcategory page, when the category has one
    pub path: Option<String>,
    pub calculators: Vec<CalculatorLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color_token: String,
    pub calculator_count: usize,
    pub groups: Vec<GroupView>,
}

impl CategoryView {
    /// "N calculators available"
    pub fn count_label(&self) -> String {
        count_label(self.calculator_count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryView {
    pub category_id: String,
    pub category_name: String,
    pub category_path: String,
    pub id: String,
    pub title: String,
    pub description: String,
    pub calculator_count: usize,
    pub calculators: Vec<CalculatorLink>,
}

impl SubcategoryView {
    pub fn count_label(&self) -> String {
        count_label(self.calculator_count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CategoryRender {
    Found(CategoryView),
    NotFound { category_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubcategoryRender {
    Found(SubcategoryView),
    NotFound {
        category_id: String,
        subcategory_id: String,
    },
}

pub fn count_label(count: usize) -> String {
    match count {
        1 => "1 calculator available".to_string(),
        n => format!("{} calculators available", n),
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Render a category page
pub fn render_category(catalog: &Catalog, category_id: &str) -> CategoryRender {
    let Some(category) = catalog.find_category(category_id) else {
        tracing::warn!("Unknown category '{}'", category_id);
        return CategoryRender::NotFound {
            category_id: category_id.to_string(),
        };
    };

    CategoryRender::Found(build_category_view(category))
}

fn build_category_view(category: &Category) -> CategoryView {
    let groups = match category.contents {
        CategoryContents::Subcategories(subs) => subs
            .iter()
            .map(|sub| GroupView {
                id: Some(sub.id.to_string()),
                name: Some(sub.name.to_string()),
                description: Some(sub.description.to_string()),
                path: subcategory_path(category, sub),
                calculators: sub.calculators.iter().map(CalculatorLink::from).collect(),
            })
            .collect(),
        CategoryContents::Calculators(list) => vec![GroupView {
            id: None,
            name: None,
            description: None,
            path: None,
            calculators: list.iter().map(CalculatorLink::from).collect(),
        }],
    };

    CategoryView {
        id: category.id.to_string(),
        title: format!("{} Calculators", category.name),
        description: category.description.to_string(),
        icon: category.icon.to_string(),
        color_token: category.color_token.to_string(),
        calculator_count: category.calculator_count(),
        groups,
    }
}

/// Only biology has a routed subcategory depth
fn subcategory_path(category: &Category, sub: &Subcategory) -> Option<String> {
    (category.id == "biology").then(|| format!("/category/biology/{}", sub.id))
}

/// Render a subcategory page
pub fn render_subcategory(
    catalog: &Catalog,
    category_id: &str,
    subcategory_id: &str,
) -> SubcategoryRender {
    let found = catalog
        .find_category(category_id)
        .zip(catalog.find_subcategory(category_id, subcategory_id));

    let Some((category, sub)) = found else {
        tracing::warn!("Unknown subcategory '{}/{}'", category_id, subcategory_id);
        return SubcategoryRender::NotFound {
            category_id: category_id.to_string(),
            subcategory_id: subcategory_id.to_string(),
        };
    };

    SubcategoryRender::Found(SubcategoryView {
        category_id: category.id.to_string(),
        category_name: category.name.to_string(),
        category_path: category.path(),
        id: sub.id.to_string(),
        title: format!("{} Calculators", sub.name),
        description: sub.description.to_string(),
        calculator_count: sub.calculators.len(),
        calculators: sub.calculators.iter().map(CalculatorLink::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biology_groups_and_count() {
        let catalog = Catalog::builtin();
        let CategoryRender::Found(view) = render_category(&catalog, "biology") else {
            panic!("biology should render");
        };
        let expected: usize = catalog
            .get_subcategories_for("biology")
            .iter()
            .map(|s| s.calculators.len())
            .sum();
        assert_eq!(view.calculator_count, expected);
        assert_eq!(view.groups.len(), 4);
        assert_eq!(view.groups[0].path.as_deref(), Some("/category/biology/cell-biology"));
        assert_eq!(view.title, "Biology Calculators");
    }

    #[test]
    fn test_chemistry_groups_have_no_subcategory_route() {
        let CategoryRender::Found(view) = render_category(&Catalog::builtin(), "chemistry") else {
            panic!("chemistry should render");
        };
        assert!(view.groups.iter().all(|g| g.path.is_none()));
    }

    #[test]
    fn test_flat_category_single_group() {
        let CategoryRender::Found(view) = render_category(&Catalog::builtin(), "ecology") else {
            panic!("ecology should render");
        };
        assert_eq!(view.groups.len(), 1);
        assert!(view.groups[0].name.is_none());
        assert_eq!(view.calculator_count, view.groups[0].calculators.len());
    }

    #[test]
    fn test_empty_category_renders() {
        let CategoryRender::Found(view) = render_category(&Catalog::builtin(), "finance") else {
            panic!("finance should render");
        };
        assert_eq!(view.calculator_count, 0);
        assert_eq!(view.count_label(), "0 calculators available");
    }

    #[test]
    fn test_unknown_category_not_found() {
        assert_eq!(
            render_category(&Catalog::builtin(), "alchemy"),
            CategoryRender::NotFound {
                category_id: "alchemy".to_string()
            }
        );
    }

    #[test]
    fn test_subcategory_render() {
        let SubcategoryRender::Found(view) =
            render_subcategory(&Catalog::builtin(), "biology", "genetics")
        else {
            panic!("genetics should render");
        };
        assert_eq!(view.category_path, "/category/biology");
        assert_eq!(view.calculator_count, view.calculators.len());
        assert!(view.calculators.iter().any(|c| c.path == "/calculator/punnett-square"));
    }

    #[test]
    fn test_unknown_subcategory_not_found() {
        let render = render_subcategory(&Catalog::builtin(), "biology", "zoology");
        assert!(matches!(render, SubcategoryRender::NotFound { .. }));
    }

    #[test]
    fn test_count_label_singular() {
        assert_eq!(count_label(1), "1 calculator available");
        assert_eq!(count_label(3), "3 calculators available");
    }
}
