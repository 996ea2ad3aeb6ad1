//! Science Calculators
//!
//! Catalog-driven collection of biology, chemistry, ecology and health
//! calculators, served as a small server-rendered web site.
//!
//! Layout:
//! - `catalog/`: static categories, subcategories and calculator metadata
//! - `search_index`: flat, case-folded substring search over the catalog
//! - `view_builder`: category and subcategory page view models
//! - `calculators/`: the calculator leaves, lookup tables and formula parser
//! - `share`: deep links for sharing a result
//! - `config`: environment-driven site configuration
//! - `api_server`, `web/` (feature `web`): axum router, handlers and templates

pub mod calculators;
pub mod catalog;
pub mod config;
pub mod search_index;
pub mod share;
pub mod view_builder;

#[cfg(feature = "web")]
pub mod api_server;

#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use calculators::{Calculator, CalculatorLeaf, Evaluation, FormValues, Registry, ResultView};
pub use catalog::Catalog;
pub use config::{ConfigError, SiteConfig};
pub use search_index::{SearchIndex, SearchResult};
pub use share::{share_links, ShareLink};

#[cfg(feature = "web")]
pub use api_server::{create_router, AppState};
