// Page handlers for HTML rendering with Askama
//
// Every handler is a pure function of its request: the active category filter
// and search text travel in the query string, calculator input in the form body.

use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Form, Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRequest;
use serde::Deserialize;

use crate::api_server::{AppError, AppState, SearchParams};
use crate::calculators::{CalculatorLeaf, Evaluation, FieldKind, FieldSpec, FormValues, ResultField};
use crate::search_index::{ResultKind, SearchResult};
use crate::share::ShareLink;
use crate::view_builder::{
    count_label, render_category, render_subcategory, CalculatorLink, CategoryRender, GroupView,
    SubcategoryRender,
};
use crate::web::markdown;

// ============================================================================
// Shared chrome
// ============================================================================

/// Head and header values common to every page
pub struct Chrome {
    pub site_name: String,
    pub title: String,
    pub meta_description: String,
    pub keywords: String,
    pub canonical_url: String,
}

impl Chrome {
    fn new(state: &AppState, title: impl Into<String>, description: impl Into<String>, path: &str) -> Self {
        Self {
            site_name: state.config.site_name.clone(),
            title: title.into(),
            meta_description: description.into(),
            keywords: String::new(),
            canonical_url: state.config.absolute_url(path),
        }
    }

    fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.join(", ");
        self
    }
}

fn render_page<T: Template>(status: StatusCode, template: &T) -> Result<Response, AppError> {
    let html = template.render()?;
    Ok((status, Html(html)).into_response())
}

// ============================================================================
// Home Page
// ============================================================================

pub struct CategoryCard {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color_token: &'static str,
    pub path: String,
    pub count_label: String,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub cards: Vec<CategoryCard>,
    /// Empty when showing all categories
    pub active_category: String,
    pub active_name: String,
    pub filtered: Vec<CalculatorLink>,
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub total_label: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    pub category: Option<String>,
    #[serde(default)]
    pub q: String,
}

pub async fn home_page(
    State(state): State<AppState>,
    Query(params): Query<HomeParams>,
) -> Result<Response, AppError> {
    let active = params
        .category
        .as_deref()
        .filter(|id| !id.is_empty())
        .and_then(|id| {
            let found = state.catalog.find_category(id);
            if found.is_none() {
                tracing::warn!("Ignoring unknown category filter '{}'", id);
            }
            found
        });

    let cards: Vec<CategoryCard> = state
        .catalog
        .list_categories()
        .iter()
        .map(|c| CategoryCard {
            id: c.id,
            name: c.name,
            description: c.description,
            icon: c.icon,
            color_token: c.color_token,
            path: c.path(),
            count_label: count_label(c.calculator_count()),
            active: active.is_some_and(|a| a.id == c.id),
        })
        .collect();

    let filtered: Vec<CalculatorLink> = active
        .map(|c| c.calculators().into_iter().map(CalculatorLink::from).collect())
        .unwrap_or_default();

    let hits: Vec<SearchHit> = state
        .search_index
        .filter(&params.q)
        .into_iter()
        .map(SearchHit::from)
        .collect();

    let chrome = Chrome::new(
        &state,
        state.config.site_name.clone(),
        "Free online calculators for biology, chemistry, ecology and health.",
        "/",
    );

    let template = HomeTemplate {
        chrome,
        cards,
        active_category: active.map(|c| c.id.to_string()).unwrap_or_default(),
        active_name: active.map(|c| c.name.to_string()).unwrap_or_default(),
        filtered,
        query: params.q,
        hits,
        total_label: count_label(state.catalog.calculator_count()),
    };
    render_page(StatusCode::OK, &template)
}

// ============================================================================
// Category Pages
// ============================================================================

/// One titled (or untitled, for flat categories) block of calculator links
pub struct GroupCard {
    pub heading: String,
    pub description: String,
    pub path: String,
    pub links: Vec<CalculatorLink>,
}

impl From<GroupView> for GroupCard {
    fn from(group: GroupView) -> Self {
        Self {
            heading: group.name.unwrap_or_default(),
            description: group.description.unwrap_or_default(),
            path: group.path.unwrap_or_default(),
            links: group.calculators,
        }
    }
}

#[derive(Template)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub chrome: Chrome,
    pub icon: String,
    pub color_token: String,
    pub heading: String,
    pub description: String,
    pub count_label: String,
    pub calculator_count: usize,
    pub groups: Vec<GroupCard>,
}

pub async fn category_page(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Response, AppError> {
    let view = match render_category(&state.catalog, &category_id) {
        CategoryRender::Found(view) => view,
        CategoryRender::NotFound { category_id } => {
            return not_found(&state, format!("Category \"{}\" not found", category_id));
        }
    };

    let count_label = view.count_label();
    let path = format!("/category/{}", view.id);
    let template = CategoryTemplate {
        chrome: Chrome::new(&state, view.title.clone(), view.description.clone(), &path),
        icon: view.icon,
        color_token: view.color_token,
        heading: view.title,
        description: view.description,
        count_label,
        calculator_count: view.calculator_count,
        groups: view.groups.into_iter().map(GroupCard::from).collect(),
    };
    render_page(StatusCode::OK, &template)
}

#[derive(Template)]
#[template(path = "subcategory.html")]
pub struct SubcategoryTemplate {
    pub chrome: Chrome,
    pub category_name: String,
    pub category_path: String,
    pub heading: String,
    pub description: String,
    pub count_label: String,
    pub links: Vec<CalculatorLink>,
}

/// Only biology has a subcategory depth; other categories 404 here.
pub async fn biology_subcategory_page(
    State(state): State<AppState>,
    Path((category_id, subcategory_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    if category_id != "biology" {
        return not_found(&state, format!("No page at /category/{}/{}", category_id, subcategory_id));
    }
    let view = match render_subcategory(&state.catalog, "biology", &subcategory_id) {
        SubcategoryRender::Found(view) => view,
        SubcategoryRender::NotFound { subcategory_id, .. } => {
            return not_found(&state, format!("Subcategory \"{}\" not found", subcategory_id));
        }
    };

    let count_label = view.count_label();
    let path = format!("/category/biology/{}", view.id);
    let template = SubcategoryTemplate {
        chrome: Chrome::new(&state, view.title.clone(), view.description.clone(), &path),
        category_name: view.category_name,
        category_path: view.category_path,
        heading: view.title,
        description: view.description,
        count_label,
        links: view.calculators,
    };
    render_page(StatusCode::OK, &template)
}

// ============================================================================
// Calculator Pages
// ============================================================================

pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// A form field with its submitted (or default) value filled in
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub unit: &'static str,
    pub placeholder: &'static str,
    pub help: &'static str,
    pub value: String,
    pub required: bool,
    pub invalid: bool,
    pub options: Vec<OptionView>,
}

impl FieldView {
    fn new(field: FieldSpec, form: &FormValues, invalid_field: Option<&str>) -> Self {
        let value = form
            .echo(field.name)
            .or(field.default)
            .unwrap_or_default()
            .to_string();

        let options = match &field.kind {
            FieldKind::Select { options } => {
                let chosen = options
                    .iter()
                    .position(|o| o.value == value)
                    .unwrap_or(0);
                options
                    .iter()
                    .enumerate()
                    .map(|(i, o)| OptionView {
                        value: o.value,
                        label: o.label,
                        selected: i == chosen,
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        Self {
            name: field.name,
            label: field.label,
            kind: field.kind.as_str(),
            unit: field.unit.unwrap_or_default(),
            placeholder: field.placeholder.unwrap_or_default(),
            help: field.help.unwrap_or_default(),
            value,
            required: field.required,
            invalid: invalid_field == Some(field.name),
            options,
        }
    }
}

pub struct SectionView {
    pub title: &'static str,
    pub html: String,
}

/// Result card state: nothing yet, a computed result, or a rejection
#[derive(Default)]
pub struct Outcome {
    pub computed: bool,
    pub rejected: bool,
    pub message: String,
    pub fields: Vec<ResultField>,
    pub table_head: Vec<String>,
    pub table_rows: Vec<Vec<String>>,
    pub notes: Vec<String>,
    pub share_title: String,
    pub share_text: String,
    pub share_url: String,
    pub share_links: Vec<ShareLink>,
}

impl Outcome {
    fn from_evaluation(evaluation: Evaluation, leaf: &dyn CalculatorLeaf, state: &AppState) -> Self {
        match evaluation {
            Evaluation::Computed { result } => {
                let title = leaf.page().title;
                let text = result.share_text(title);
                let url = state.config.absolute_url(&format!("/calculator/{}", leaf.id()));
                let mut rows = result.table.unwrap_or_default().into_iter();
                let table_head = rows.next().unwrap_or_default();
                Self {
                    computed: true,
                    share_links: crate::share::share_links(title, &text, &url),
                    share_title: title.to_string(),
                    share_text: text,
                    share_url: url,
                    fields: result.fields,
                    table_head,
                    table_rows: rows.collect(),
                    notes: result.notes,
                    ..Self::default()
                }
            }
            Evaluation::Rejected { message, .. } => Self {
                rejected: true,
                message,
                ..Self::default()
            },
        }
    }
}

#[derive(Template)]
#[template(path = "calculator.html")]
pub struct CalculatorTemplate {
    pub chrome: Chrome,
    pub calculator_id: &'static str,
    pub heading: &'static str,
    pub description: &'static str,
    pub back_link: &'static str,
    pub back_label: &'static str,
    pub intro_title: &'static str,
    pub intro_html: String,
    pub sections: Vec<SectionView>,
    pub notes: &'static [&'static str],
    pub fields: Vec<FieldView>,
    pub outcome: Outcome,
}

#[derive(Template)]
#[template(path = "partials/result.html")]
pub struct ResultTemplate {
    pub outcome: Outcome,
}

fn calculator_template(
    state: &AppState,
    leaf: &dyn CalculatorLeaf,
    form: &FormValues,
    outcome: Outcome,
    invalid_field: Option<&str>,
) -> CalculatorTemplate {
    let page = leaf.page();
    let path = format!("/calculator/{}", leaf.id());
    CalculatorTemplate {
        chrome: Chrome::new(state, page.title, page.meta_description, &path).keywords(page.keywords),
        calculator_id: leaf.id(),
        heading: page.title,
        description: page.description,
        back_link: page.back_link,
        back_label: page.back_label,
        intro_title: page.introduction.title,
        intro_html: markdown::to_html(page.introduction.content),
        sections: page
            .additional_sections
            .iter()
            .map(|s| SectionView {
                title: s.title,
                html: markdown::to_html(s.content),
            })
            .collect(),
        notes: page.notes,
        fields: leaf
            .fields()
            .into_iter()
            .map(|field| FieldView::new(field, form, invalid_field))
            .collect(),
        outcome,
    }
}

pub async fn calculator_page(
    State(state): State<AppState>,
    Path(calculator_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(leaf) = state.registry.get(&calculator_id) else {
        return not_found(&state, format!("Calculator \"{}\" not found", calculator_id));
    };

    let template = calculator_template(&state, leaf, &FormValues::default(), Outcome::default(), None);
    render_page(StatusCode::OK, &template)
}

/// Evaluate a submitted form. htmx requests get only the result card.
pub async fn evaluate_calculator(
    State(state): State<AppState>,
    Path(calculator_id): Path<String>,
    HxRequest(is_htmx): HxRequest,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let Some(leaf) = state.registry.get(&calculator_id) else {
        return not_found(&state, format!("Calculator \"{}\" not found", calculator_id));
    };

    let form = FormValues::new(values);
    let evaluation = leaf.evaluate(&form);
    if let Some(message) = evaluation.error() {
        tracing::warn!("Rejected input for '{}': {}", calculator_id, message);
    }
    let invalid_field = match &evaluation {
        Evaluation::Rejected { field, .. } => *field,
        Evaluation::Computed { .. } => None,
    };
    let outcome = Outcome::from_evaluation(evaluation, leaf, &state);

    if is_htmx {
        return render_page(StatusCode::OK, &ResultTemplate { outcome });
    }
    let template = calculator_template(&state, leaf, &form, outcome, invalid_field);
    render_page(StatusCode::OK, &template)
}

// ============================================================================
// Search
// ============================================================================

pub struct SearchHit {
    pub name: String,
    pub description: String,
    pub path: String,
    pub kind: &'static str,
    pub parent: String,
}

impl From<&SearchResult> for SearchHit {
    fn from(result: &SearchResult) -> Self {
        Self {
            name: result.name.clone(),
            description: result.description.clone(),
            path: result.path.clone(),
            kind: match result.kind {
                ResultKind::Category => "Category",
                ResultKind::Calculator => "Calculator",
            },
            parent: result.parent_category_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub chrome: Chrome,
    pub query: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Template)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

pub async fn search_page(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let hits: Vec<SearchHit> = state
        .search_index
        .search(&params.q, usize::MAX)
        .into_iter()
        .map(SearchHit::from)
        .collect();

    if is_htmx {
        let template = SearchResultsTemplate {
            query: params.q,
            hits,
        };
        return render_page(StatusCode::OK, &template);
    }

    let template = SearchTemplate {
        chrome: Chrome::new(&state, "Search", "Search all science calculators.", "/search"),
        query: params.q,
        hits,
    };
    render_page(StatusCode::OK, &template)
}

// ============================================================================
// Not Found
// ============================================================================

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: Chrome,
    pub message: String,
}

fn not_found(state: &AppState, message: String) -> Result<Response, AppError> {
    tracing::warn!("{}", message);
    let template = NotFoundTemplate {
        chrome: Chrome::new(state, "Page Not Found", message.clone(), "/"),
        message,
    };
    render_page(StatusCode::NOT_FOUND, &template)
}

pub async fn not_found_page(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    not_found(&state, format!("No page at {}", uri.path()))
}
