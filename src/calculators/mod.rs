//! Calculator Leaves
//!
//! Every calculator implements [`Calculator`]: parse typed input from the
//! submitted form, check its preconditions, compute a deterministic result and
//! render it as labeled fields. The generic page shell hosts any of them
//! through the object-safe [`CalculatorLeaf`] view.
//!
//! ## Modules
//! - `cell_biology`, `genetics`, `molecular_biology`, `biochemistry`
//! - `general_chemistry`, `solutions`, `gas_laws`, `kinetics`
//! - `ecology`, `health`
//! - `lookup_tables`, `formula`: shared reference data and formula parsing

use rustc_hash::FxHashMap;
use serde::Serialize;

pub mod form;
pub mod format;
pub mod formula;
pub mod lookup_tables;

pub mod biochemistry;
pub mod cell_biology;
pub mod ecology;
pub mod gas_laws;
pub mod general_chemistry;
pub mod genetics;
pub mod health;
pub mod kinetics;
pub mod molecular_biology;
pub mod solutions;

pub use form::{FieldKind, FieldOptions, FieldSpec, FormValues, SelectOption, ValidationError};

// ============================================================================
// Page contract
// ============================================================================

/// Titled block of Markdown copy (introduction, guide, FAQ)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub content: &'static str,
}

/// Everything the page shell needs to present a calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculatorPage {
    pub title: &'static str,
    pub description: &'static str,
    pub meta_description: &'static str,
    pub keywords: &'static [&'static str],
    pub back_link: &'static str,
    pub back_label: &'static str,
    pub introduction: Section,
    pub additional_sections: &'static [Section],
    pub notes: &'static [&'static str],
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultField {
    pub label: String,
    pub value: String,
    /// Headline figures are shown large and go into the share text
    pub primary: bool,
}

/// Rendered result card
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ResultView {
    pub fields: Vec<ResultField>,
    /// Optional tabular breakdown (header row first)
    pub table: Option<Vec<Vec<String>>>,
    pub notes: Vec<String>,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(ResultField {
            label: label.into(),
            value: value.into(),
            primary: true,
        });
        self
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(ResultField {
            label: label.into(),
            value: value.into(),
            primary: false,
        });
        self
    }

    pub fn table(mut self, rows: Vec<Vec<String>>) -> Self {
        self.table = Some(rows);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    /// Share text: the calculator title followed by the headline figures
    pub fn share_text(&self, title: &str) -> String {
        let mut lines = vec![format!("{} results:", title)];
        lines.extend(
            self.fields
                .iter()
                .filter(|f| f.primary)
                .map(|f| format!("{}: {}", f.label, f.value)),
        );
        lines.join("\n")
    }
}

/// Outcome of submitting a calculator form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    Computed { result: ResultView },
    Rejected {
        message: String,
        field: Option<&'static str>,
    },
}

impl Evaluation {
    pub fn rejected(error: &ValidationError) -> Self {
        Evaluation::Rejected {
            message: error.to_string(),
            field: error.field(),
        }
    }

    pub fn result(&self) -> Option<&ResultView> {
        match self {
            Evaluation::Computed { result } => Some(result),
            Evaluation::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Evaluation::Computed { .. } => None,
            Evaluation::Rejected { message, .. } => Some(message),
        }
    }
}

// ============================================================================
// Calculator traits
// ============================================================================

/// A self-contained calculator: typed input, closed-form computation
pub trait Calculator: Send + Sync + 'static {
    type Input;
    type Output;

    /// Catalog id, also the route slug
    fn id(&self) -> &'static str;

    fn page(&self) -> &'static CalculatorPage;

    fn fields(&self) -> Vec<FieldSpec>;

    /// Read typed input from the submitted form
    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError>;

    /// Cross-field preconditions
    fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Deterministic, side-effect-free computation on validated input
    fn compute(&self, input: &Self::Input) -> Self::Output;

    fn render(&self, output: &Self::Output) -> ResultView;
}

/// Object-safe view of a calculator, used by the registry and page shell
pub trait CalculatorLeaf: Send + Sync {
    fn id(&self) -> &'static str;
    fn page(&self) -> &'static CalculatorPage;
    fn fields(&self) -> Vec<FieldSpec>;
    fn evaluate(&self, form: &FormValues) -> Evaluation;
}

impl<C: Calculator> CalculatorLeaf for C {
    fn id(&self) -> &'static str {
        Calculator::id(self)
    }

    fn page(&self) -> &'static CalculatorPage {
        Calculator::page(self)
    }

    fn fields(&self) -> Vec<FieldSpec> {
        Calculator::fields(self)
    }

    fn evaluate(&self, form: &FormValues) -> Evaluation {
        let checked = self
            .parse(form)
            .and_then(|input| self.validate(&input).map(|()| input));

        match checked {
            Ok(input) => {
                let output = self.compute(&input);
                tracing::debug!("Computed '{}'", Calculator::id(self));
                Evaluation::Computed {
                    result: self.render(&output),
                }
            }
            Err(e) => {
                tracing::debug!("Rejected '{}' input: {}", Calculator::id(self), e);
                Evaluation::rejected(&e)
            }
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("calculator '{0}' registered twice")]
    Duplicate(&'static str),
}

/// Calculator id → implementation
#[derive(Default)]
pub struct Registry {
    leaves: Vec<Box<dyn CalculatorLeaf>>,
    index: FxHashMap<&'static str, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, leaf: Box<dyn CalculatorLeaf>) -> Result<(), RegistryError> {
        let id = leaf.id();
        if self.index.contains_key(id) {
            return Err(RegistryError::Duplicate(id));
        }
        self.index.insert(id, self.leaves.len());
        self.leaves.push(leaf);
        Ok(())
    }

    /// Every calculator published on the site
    pub fn builtin() -> Result<Self, RegistryError> {
        let leaves: Vec<Box<dyn CalculatorLeaf>> = vec![
            // Biology
            Box::new(cell_biology::CellSize),
            Box::new(cell_biology::DoublingTime),
            Box::new(cell_biology::Hemocytometer),
            Box::new(genetics::HardyWeinberg),
            Box::new(genetics::AlleleFrequency),
            Box::new(genetics::PunnettSquare),
            Box::new(molecular_biology::DnaTranscription),
            Box::new(molecular_biology::DnaConcentration),
            Box::new(molecular_biology::PrimerTm),
            Box::new(biochemistry::MichaelisMenten),
            Box::new(biochemistry::LineweaverBurk),
            Box::new(biochemistry::ProteinMolecularWeight),
            // Chemistry
            Box::new(general_chemistry::MolecularWeight),
            Box::new(general_chemistry::PercentComposition),
            Box::new(general_chemistry::Stoichiometry),
            Box::new(general_chemistry::MoleCalculator),
            Box::new(solutions::Molarity),
            Box::new(solutions::SolutionDilution),
            Box::new(solutions::Ph),
            Box::new(solutions::BufferPh),
            Box::new(gas_laws::IdealGas),
            Box::new(kinetics::HalfLife),
            // Ecology
            Box::new(ecology::PopulationGrowth),
            Box::new(ecology::ShannonDiversity),
            Box::new(ecology::MarkRecapture),
            // Health
            Box::new(health::BloodPressure),
            Box::new(health::MetabolicRate),
            Box::new(health::Bmi),
        ];

        let mut registry = Self::new();
        for leaf in leaves {
            registry.register(leaf)?;
        }
        tracing::debug!("Registered {} calculators", registry.len());
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&dyn CalculatorLeaf> {
        self.index.get(id).map(|&i| self.leaves[i].as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.leaves.iter().map(|leaf| leaf.id())
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}
