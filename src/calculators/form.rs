//! Form input handling shared by every calculator.
//!
//! - `FormValues`: submitted field values with typed accessors
//! - `FieldSpec`: how a field is rendered (label, kind, unit, options)
//! - `ValidationError`: the inline message shown when input is rejected

use std::collections::HashMap;

use serde::Serialize;

use crate::calculators::formula::FormulaError;

// ============================================================================
// Validation errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Missing {
        field: &'static str,
        label: &'static str,
    },

    #[error("{label} must be a number")]
    NotANumber {
        field: &'static str,
        label: &'static str,
    },

    #[error("{label} must be greater than zero")]
    NotPositive {
        field: &'static str,
        label: &'static str,
    },

    #[error("{label} cannot be negative")]
    Negative {
        field: &'static str,
        label: &'static str,
    },

    #[error("{label} must be a whole number")]
    NotAWholeNumber {
        field: &'static str,
        label: &'static str,
    },

    #[error("{label} is too large")]
    TooLarge {
        field: &'static str,
        label: &'static str,
    },

    #[error("{label}: unrecognized option \"{value}\"")]
    UnknownOption {
        field: &'static str,
        label: &'static str,
        value: String,
    },

    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// A calculator-specific precondition, e.g. "Systolic must exceed diastolic"
    #[error("{0}")]
    Precondition(String),
}

impl ValidationError {
    pub fn precondition(message: impl Into<String>) -> Self {
        ValidationError::Precondition(message.into())
    }

    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Missing { field, .. }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotAWholeNumber { field, .. }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::UnknownOption { field, .. } => Some(*field),
            ValidationError::Formula(_) | ValidationError::Precondition(_) => None,
        }
    }
}

// ============================================================================
// Enumerated options
// ============================================================================

/// An enum offered as a select field
pub trait FieldOptions: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Form value
    fn value(&self) -> &'static str;

    /// Display label
    fn label(&self) -> &'static str;
}

// ============================================================================
// Submitted values
// ============================================================================

/// Largest accepted count: every integer up to 2^53 is exact as `f64`, and
/// sums of a few such counts stay far below `u64::MAX`.
pub const MAX_COUNT: u64 = 1 << 53;

/// Submitted form values keyed by field name
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    values: HashMap<String, String>,
}

impl FormValues {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Trimmed value, `None` when missing or blank
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Value as submitted, for re-populating the form
    pub fn echo(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_blank(&self, name: &str) -> bool {
        self.raw(name).is_none()
    }

    pub fn text(&self, name: &'static str, label: &'static str) -> Result<String, ValidationError> {
        self.raw(name)
            .map(str::to_string)
            .ok_or(ValidationError::Missing { field: name, label })
    }

    pub fn optional_number(
        &self,
        name: &'static str,
        label: &'static str,
    ) -> Result<Option<f64>, ValidationError> {
        let Some(raw) = self.raw(name) else {
            return Ok(None);
        };
        match raw.replace(',', "").parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(ValidationError::NotANumber { field: name, label }),
        }
    }

    pub fn number(&self, name: &'static str, label: &'static str) -> Result<f64, ValidationError> {
        self.optional_number(name, label)?
            .ok_or(ValidationError::Missing { field: name, label })
    }

    /// Required number strictly greater than zero
    pub fn positive(&self, name: &'static str, label: &'static str) -> Result<f64, ValidationError> {
        let value = self.number(name, label)?;
        if value <= 0.0 {
            return Err(ValidationError::NotPositive { field: name, label });
        }
        Ok(value)
    }

    pub fn optional_positive(
        &self,
        name: &'static str,
        label: &'static str,
    ) -> Result<Option<f64>, ValidationError> {
        match self.optional_number(name, label)? {
            Some(v) if v <= 0.0 => Err(ValidationError::NotPositive { field: name, label }),
            other => Ok(other),
        }
    }

    /// Required number greater than or equal to zero
    pub fn non_negative(
        &self,
        name: &'static str,
        label: &'static str,
    ) -> Result<f64, ValidationError> {
        let value = self.number(name, label)?;
        if value < 0.0 {
            return Err(ValidationError::Negative { field: name, label });
        }
        Ok(value)
    }

    /// Required non-negative integer, at most [`MAX_COUNT`]
    pub fn count(&self, name: &'static str, label: &'static str) -> Result<u64, ValidationError> {
        let value = self.non_negative(name, label)?;
        if value.fract() != 0.0 {
            return Err(ValidationError::NotAWholeNumber { field: name, label });
        }
        if value > MAX_COUNT as f64 {
            return Err(ValidationError::TooLarge { field: name, label });
        }
        Ok(value as u64)
    }

    /// Enumerated selection; falls back to `T::ALL[0]` when blank
    pub fn choice<T: FieldOptions>(
        &self,
        name: &'static str,
        label: &'static str,
    ) -> Result<T, ValidationError> {
        let Some(raw) = self.raw(name) else {
            return T::ALL
                .first()
                .copied()
                .ok_or(ValidationError::Missing { field: name, label });
        };
        T::ALL
            .iter()
            .find(|option| option.value() == raw)
            .copied()
            .ok_or_else(|| ValidationError::UnknownOption {
                field: name,
                label,
                value: raw.to_string(),
            })
    }
}

// ============================================================================
// Field specs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Text,
    TextArea,
    Select { options: Vec<SelectOption> },
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Select { .. } => "select",
        }
    }
}

/// One form field as rendered on the calculator page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub unit: Option<&'static str>,
    pub placeholder: Option<&'static str>,
    pub help: Option<&'static str>,
    pub default: Option<&'static str>,
    pub required: bool,
}

impl FieldSpec {
    fn with_kind(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            unit: None,
            placeholder: None,
            help: None,
            default: None,
            required: true,
        }
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::with_kind(name, label, FieldKind::Number)
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::with_kind(name, label, FieldKind::Text)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::with_kind(name, label, FieldKind::TextArea)
    }

    pub fn select(name: &'static str, label: &'static str, options: Vec<SelectOption>) -> Self {
        Self::with_kind(name, label, FieldKind::Select { options })
    }

    /// Select field listing every variant of `T`
    pub fn choice<T: FieldOptions>(name: &'static str, label: &'static str) -> Self {
        let options = T::ALL
            .iter()
            .map(|o| SelectOption {
                value: o.value(),
                label: o.label(),
            })
            .collect();
        Self::select(name, label, options)
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Shape {
        Round,
        Square,
    }

    impl FieldOptions for Shape {
        const ALL: &'static [Self] = &[Shape::Round, Shape::Square];

        fn value(&self) -> &'static str {
            match self {
                Shape::Round => "round",
                Shape::Square => "square",
            }
        }

        fn label(&self) -> &'static str {
            match self {
                Shape::Round => "Round",
                Shape::Square => "Square",
            }
        }
    }

    #[test]
    fn test_blank_values_are_missing() {
        let form = FormValues::from_pairs([("a", "   ")]);
        assert_eq!(form.raw("a"), None);
        assert_eq!(
            form.number("a", "A"),
            Err(ValidationError::Missing { field: "a", label: "A" })
        );
        assert_eq!(form.optional_number("a", "A"), Ok(None));
    }

    #[test]
    fn test_number_parsing() {
        let form = FormValues::from_pairs([("a", " 1,250.5 "), ("b", "abc"), ("c", "inf")]);
        assert_eq!(form.number("a", "A"), Ok(1250.5));
        assert!(matches!(form.number("b", "B"), Err(ValidationError::NotANumber { .. })));
        assert!(matches!(form.number("c", "C"), Err(ValidationError::NotANumber { .. })));
    }

    #[test]
    fn test_positive_and_count() {
        let form = FormValues::from_pairs([("zero", "0"), ("half", "2.5"), ("n", "7")]);
        assert_eq!(
            form.positive("zero", "Zero").unwrap_err().to_string(),
            "Zero must be greater than zero"
        );
        assert!(matches!(
            form.count("half", "Half"),
            Err(ValidationError::NotAWholeNumber { .. })
        ));
        assert_eq!(form.count("n", "N"), Ok(7));
    }

    #[test]
    fn test_count_upper_bound() {
        let form = FormValues::from_pairs([("huge", "1e20"), ("edge", "9007199254740992")]);
        let err = form.count("huge", "Huge").unwrap_err();
        assert_eq!(err, ValidationError::TooLarge { field: "huge", label: "Huge" });
        assert_eq!(err.to_string(), "Huge is too large");
        assert_eq!(form.count("edge", "Edge"), Ok(MAX_COUNT));
    }

    #[test]
    fn test_choice() {
        let form = FormValues::from_pairs([("shape", "square"), ("bad", "hexagon")]);
        assert_eq!(form.choice::<Shape>("shape", "Shape"), Ok(Shape::Square));
        assert_eq!(form.choice::<Shape>("missing", "Shape"), Ok(Shape::Round));
        let err = form.choice::<Shape>("bad", "Shape").unwrap_err();
        assert_eq!(err.field(), Some("bad"));
        assert_eq!(err.to_string(), "Shape: unrecognized option \"hexagon\"");
    }

    #[test]
    fn test_choice_field_spec_lists_options() {
        let spec = FieldSpec::choice::<Shape>("shape", "Shape");
        match spec.kind {
            FieldKind::Select { options } => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[1].value, "square");
            }
            other => panic!("expected select, got {:?}", other),
        }
    }
}
