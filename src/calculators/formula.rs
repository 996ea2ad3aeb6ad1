//! Chemical formula parser.
//!
//! Accepts element symbols with optional counts, nested `()` / `[]` groups
//! and hydrate separators (`·`, `*` or `.`) with an optional leading
//! multiplier, e.g. `Ca(OH)2`, `K4[Fe(CN)6]`, `CuSO4·5H2O`.
//!
//! Shared by molecular weight, percent composition, stoichiometry, mole and
//! molarity calculators.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::calculators::lookup_tables::{self, Element};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("Enter a chemical formula")]
    Empty,

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Unexpected character '{0}' in formula")]
    InvalidCharacter(char),

    #[error("Unbalanced parentheses in formula")]
    UnbalancedParentheses,

    #[error("Invalid count in formula")]
    InvalidCount,
}

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<element>[A-Z][a-z]?)|(?P<open>[(\[])|(?P<close>[)\]]))")
        .expect("formula token pattern")
});

static COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+").expect("formula count pattern"));

const HYDRATE_SEPARATORS: [char; 3] = ['·', '*', '.'];

// ============================================================================
// Composition
// ============================================================================

/// Atom count of one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementCount {
    pub element: &'static Element,
    pub count: u64,
}

/// One element's share of the formula mass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementShare {
    pub symbol: &'static str,
    pub name: &'static str,
    pub count: u64,
    pub atomic_mass: f64,
    /// count × atomic mass, g/mol
    pub mass: f64,
    pub mass_percent: f64,
}

/// Parsed formula: element counts in order of first appearance
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    counts: Vec<ElementCount>,
}

impl Composition {
    fn new() -> Self {
        Self { counts: Vec::new() }
    }

    fn add(&mut self, element: &'static Element, count: u64) -> Result<(), FormulaError> {
        match self
            .counts
            .iter_mut()
            .find(|c| c.element.symbol == element.symbol)
        {
            Some(existing) => {
                existing.count = existing
                    .count
                    .checked_add(count)
                    .ok_or(FormulaError::InvalidCount)?;
            }
            None => self.counts.push(ElementCount { element, count }),
        }
        Ok(())
    }

    fn merge(&mut self, other: &Composition, multiplier: u64) -> Result<(), FormulaError> {
        for c in &other.counts {
            let scaled = c
                .count
                .checked_mul(multiplier)
                .ok_or(FormulaError::InvalidCount)?;
            self.add(c.element, scaled)?;
        }
        Ok(())
    }

    pub fn counts(&self) -> &[ElementCount] {
        &self.counts
    }

    pub fn count_of(&self, symbol: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.element.symbol == symbol)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn total_atoms(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Molar mass in g/mol
    pub fn molar_mass(&self) -> f64 {
        self.counts
            .iter()
            .map(|c| c.element.mass * c.count as f64)
            .sum()
    }

    /// Per-element mass contributions and percentages
    pub fn breakdown(&self) -> Vec<ElementShare> {
        let total = self.molar_mass();
        self.counts
            .iter()
            .map(|c| {
                let mass = c.element.mass * c.count as f64;
                ElementShare {
                    symbol: c.element.symbol,
                    name: c.element.name,
                    count: c.count,
                    atomic_mass: c.element.mass,
                    mass,
                    mass_percent: if total > 0.0 { mass / total * 100.0 } else { 0.0 },
                }
            })
            .collect()
    }

    /// Hill-order-free rendering such as "C6H12O6"
    pub fn to_formula_string(&self) -> String {
        self.counts
            .iter()
            .map(|c| match c.count {
                1 => c.element.symbol.to_string(),
                n => format!("{}{}", c.element.symbol, n),
            })
            .collect()
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a chemical formula into its element composition
pub fn parse_formula(formula: &str) -> Result<Composition, FormulaError> {
    let compact: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(FormulaError::Empty);
    }

    let mut composition = Composition::new();
    for part in compact.split(HYDRATE_SEPARATORS) {
        if part.is_empty() {
            return Err(FormulaError::Empty);
        }
        let (multiplier, rest) = take_count(part)?;
        if rest.is_empty() {
            return Err(FormulaError::InvalidCount);
        }
        let parsed = parse_part(rest)?;
        composition.merge(&parsed, multiplier)?;
    }

    // total_atoms must fit as well
    composition
        .counts
        .iter()
        .try_fold(0u64, |total, c| total.checked_add(c.count))
        .ok_or(FormulaError::InvalidCount)?;

    Ok(composition)
}

/// Convenience: molar mass of a formula in g/mol
pub fn molar_mass(formula: &str) -> Result<f64, FormulaError> {
    parse_formula(formula).map(|c| c.molar_mass())
}

/// Leading count, defaulting to 1. Zero is rejected.
fn take_count(input: &str) -> Result<(u64, &str), FormulaError> {
    match COUNT.find(input) {
        Some(m) => {
            let n: u64 = m.as_str().parse().map_err(|_| FormulaError::InvalidCount)?;
            if n == 0 {
                return Err(FormulaError::InvalidCount);
            }
            Ok((n, &input[m.end()..]))
        }
        None => Ok((1, input)),
    }
}

fn parse_part(part: &str) -> Result<Composition, FormulaError> {
    // Each open group remembers the bracket that must close it
    let mut stack: Vec<(Composition, Option<char>)> = vec![(Composition::new(), None)];
    let mut rest = part;

    while !rest.is_empty() {
        let Some(caps) = TOKEN.captures(rest) else {
            let c = rest.chars().next().unwrap_or('?');
            return Err(if c.is_ascii_digit() {
                FormulaError::InvalidCount
            } else {
                FormulaError::InvalidCharacter(c)
            });
        };
        let consumed = caps.get(0).map(|m| m.end()).unwrap_or(0);
        rest = &rest[consumed..];

        if let Some(symbol) = caps.name("element") {
            let element = lookup_tables::element(symbol.as_str())
                .ok_or_else(|| FormulaError::UnknownElement(symbol.as_str().to_string()))?;
            let (count, after) = take_count(rest)?;
            rest = after;
            if let Some((top, _)) = stack.last_mut() {
                top.add(element, count)?;
            }
        } else if let Some(open) = caps.name("open") {
            let closer = if open.as_str() == "(" { ')' } else { ']' };
            stack.push((Composition::new(), Some(closer)));
        } else if let Some(close) = caps.name("close") {
            if stack.len() < 2 {
                return Err(FormulaError::UnbalancedParentheses);
            }
            let (group, closer) = stack.pop().ok_or(FormulaError::UnbalancedParentheses)?;
            if closer != close.as_str().chars().next() {
                return Err(FormulaError::UnbalancedParentheses);
            }
            let (count, after) = take_count(rest)?;
            rest = after;
            let (parent, _) = stack
                .last_mut()
                .ok_or(FormulaError::UnbalancedParentheses)?;
            parent.merge(&group, count)?;
        }
    }

    if stack.len() != 1 {
        return Err(FormulaError::UnbalancedParentheses);
    }
    stack
        .pop()
        .map(|(composition, _)| composition)
        .ok_or(FormulaError::UnbalancedParentheses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_water() {
        let water = parse_formula("H2O").unwrap();
        assert_eq!(water.count_of("H"), 2);
        assert_eq!(water.count_of("O"), 1);
        assert_abs_diff_eq!(water.molar_mass(), 18.015, epsilon = 1e-3);
    }

    #[test]
    fn test_glucose() {
        assert_abs_diff_eq!(molar_mass("C6H12O6").unwrap(), 180.156, epsilon = 1e-2);
    }

    #[test]
    fn test_groups() {
        let c = parse_formula("Ca(OH)2").unwrap();
        assert_eq!(c.count_of("O"), 2);
        assert_eq!(c.count_of("H"), 2);
        assert_eq!(c.to_formula_string(), "CaO2H2");

        let c = parse_formula("K4[Fe(CN)6]").unwrap();
        assert_eq!(c.count_of("K"), 4);
        assert_eq!(c.count_of("C"), 6);
        assert_eq!(c.count_of("N"), 6);
        assert_eq!(c.count_of("Fe"), 1);
    }

    #[test]
    fn test_hydrate() {
        let c = parse_formula("CuSO4·5H2O").unwrap();
        assert_eq!(c.count_of("H"), 10);
        assert_eq!(c.count_of("O"), 9);
        assert_abs_diff_eq!(c.molar_mass(), 249.68, epsilon = 0.02);
        assert_eq!(parse_formula("CuSO4*5H2O").unwrap(), c);
    }

    #[test]
    fn test_repeated_elements_merge() {
        let c = parse_formula("CH3COOH").unwrap();
        assert_eq!(c.counts().len(), 3);
        assert_eq!(c.count_of("C"), 2);
        assert_eq!(c.count_of("H"), 4);
        assert_eq!(c.count_of("O"), 2);
    }

    #[test]
    fn test_case_distinguishes_elements() {
        assert_eq!(parse_formula("Co").unwrap().count_of("Co"), 1);
        let co = parse_formula("CO").unwrap();
        assert_eq!(co.count_of("C"), 1);
        assert_eq!(co.count_of("O"), 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_formula("  "), Err(FormulaError::Empty));
        assert_eq!(
            parse_formula("Xx2O"),
            Err(FormulaError::UnknownElement("Xx".to_string()))
        );
        assert_eq!(
            parse_formula("Xx2O").unwrap_err().to_string(),
            "Unknown element: Xx"
        );
        assert_eq!(parse_formula("h2o"), Err(FormulaError::InvalidCharacter('h')));
        assert_eq!(parse_formula("Ca(OH2"), Err(FormulaError::UnbalancedParentheses));
        assert_eq!(parse_formula("CaOH)2"), Err(FormulaError::UnbalancedParentheses));
        assert_eq!(parse_formula("H0"), Err(FormulaError::InvalidCount));
        assert_eq!(parse_formula("CuSO4·"), Err(FormulaError::Empty));
    }

    #[test]
    fn test_brackets_must_match() {
        assert_eq!(parse_formula("Ca(OH]2"), Err(FormulaError::UnbalancedParentheses));
        assert_eq!(parse_formula("K4[Fe(CN]6)"), Err(FormulaError::UnbalancedParentheses));
        assert_eq!(parse_formula("[H2O)"), Err(FormulaError::UnbalancedParentheses));
        assert!(parse_formula("K4[Fe(CN)6]").is_ok());
    }

    #[test]
    fn test_oversized_counts_are_rejected() {
        assert_eq!(
            parse_formula("((H4294967296)4294967296)4294967296"),
            Err(FormulaError::InvalidCount)
        );
        assert_eq!(
            parse_formula("(H99999999999)99999999999"),
            Err(FormulaError::InvalidCount)
        );
        assert_eq!(
            parse_formula("H18446744073709551615H1"),
            Err(FormulaError::InvalidCount)
        );
        assert_eq!(
            parse_formula("H18446744073709551615C1"),
            Err(FormulaError::InvalidCount)
        );
        assert_eq!(parse_formula("H99999999999999999999"), Err(FormulaError::InvalidCount));
    }

    #[test]
    fn test_breakdown_percentages_sum_to_100() {
        let shares = parse_formula("NaCl").unwrap().breakdown();
        let total: f64 = shares.iter().map(|s| s.mass_percent).sum();
        assert_abs_diff_eq!(total, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shares[0].mass_percent, 39.34, epsilon = 0.01);
    }
}
