//! General chemistry calculators built on the formula parser.

use crate::calculators::form::{FieldOptions, FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, with_unit};
use crate::calculators::formula::{parse_formula, Composition, ElementShare};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

const BACK_LINK: &str = "/category/chemistry";
const BACK_LABEL: &str = "Chemistry Calculators";

/// Avogadro constant, mol⁻¹ (exact since 2019 SI)
pub const AVOGADRO: f64 = 6.022_140_76e23;

fn read_formula(form: &FormValues, label: &'static str) -> Result<(String, Composition), ValidationError> {
    read_formula_field(form, "formula", label)
}

fn read_formula_field(
    form: &FormValues,
    name: &'static str,
    label: &'static str,
) -> Result<(String, Composition), ValidationError> {
    let text = form.text(name, label)?;
    let composition = parse_formula(&text)?;
    Ok((text, composition))
}

fn breakdown_table(shares: &[ElementShare]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Element".to_string(),
        "Atoms".to_string(),
        "Atomic mass".to_string(),
        "Mass (g/mol)".to_string(),
        "Mass %".to_string(),
    ]];
    rows.extend(shares.iter().map(|s| {
        vec![
            format!("{} ({})", s.name, s.symbol),
            s.count.to_string(),
            number(s.atomic_mass, 3),
            number(s.mass, 3),
            format!("{}%", number(s.mass_percent, 2)),
        ]
    }));
    rows
}

// ============================================================================
// Molecular Weight
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FormulaMass {
    pub formula: String,
    pub molar_mass: f64,
    pub total_atoms: u64,
    pub breakdown: Vec<ElementShare>,
}

impl FormulaMass {
    fn of(formula: &str, composition: &Composition) -> Self {
        Self {
            formula: formula.to_string(),
            molar_mass: composition.molar_mass(),
            total_atoms: composition.total_atoms(),
            breakdown: composition.breakdown(),
        }
    }
}

pub struct MolecularWeight;

static MOLECULAR_WEIGHT_PAGE: CalculatorPage = CalculatorPage {
    title: "Molecular Weight Calculator",
    description: "Calculate the molar mass of any chemical formula, including groups and hydrates.",
    meta_description: "Molecular weight calculator: molar mass in g/mol with an element-by-element breakdown.",
    keywords: &["molecular weight", "molar mass", "formula mass", "g/mol"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Molar mass",
        content: "The molar mass of a compound is the sum of the standard atomic weights of \
its atoms. Water, H₂O, weighs 2 × 1.008 + 15.999 ≈ 18.015 g/mol.",
    },
    additional_sections: &[Section {
        title: "Formula syntax",
        content: "- Element symbols are case sensitive: `Co` is cobalt, `CO` carbon monoxide\n\
- Groups use parentheses or brackets: `Ca(OH)2`, `K4[Fe(CN)6]`\n\
- Hydrates use a dot: `CuSO4·5H2O` or `CuSO4.5H2O`",
    }],
    notes: &[],
};

impl Calculator for MolecularWeight {
    type Input = (String, Composition);
    type Output = FormulaMass;

    fn id(&self) -> &'static str {
        "molecular-weight"
    }

    fn page(&self) -> &'static CalculatorPage {
        &MOLECULAR_WEIGHT_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::text("formula", "Chemical formula").placeholder("C6H12O6")]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        read_formula(form, "Chemical formula")
    }

    fn compute(&self, (formula, composition): &Self::Input) -> Self::Output {
        FormulaMass::of(formula, composition)
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        ResultView::new()
            .primary(
                format!("Molar mass of {}", output.formula),
                with_unit(output.molar_mass, 3, "g/mol"),
            )
            .field("Total atoms", output.total_atoms.to_string())
            .field("Elements", output.breakdown.len().to_string())
            .table(breakdown_table(&output.breakdown))
    }
}

// ============================================================================
// Percent Composition
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PercentCompositionInput {
    pub formula: String,
    pub composition: Composition,
    /// Optional sample mass in g, to report grams of each element
    pub sample_mass: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PercentCompositionOutput {
    pub mass: FormulaMass,
    pub sample_mass: Option<f64>,
}

pub struct PercentComposition;

static PERCENT_COMPOSITION_PAGE: CalculatorPage = CalculatorPage {
    title: "Percent Composition Calculator",
    description: "Find the mass percentage of each element in a compound.",
    meta_description: "Percent composition by mass calculator for any chemical formula.",
    keywords: &["percent composition", "mass percent", "elemental analysis"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Mass percent",
        content: "Each element's mass percent is its total mass in the formula divided by \
the molar mass, times 100. The percentages always add up to 100%.",
    },
    additional_sections: &[],
    notes: &[],
};

impl Calculator for PercentComposition {
    type Input = PercentCompositionInput;
    type Output = PercentCompositionOutput;

    fn id(&self) -> &'static str {
        "percent-composition"
    }

    fn page(&self) -> &'static CalculatorPage {
        &PERCENT_COMPOSITION_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("formula", "Chemical formula").placeholder("NaCl"),
            FieldSpec::number("sample_mass", "Sample mass").unit("g").optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let (formula, composition) = read_formula(form, "Chemical formula")?;
        Ok(PercentCompositionInput {
            formula,
            composition,
            sample_mass: form.optional_positive("sample_mass", "Sample mass")?,
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        PercentCompositionOutput {
            mass: FormulaMass::of(&input.formula, &input.composition),
            sample_mass: input.sample_mass,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new();
        for share in &output.mass.breakdown {
            view = view.primary(share.symbol, format!("{}%", number(share.mass_percent, 2)));
        }
        if let Some(sample) = output.sample_mass {
            for share in &output.mass.breakdown {
                view = view.field(
                    format!("{} in {} g sample", share.symbol, number(sample, 2)),
                    with_unit(sample * share.mass_percent / 100.0, 4, "g"),
                );
            }
        }
        view.field("Molar mass", with_unit(output.mass.molar_mass, 3, "g/mol"))
            .table(breakdown_table(&output.mass.breakdown))
    }
}

// ============================================================================
// Stoichiometry
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub reactant: String,
    pub reactant_molar_mass: f64,
    pub reactant_coefficient: u64,
    pub reactant_mass: f64,
    pub product: String,
    pub product_molar_mass: f64,
    pub product_coefficient: u64,
    pub actual_yield: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometryOutput {
    pub reactant_moles: f64,
    pub product_moles: f64,
    pub theoretical_yield: f64,
    /// Percent, when an actual yield was entered
    pub percent_yield: Option<f64>,
    pub product: String,
}

pub struct Stoichiometry;

static STOICHIOMETRY_PAGE: CalculatorPage = CalculatorPage {
    title: "Stoichiometry Calculator",
    description: "Calculate theoretical yield and percent yield from a balanced reaction.",
    meta_description: "Stoichiometry calculator: grams of reactant to grams of product and percent yield.",
    keywords: &["stoichiometry", "theoretical yield", "percent yield", "mole ratio"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Mass to mass",
        content: "Convert the reactant mass to moles with its molar mass, scale by the mole \
ratio from the balanced equation, then convert back to grams of product.",
    },
    additional_sections: &[Section {
        title: "Example",
        content: "For 2 H2 + O2 → 2 H2O, 4.03 g of H2 is 2 mol, giving 2 mol or \
36.03 g of water.",
    }],
    notes: &["The reactant entered is assumed to be the limiting reagent."],
};

impl Calculator for Stoichiometry {
    type Input = Reaction;
    type Output = StoichiometryOutput;

    fn id(&self) -> &'static str {
        "stoichiometry"
    }

    fn page(&self) -> &'static CalculatorPage {
        &STOICHIOMETRY_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("reactant", "Reactant formula").placeholder("H2"),
            FieldSpec::number("reactant_coefficient", "Reactant coefficient").default_value("1"),
            FieldSpec::number("reactant_mass", "Reactant mass").unit("g"),
            FieldSpec::text("product", "Product formula").placeholder("H2O"),
            FieldSpec::number("product_coefficient", "Product coefficient").default_value("1"),
            FieldSpec::number("actual_yield", "Actual yield").unit("g").optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let (reactant, reactant_composition) =
            read_formula_field(form, "reactant", "Reactant formula")?;
        let (product, product_composition) = read_formula_field(form, "product", "Product formula")?;
        Ok(Reaction {
            reactant,
            reactant_molar_mass: reactant_composition.molar_mass(),
            reactant_coefficient: form.count("reactant_coefficient", "Reactant coefficient")?,
            reactant_mass: form.positive("reactant_mass", "Reactant mass")?,
            product,
            product_molar_mass: product_composition.molar_mass(),
            product_coefficient: form.count("product_coefficient", "Product coefficient")?,
            actual_yield: form.optional_positive("actual_yield", "Actual yield")?,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.reactant_coefficient == 0 || input.product_coefficient == 0 {
            return Err(ValidationError::precondition(
                "Coefficients must be whole numbers of at least 1",
            ));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let reactant_moles = input.reactant_mass / input.reactant_molar_mass;
        let product_moles =
            reactant_moles * input.product_coefficient as f64 / input.reactant_coefficient as f64;
        let theoretical_yield = product_moles * input.product_molar_mass;
        StoichiometryOutput {
            reactant_moles,
            product_moles,
            theoretical_yield,
            percent_yield: input.actual_yield.map(|actual| actual / theoretical_yield * 100.0),
            product: input.product.clone(),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary(
                format!("Theoretical yield of {}", output.product),
                with_unit(output.theoretical_yield, 3, "g"),
            )
            .field("Reactant", with_unit(output.reactant_moles, 4, "mol"))
            .field("Product", with_unit(output.product_moles, 4, "mol"));
        if let Some(pct) = output.percent_yield {
            view = view.primary("Percent yield", format!("{}%", number(pct, 1)));
            if pct > 100.0 {
                view = view.note("Yield above 100%: the product may be wet or impure.");
            }
        }
        view
    }
}

// ============================================================================
// Mole Calculator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Mass,
    Moles,
    Particles,
}

impl FieldOptions for Quantity {
    const ALL: &'static [Self] = &[Quantity::Mass, Quantity::Moles, Quantity::Particles];

    fn value(&self) -> &'static str {
        match self {
            Quantity::Mass => "mass",
            Quantity::Moles => "moles",
            Quantity::Particles => "particles",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Quantity::Mass => "Mass (g)",
            Quantity::Moles => "Amount (mol)",
            Quantity::Particles => "Number of particles",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoleInput {
    pub formula: String,
    pub molar_mass: f64,
    pub known: Quantity,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoleConversion {
    pub mass: f64,
    pub moles: f64,
    pub particles: f64,
    pub molar_mass: f64,
}

pub struct MoleCalculator;

static MOLE_PAGE: CalculatorPage = CalculatorPage {
    title: "Mole Calculator",
    description: "Convert between grams, moles and number of particles for any compound.",
    meta_description: "Mole calculator: grams to moles, moles to grams and Avogadro's number conversions.",
    keywords: &["mole calculator", "grams to moles", "avogadro's number", "moles to particles"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "The mole",
        content: "One mole contains 6.022 × 10²³ particles (Avogadro's number). \
moles = mass / molar mass, and particles = moles × Nₐ.",
    },
    additional_sections: &[],
    notes: &[],
};

impl Calculator for MoleCalculator {
    type Input = MoleInput;
    type Output = MoleConversion;

    fn id(&self) -> &'static str {
        "mole-calculator"
    }

    fn page(&self) -> &'static CalculatorPage {
        &MOLE_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("formula", "Chemical formula").placeholder("H2O"),
            FieldSpec::choice::<Quantity>("known", "Known quantity"),
            FieldSpec::number("value", "Value"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let (formula, composition) = read_formula(form, "Chemical formula")?;
        Ok(MoleInput {
            formula,
            molar_mass: composition.molar_mass(),
            known: form.choice("known", "Known quantity")?,
            value: form.positive("value", "Value")?,
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let moles = match input.known {
            Quantity::Mass => input.value / input.molar_mass,
            Quantity::Moles => input.value,
            Quantity::Particles => input.value / AVOGADRO,
        };
        MoleConversion {
            mass: moles * input.molar_mass,
            moles,
            particles: moles * AVOGADRO,
            molar_mass: input.molar_mass,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        ResultView::new()
            .primary("Mass", with_unit(output.mass, 4, "g"))
            .primary("Amount", with_unit(output.moles, 4, "mol"))
            .primary("Particles", number(output.particles, 4))
            .field("Molar mass", with_unit(output.molar_mass, 3, "g/mol"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::CalculatorLeaf;
    use approx::assert_relative_eq;

    #[test]
    fn test_molecular_weight_of_water() {
        let form = FormValues::from_pairs([("formula", "H2O")]);
        let evaluation = MolecularWeight.evaluate(&form);
        assert_eq!(
            evaluation.result().unwrap().value_of("Molar mass of H2O"),
            Some("18.015 g/mol")
        );
    }

    #[test]
    fn test_unknown_element_message() {
        let form = FormValues::from_pairs([("formula", "Qz2")]);
        assert_eq!(
            MolecularWeight.evaluate(&form).error(),
            Some("Unknown element: Qz")
        );
    }

    #[test]
    fn test_oversized_group_count_is_rejected() {
        let form = FormValues::from_pairs([("formula", "(H99999999999)99999999999")]);
        assert_eq!(
            MolecularWeight.evaluate(&form).error(),
            Some("Invalid count in formula")
        );
    }

    #[test]
    fn test_mismatched_brackets_are_rejected() {
        let form = FormValues::from_pairs([("formula", "Ca(OH]2")]);
        assert_eq!(
            MolecularWeight.evaluate(&form).error(),
            Some("Unbalanced parentheses in formula")
        );
    }

    #[test]
    fn test_percent_composition_of_salt() {
        let form = FormValues::from_pairs([("formula", "NaCl"), ("sample_mass", "100")]);
        let evaluation = PercentComposition.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(result.value_of("Na"), Some("39.34%"));
        assert_eq!(result.value_of("Cl"), Some("60.66%"));
        assert_eq!(result.value_of("Na in 100.00 g sample"), Some("39.3395 g"));
    }

    #[test]
    fn test_stoichiometry_uses_real_molar_masses() {
        let form = FormValues::from_pairs([
            ("reactant", "H2"),
            ("reactant_coefficient", "2"),
            ("reactant_mass", "4.032"),
            ("product", "H2O"),
            ("product_coefficient", "2"),
        ]);
        let input = Stoichiometry.parse(&form).unwrap();
        let out = Stoichiometry.compute(&input);
        assert_relative_eq!(out.reactant_moles, 2.0, epsilon = 1e-3);
        assert_relative_eq!(out.theoretical_yield, 36.03, epsilon = 0.01);
        assert_eq!(out.percent_yield, None);
    }

    #[test]
    fn test_stoichiometry_percent_yield() {
        let form = FormValues::from_pairs([
            ("reactant", "CaCO3"),
            ("reactant_coefficient", "1"),
            ("reactant_mass", "100.086"),
            ("product", "CaO"),
            ("product_coefficient", "1"),
            ("actual_yield", "28.0385"),
        ]);
        let out = Stoichiometry.compute(&Stoichiometry.parse(&form).unwrap());
        assert_relative_eq!(out.percent_yield.unwrap(), 50.0, epsilon = 0.01);
    }

    #[test]
    fn test_stoichiometry_rejects_zero_coefficient() {
        let form = FormValues::from_pairs([
            ("reactant", "H2"),
            ("reactant_coefficient", "0"),
            ("reactant_mass", "4"),
            ("product", "H2O"),
            ("product_coefficient", "2"),
        ]);
        assert!(Stoichiometry.evaluate(&form).error().is_some());
    }

    #[test]
    fn test_mole_conversions() {
        let input = MoleInput {
            formula: "H2O".into(),
            molar_mass: 18.015,
            known: Quantity::Mass,
            value: 36.03,
        };
        let out = MoleCalculator.compute(&input);
        assert_relative_eq!(out.moles, 2.0, epsilon = 1e-12);
        assert_relative_eq!(out.particles, 2.0 * AVOGADRO, max_relative = 1e-12);

        let out = MoleCalculator.compute(&MoleInput {
            known: Quantity::Particles,
            value: AVOGADRO,
            ..input
        });
        assert_relative_eq!(out.moles, 1.0, epsilon = 1e-12);
        assert_relative_eq!(out.mass, 18.015, epsilon = 1e-9);
    }
}
