//! Solution chemistry: molarity, dilution, pH and buffers.

use crate::calculators::form::{FieldOptions, FieldSpec, FormValues, SelectOption, ValidationError};
use crate::calculators::format::{number, percent, with_unit};
use crate::calculators::formula::parse_formula;
use crate::calculators::lookup_tables::{self, Acid, ACIDS};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

const BACK_LINK: &str = "/category/chemistry";
const BACK_LABEL: &str = "Chemistry Calculators";

/// Ion product of water at 25 °C
pub const KW: f64 = 1.0e-14;

fn acid_options() -> Vec<SelectOption> {
    ACIDS
        .iter()
        .map(|a| SelectOption {
            value: a.id,
            label: a.name,
        })
        .collect()
}

fn read_acid(
    form: &FormValues,
    name: &'static str,
    label: &'static str,
) -> Result<Option<&'static Acid>, ValidationError> {
    let Some(raw) = form.raw(name) else {
        return Ok(None);
    };
    lookup_tables::acid(raw)
        .map(Some)
        .ok_or_else(|| ValidationError::UnknownOption {
            field: name,
            label,
            value: raw.to_string(),
        })
}

// ============================================================================
// Molarity
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MolarityInput {
    pub solute_mass: f64,
    pub molar_mass: f64,
    pub volume_ml: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MolarityOutput {
    pub moles: f64,
    pub molarity: f64,
    /// g/L
    pub mass_concentration: f64,
}

pub struct Molarity;

static MOLARITY_PAGE: CalculatorPage = CalculatorPage {
    title: "Molarity Calculator",
    description: "Calculate the molar concentration of a solution from solute mass and volume.",
    meta_description: "Molarity calculator: mol/L from grams of solute, formula or molar mass and solution volume.",
    keywords: &["molarity", "molar concentration", "mol/L", "solution concentration"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Molar concentration",
        content: "Molarity is moles of solute per litre of solution: M = n / V. Enter the \
solute's formula to have its molar mass calculated, or type the molar mass directly.",
    },
    additional_sections: &[],
    notes: &["The volume is the final solution volume, not the volume of solvent added."],
};

impl Calculator for Molarity {
    type Input = MolarityInput;
    type Output = MolarityOutput;

    fn id(&self) -> &'static str {
        "molarity"
    }

    fn page(&self) -> &'static CalculatorPage {
        &MOLARITY_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("mass", "Solute mass").unit("g"),
            FieldSpec::number("volume", "Solution volume").unit("mL"),
            FieldSpec::text("formula", "Solute formula")
                .placeholder("NaCl")
                .optional(),
            FieldSpec::number("molar_mass", "Molar mass")
                .unit("g/mol")
                .help("Used when no formula is given")
                .optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let solute_mass = form.positive("mass", "Solute mass")?;
        let volume_ml = form.positive("volume", "Solution volume")?;
        let molar_mass = match form.raw("formula") {
            Some(formula) => parse_formula(formula)?.molar_mass(),
            None => form
                .optional_positive("molar_mass", "Molar mass")?
                .ok_or_else(|| ValidationError::precondition("Enter a formula or a molar mass"))?,
        };
        Ok(MolarityInput {
            solute_mass,
            molar_mass,
            volume_ml,
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let litres = input.volume_ml / 1000.0;
        let moles = input.solute_mass / input.molar_mass;
        MolarityOutput {
            moles,
            molarity: moles / litres,
            mass_concentration: input.solute_mass / litres,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        ResultView::new()
            .primary("Molarity", with_unit(output.molarity, 4, "M"))
            .field("Millimolar", with_unit(output.molarity * 1000.0, 2, "mM"))
            .field("Moles of solute", with_unit(output.moles, 4, "mol"))
            .field("Mass concentration", with_unit(output.mass_concentration, 2, "g/L"))
    }
}

// ============================================================================
// Solution Dilution
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DilutionUnknown {
    StockConcentration,
    StockVolume,
    FinalConcentration,
    FinalVolume,
}

/// C1·V1 = C2·V2 with exactly one side unknown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DilutionInput {
    pub c1: Option<f64>,
    pub v1: Option<f64>,
    pub c2: Option<f64>,
    pub v2: Option<f64>,
}

impl DilutionInput {
    fn unknown(&self) -> Option<DilutionUnknown> {
        let blanks = [
            (self.c1, DilutionUnknown::StockConcentration),
            (self.v1, DilutionUnknown::StockVolume),
            (self.c2, DilutionUnknown::FinalConcentration),
            (self.v2, DilutionUnknown::FinalVolume),
        ];
        let mut missing = blanks.iter().filter(|(v, _)| v.is_none()).map(|(_, u)| *u);
        match (missing.next(), missing.next()) {
            (Some(unknown), None) => Some(unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DilutionOutput {
    pub solved: DilutionUnknown,
    pub c1: f64,
    pub v1: f64,
    pub c2: f64,
    pub v2: f64,
}

impl DilutionOutput {
    pub fn solved_value(&self) -> f64 {
        match self.solved {
            DilutionUnknown::StockConcentration => self.c1,
            DilutionUnknown::StockVolume => self.v1,
            DilutionUnknown::FinalConcentration => self.c2,
            DilutionUnknown::FinalVolume => self.v2,
        }
    }

    pub fn solvent_to_add(&self) -> f64 {
        self.v2 - self.v1
    }

    pub fn dilution_factor(&self) -> f64 {
        self.c1 / self.c2
    }
}

pub struct SolutionDilution;

static DILUTION_PAGE: CalculatorPage = CalculatorPage {
    title: "Solution Dilution Calculator",
    description: "Solve C1V1 = C2V2 for the stock volume, final volume or either concentration.",
    meta_description: "Dilution calculator using C1V1 = C2V2: find the volume of stock solution to dilute.",
    keywords: &["dilution", "c1v1=c2v2", "stock solution", "serial dilution"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "C1V1 = C2V2",
        content: "Diluting a solution does not change the amount of solute, so the stock \
concentration times the stock volume equals the final concentration times the final \
volume. Fill in three values and leave the one you want blank.",
    },
    additional_sections: &[],
    notes: &["Use the same units for both concentrations and both volumes."],
};

impl Calculator for SolutionDilution {
    type Input = DilutionInput;
    type Output = DilutionOutput;

    fn id(&self) -> &'static str {
        "solution-dilution"
    }

    fn page(&self) -> &'static CalculatorPage {
        &DILUTION_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("c1", "Stock concentration (C1)").optional(),
            FieldSpec::number("v1", "Stock volume (V1)").optional(),
            FieldSpec::number("c2", "Final concentration (C2)").optional(),
            FieldSpec::number("v2", "Final volume (V2)").optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(DilutionInput {
            c1: form.optional_positive("c1", "Stock concentration")?,
            v1: form.optional_positive("v1", "Stock volume")?,
            c2: form.optional_positive("c2", "Final concentration")?,
            v2: form.optional_positive("v2", "Final volume")?,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.unknown().is_none() {
            return Err(ValidationError::precondition(
                "Leave exactly one of C1, V1, C2 and V2 blank",
            ));
        }
        if let (Some(c1), Some(c2)) = (input.c1, input.c2) {
            if c2 > c1 {
                return Err(ValidationError::precondition(
                    "Final concentration cannot exceed the stock concentration",
                ));
            }
        }
        if let (Some(v1), Some(v2)) = (input.v1, input.v2) {
            if v1 > v2 {
                return Err(ValidationError::precondition(
                    "Stock volume cannot exceed the final volume",
                ));
            }
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let solved = input
            .unknown()
            .unwrap_or(DilutionUnknown::FinalVolume);
        let (c1, v1, c2, v2) = (
            input.c1.unwrap_or(f64::NAN),
            input.v1.unwrap_or(f64::NAN),
            input.c2.unwrap_or(f64::NAN),
            input.v2.unwrap_or(f64::NAN),
        );
        let (c1, v1, c2, v2) = match solved {
            DilutionUnknown::StockConcentration => (c2 * v2 / v1, v1, c2, v2),
            DilutionUnknown::StockVolume => (c1, c2 * v2 / c1, c2, v2),
            DilutionUnknown::FinalConcentration => (c1, v1, c1 * v1 / v2, v2),
            DilutionUnknown::FinalVolume => (c1, v1, c2, c1 * v1 / c2),
        };
        DilutionOutput {
            solved,
            c1,
            v1,
            c2,
            v2,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let label = match output.solved {
            DilutionUnknown::StockConcentration => "Stock concentration (C1)",
            DilutionUnknown::StockVolume => "Stock volume (V1)",
            DilutionUnknown::FinalConcentration => "Final concentration (C2)",
            DilutionUnknown::FinalVolume => "Final volume (V2)",
        };
        ResultView::new()
            .primary(label, number(output.solved_value(), 4))
            .field("Solvent to add", number(output.solvent_to_add(), 4))
            .field("Dilution factor", format!("{}×", number(output.dilution_factor(), 2)))
    }
}

// ============================================================================
// pH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhSource {
    HydrogenIon,
    HydroxideIon,
    Ph,
    Poh,
    Acid,
}

impl FieldOptions for PhSource {
    const ALL: &'static [Self] = &[
        PhSource::HydrogenIon,
        PhSource::HydroxideIon,
        PhSource::Ph,
        PhSource::Poh,
        PhSource::Acid,
    ];

    fn value(&self) -> &'static str {
        match self {
            PhSource::HydrogenIon => "hydrogen_ion",
            PhSource::HydroxideIon => "hydroxide_ion",
            PhSource::Ph => "ph",
            PhSource::Poh => "poh",
            PhSource::Acid => "acid",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PhSource::HydrogenIon => "[H⁺] concentration (M)",
            PhSource::HydroxideIon => "[OH⁻] concentration (M)",
            PhSource::Ph => "pH",
            PhSource::Poh => "pOH",
            PhSource::Acid => "Acid at a concentration (M)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhInput {
    pub source: PhSource,
    pub value: f64,
    pub acid: &'static Acid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhOutput {
    pub hydrogen: f64,
    pub ph: f64,
    /// Fraction of a weak acid that dissociated
    pub ionization: Option<f64>,
}

impl PhOutput {
    fn from_hydrogen(hydrogen: f64) -> Self {
        Self {
            hydrogen,
            ph: -hydrogen.log10(),
            ionization: None,
        }
    }

    pub fn poh(&self) -> f64 {
        -KW.log10() - self.ph
    }

    pub fn hydroxide(&self) -> f64 {
        KW / self.hydrogen
    }

    pub fn classification(&self) -> &'static str {
        // compare at display precision so 7.00 reads as neutral
        let rounded = (self.ph * 100.0).round() / 100.0;
        if rounded < 7.0 {
            "Acidic"
        } else if rounded > 7.0 {
            "Basic"
        } else {
            "Neutral"
        }
    }
}

/// [H⁺] of a monoprotic weak acid: x² / (C − x) = Ka solved for x
pub fn weak_acid_hydrogen(ka: f64, concentration: f64) -> f64 {
    (-ka + (ka * ka + 4.0 * ka * concentration).sqrt()) / 2.0
}

pub struct Ph;

static PH_PAGE: CalculatorPage = CalculatorPage {
    title: "pH Calculator",
    description: "Calculate pH, pOH, [H⁺] and [OH⁻] from any one of them or from an acid concentration.",
    meta_description: "pH calculator from hydrogen ion concentration, hydroxide, pOH or strong and weak acid concentration.",
    keywords: &["ph calculator", "poh", "hydrogen ion concentration", "weak acid ph"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "The pH scale",
        content: "pH = −log₁₀[H⁺]. At 25 °C, pH + pOH = 14. Values below 7 are acidic and \
above 7 basic.",
    },
    additional_sections: &[Section {
        title: "Weak acids",
        content: "A weak acid only partly dissociates. Its [H⁺] solves x²/(C − x) = Ka, \
giving x = (−Ka + √(Ka² + 4·Ka·C)) / 2. Strong acids are assumed to dissociate fully.",
    }],
    notes: &["Sulfuric acid is treated as releasing both protons completely."],
};

impl Calculator for Ph {
    type Input = PhInput;
    type Output = PhOutput;

    fn id(&self) -> &'static str {
        "ph"
    }

    fn page(&self) -> &'static CalculatorPage {
        &PH_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice::<PhSource>("mode", "Calculate from"),
            FieldSpec::number("value", "Value"),
            FieldSpec::select("acid", "Acid", acid_options())
                .help("Only used when calculating from an acid")
                .optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let source = form.choice::<PhSource>("mode", "Calculate from")?;
        let value = match source {
            PhSource::Ph | PhSource::Poh => form.number("value", "Value")?,
            _ => form.positive("value", "Value")?,
        };
        let acid = match read_acid(form, "acid", "Acid")? {
            Some(acid) => acid,
            None => ACIDS.first().ok_or_else(|| ValidationError::precondition("No acids available"))?,
        };
        Ok(PhInput { source, value, acid })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        match input.source {
            PhSource::HydrogenIon => PhOutput::from_hydrogen(input.value),
            PhSource::HydroxideIon => PhOutput::from_hydrogen(KW / input.value),
            PhSource::Ph => PhOutput::from_hydrogen(10f64.powf(-input.value)),
            PhSource::Poh => PhOutput::from_hydrogen(10f64.powf(input.value + KW.log10())),
            PhSource::Acid => match input.acid.ka {
                None => PhOutput::from_hydrogen(input.value * input.acid.protons as f64),
                Some(ka) => {
                    let hydrogen = weak_acid_hydrogen(ka, input.value);
                    PhOutput {
                        ionization: Some(hydrogen / input.value),
                        ..PhOutput::from_hydrogen(hydrogen)
                    }
                }
            },
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary("pH", number(output.ph, 2))
            .field("pOH", number(output.poh(), 2))
            .field("[H⁺]", with_unit(output.hydrogen, 3, "M"))
            .field("[OH⁻]", with_unit(output.hydroxide(), 3, "M"))
            .primary("Solution", output.classification());
        if let Some(ionization) = output.ionization {
            view = view.field("Percent ionization", percent(ionization, 2));
        }
        view
    }
}

// ============================================================================
// Buffer pH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferInput {
    pub pka: f64,
    pub acid_concentration: f64,
    pub base_concentration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferOutput {
    pub ph: f64,
    pub pka: f64,
    /// [A⁻] / [HA]
    pub ratio: f64,
}

impl BufferOutput {
    /// Henderson-Hasselbalch is reliable within one pH unit of pKa
    pub fn within_buffer_range(&self) -> bool {
        (0.1..=10.0).contains(&self.ratio)
    }
}

pub struct BufferPh;

static BUFFER_PAGE: CalculatorPage = CalculatorPage {
    title: "Buffer pH Calculator",
    description: "Calculate the pH of a buffer with the Henderson-Hasselbalch equation.",
    meta_description: "Buffer pH calculator using Henderson-Hasselbalch: pKa and acid/conjugate base concentrations.",
    keywords: &["buffer ph", "henderson-hasselbalch", "pka", "conjugate base"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Henderson-Hasselbalch",
        content: "pH = pKa + log₁₀([A⁻] / [HA]). When acid and conjugate base are equal, \
pH equals pKa. Pick a weak acid from the list or enter its pKa.",
    },
    additional_sections: &[],
    notes: &[],
};

impl Calculator for BufferPh {
    type Input = BufferInput;
    type Output = BufferOutput;

    fn id(&self) -> &'static str {
        "buffer-ph"
    }

    fn page(&self) -> &'static CalculatorPage {
        &BUFFER_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut options = vec![SelectOption {
            value: "",
            label: "Enter pKa manually",
        }];
        options.extend(acid_options().into_iter().filter(|o| {
            lookup_tables::acid(o.value).is_some_and(|a| !a.is_strong())
        }));
        vec![
            FieldSpec::select("acid", "Weak acid", options).optional(),
            FieldSpec::number("pka", "pKa").optional(),
            FieldSpec::number("acid_concentration", "Acid concentration [HA]").unit("M"),
            FieldSpec::number("base_concentration", "Conjugate base concentration [A⁻]").unit("M"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let pka = match read_acid(form, "acid", "Weak acid")? {
            Some(acid) => acid.pka().ok_or_else(|| {
                ValidationError::precondition(format!(
                    "{} is a strong acid and cannot form a buffer",
                    acid.name
                ))
            })?,
            None => form.number("pka", "pKa")?,
        };
        Ok(BufferInput {
            pka,
            acid_concentration: form.positive("acid_concentration", "Acid concentration")?,
            base_concentration: form.positive("base_concentration", "Conjugate base concentration")?,
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let ratio = input.base_concentration / input.acid_concentration;
        BufferOutput {
            ph: input.pka + ratio.log10(),
            pka: input.pka,
            ratio,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary("Buffer pH", number(output.ph, 2))
            .field("pKa", number(output.pka, 2))
            .field("[A⁻]/[HA]", number(output.ratio, 3));
        if !output.within_buffer_range() {
            view = view.note("Ratio outside 0.1–10: the solution is a poor buffer.");
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::CalculatorLeaf;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_molarity_from_formula() {
        let input = Molarity
            .parse(&FormValues::from_pairs([
                ("mass", "5.844"),
                ("volume", "1000"),
                ("formula", "NaCl"),
            ]))
            .unwrap();
        let out = Molarity.compute(&input);
        assert_abs_diff_eq!(out.molarity, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_molarity_needs_formula_or_mass() {
        let form = FormValues::from_pairs([("mass", "5"), ("volume", "100")]);
        assert_eq!(
            Molarity.evaluate(&form).error(),
            Some("Enter a formula or a molar mass")
        );
        let form = FormValues::from_pairs([("mass", "5"), ("volume", "250"), ("molar_mass", "40")]);
        let evaluation = Molarity.evaluate(&form);
        assert_eq!(evaluation.result().unwrap().value_of("Molarity"), Some("0.5000 M"));
    }

    #[test]
    fn test_dilution_solves_stock_volume() {
        let input = DilutionInput {
            c1: Some(2.0),
            v1: None,
            c2: Some(0.5),
            v2: Some(100.0),
        };
        assert!(SolutionDilution.validate(&input).is_ok());
        let out = SolutionDilution.compute(&input);
        assert_eq!(out.solved, DilutionUnknown::StockVolume);
        assert_abs_diff_eq!(out.v1, 25.0);
        assert_abs_diff_eq!(out.solvent_to_add(), 75.0);
        assert_abs_diff_eq!(out.dilution_factor(), 4.0);
    }

    #[test]
    fn test_dilution_requires_exactly_one_blank() {
        let form = FormValues::from_pairs([("c1", "2"), ("c2", "1")]);
        assert_eq!(
            SolutionDilution.evaluate(&form).error(),
            Some("Leave exactly one of C1, V1, C2 and V2 blank")
        );
        let form = FormValues::from_pairs([("c1", "2"), ("v1", "1"), ("c2", "1"), ("v2", "2")]);
        assert!(SolutionDilution.evaluate(&form).error().is_some());
    }

    #[test]
    fn test_dilution_rejects_concentrating() {
        let form = FormValues::from_pairs([("c1", "1"), ("c2", "2"), ("v2", "10")]);
        assert_eq!(
            SolutionDilution.evaluate(&form).error(),
            Some("Final concentration cannot exceed the stock concentration")
        );
    }

    #[test]
    fn test_ph_from_hydrogen_ion() {
        let form = FormValues::from_pairs([("mode", "hydrogen_ion"), ("value", "0.001")]);
        let evaluation = Ph.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(result.value_of("pH"), Some("3.00"));
        assert_eq!(result.value_of("pOH"), Some("11.00"));
        assert_eq!(result.value_of("Solution"), Some("Acidic"));
    }

    #[test]
    fn test_ph_neutral_and_basic() {
        let neutral = Ph.compute(&PhInput {
            source: PhSource::Ph,
            value: 7.0,
            acid: &ACIDS[0],
        });
        assert_eq!(neutral.classification(), "Neutral");
        let basic = Ph.compute(&PhInput {
            source: PhSource::HydroxideIon,
            value: 0.01,
            acid: &ACIDS[0],
        });
        assert_abs_diff_eq!(basic.ph, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(basic.poh(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_strong_and_weak_acids() {
        let hcl = Ph.compute(&PhInput {
            source: PhSource::Acid,
            value: 0.01,
            acid: lookup_tables::acid("hydrochloric").unwrap(),
        });
        assert_abs_diff_eq!(hcl.ph, 2.0, epsilon = 1e-9);

        let acetic = Ph.compute(&PhInput {
            source: PhSource::Acid,
            value: 0.1,
            acid: lookup_tables::acid("acetic").unwrap(),
        });
        assert_abs_diff_eq!(acetic.ph, 2.875, epsilon = 1e-3);
        assert!(acetic.ionization.unwrap() < 0.02);
    }

    #[test]
    fn test_unknown_acid_rejected() {
        let form = FormValues::from_pairs([("mode", "acid"), ("value", "0.1"), ("acid", "vinegar")]);
        assert!(matches!(
            Ph.evaluate(&form),
            crate::calculators::Evaluation::Rejected { field: Some("acid"), .. }
        ));
    }

    #[test]
    fn test_buffer_equal_concentrations_give_pka() {
        let form = FormValues::from_pairs([
            ("acid", "acetic"),
            ("acid_concentration", "0.1"),
            ("base_concentration", "0.1"),
        ]);
        let input = BufferPh.parse(&form).unwrap();
        let out = BufferPh.compute(&input);
        assert_abs_diff_eq!(out.ph, -(1.8e-5f64).log10(), epsilon = 1e-12);
        assert!(out.within_buffer_range());
    }

    #[test]
    fn test_buffer_rejects_strong_acid() {
        let form = FormValues::from_pairs([
            ("acid", "nitric"),
            ("acid_concentration", "0.1"),
            ("base_concentration", "0.1"),
        ]);
        assert_eq!(
            BufferPh.evaluate(&form).error(),
            Some("Nitric acid is a strong acid and cannot form a buffer")
        );
    }
}
