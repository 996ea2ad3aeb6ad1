//! Enzyme kinetics and protein calculators.

use crate::calculators::form::{FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, percent, with_unit};
use crate::calculators::lookup_tables::{amino_acid, AminoAcid, AMINO_ACIDS, WATER_MASS};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

const BACK_LINK: &str = "/category/biology/biochemistry";
const BACK_LABEL: &str = "Biochemistry Calculators";

// ============================================================================
// Michaelis-Menten
// ============================================================================

/// Substrate levels, as multiples of Km, tabulated under the result
const SATURATION_CURVE: [f64; 6] = [0.1, 0.5, 1.0, 2.0, 5.0, 10.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnzymeParameters {
    pub vmax: f64,
    pub km: f64,
    pub substrate: f64,
}

impl EnzymeParameters {
    pub fn velocity_at(&self, substrate: f64) -> f64 {
        self.vmax * substrate / (self.km + substrate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KineticsOutput {
    pub velocity: f64,
    pub saturation: f64,
    pub curve: Vec<(f64, f64)>,
}

pub struct MichaelisMenten;

static MICHAELIS_MENTEN_PAGE: CalculatorPage = CalculatorPage {
    title: "Michaelis-Menten Calculator",
    description: "Calculate enzyme reaction velocity from Vmax, Km and substrate concentration.",
    meta_description: "Michaelis-Menten equation calculator: reaction rate, saturation and rate curve.",
    keywords: &["michaelis-menten", "enzyme kinetics", "km", "vmax", "reaction velocity"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Enzyme saturation",
        content: "The Michaelis-Menten equation v = Vmax·[S] / (Km + [S]) describes how \
reaction velocity rises with substrate concentration and levels off at **Vmax**. \
**Km** is the substrate concentration giving half the maximum rate.",
    },
    additional_sections: &[Section {
        title: "Units",
        content: "Use the same concentration unit for Km and [S]. The velocity takes the \
unit of Vmax.",
    }],
    notes: &[],
};

impl Calculator for MichaelisMenten {
    type Input = EnzymeParameters;
    type Output = KineticsOutput;

    fn id(&self) -> &'static str {
        "michaelis-menten"
    }

    fn page(&self) -> &'static CalculatorPage {
        &MICHAELIS_MENTEN_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("vmax", "Maximum velocity (Vmax)").unit("µmol/min"),
            FieldSpec::number("km", "Michaelis constant (Km)").unit("mM"),
            FieldSpec::number("substrate", "Substrate concentration [S]").unit("mM"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(EnzymeParameters {
            vmax: form.positive("vmax", "Vmax")?,
            km: form.positive("km", "Km")?,
            substrate: form.non_negative("substrate", "Substrate concentration")?,
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let velocity = input.velocity_at(input.substrate);
        KineticsOutput {
            velocity,
            saturation: velocity / input.vmax,
            curve: SATURATION_CURVE
                .iter()
                .map(|multiple| {
                    let s = multiple * input.km;
                    (s, input.velocity_at(s))
                })
                .collect(),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut rows = vec![vec!["[S]".to_string(), "v".to_string()]];
        rows.extend(
            output
                .curve
                .iter()
                .map(|(s, v)| vec![number(*s, 3), number(*v, 3)]),
        );
        ResultView::new()
            .primary("Reaction velocity", number(output.velocity, 4))
            .field("Fraction of Vmax", percent(output.saturation, 1))
            .table(rows)
    }
}

// ============================================================================
// Lineweaver-Burk
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RatePoints {
    /// (substrate, velocity) pairs
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleReciprocalFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: Option<f64>,
}

impl DoubleReciprocalFit {
    pub fn vmax(&self) -> f64 {
        1.0 / self.intercept
    }

    pub fn km(&self) -> f64 {
        self.slope * self.vmax()
    }

    /// x-intercept, −1/Km
    pub fn x_intercept(&self) -> f64 {
        -self.intercept / self.slope
    }
}

/// Least-squares line through (1/[S], 1/v)
pub fn double_reciprocal_fit(points: &[(f64, f64)]) -> Option<DoubleReciprocalFit> {
    let xy: Vec<(f64, f64)> = points.iter().map(|(s, v)| (1.0 / s, 1.0 / v)).collect();
    let n = xy.len() as f64;
    let mean_x = xy.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = xy.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = xy.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let sxy: f64 = xy.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    let syy: f64 = xy.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    let r_squared = (xy.len() > 2 && syy > 0.0).then(|| sxy * sxy / (sxx * syy));
    Some(DoubleReciprocalFit {
        slope,
        intercept: mean_y - slope * mean_x,
        r_squared,
    })
}

pub struct LineweaverBurk;

static LINEWEAVER_BURK_PAGE: CalculatorPage = CalculatorPage {
    title: "Lineweaver-Burk Plot Calculator",
    description: "Estimate Km and Vmax from substrate and velocity measurements with a double-reciprocal plot.",
    meta_description: "Lineweaver-Burk calculator: Km and Vmax from 1/v versus 1/[S] linear regression.",
    keywords: &["lineweaver-burk", "double reciprocal plot", "km vmax", "enzyme kinetics"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Linearising Michaelis-Menten",
        content: "Taking reciprocals gives 1/v = (Km/Vmax)·(1/[S]) + 1/Vmax, a straight line. \
The y-intercept is 1/Vmax and the slope is Km/Vmax.",
    },
    additional_sections: &[Section {
        title: "Data entry",
        content: "Enter at least two measurements at different substrate concentrations. \
Optional extra points improve the fit and report R².",
    }],
    notes: &["Points at low [S] dominate the fit; spread measurements evenly."],
};

const POINT_FIELDS: [(&str, &str, &str, &str); 4] = [
    ("s1", "[S] 1", "v1", "v 1"),
    ("s2", "[S] 2", "v2", "v 2"),
    ("s3", "[S] 3", "v3", "v 3"),
    ("s4", "[S] 4", "v4", "v 4"),
];

impl Calculator for LineweaverBurk {
    type Input = RatePoints;
    type Output = DoubleReciprocalFit;

    fn id(&self) -> &'static str {
        "lineweaver-burk"
    }

    fn page(&self) -> &'static CalculatorPage {
        &LINEWEAVER_BURK_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        POINT_FIELDS
            .into_iter()
            .enumerate()
            .flat_map(|(i, (s, s_label, v, v_label))| {
                let substrate = FieldSpec::number(s, s_label).unit("mM");
                let velocity = FieldSpec::number(v, v_label).unit("µmol/min");
                if i < 2 {
                    [substrate, velocity]
                } else {
                    [substrate.optional(), velocity.optional()]
                }
            })
            .collect()
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let mut points = Vec::with_capacity(POINT_FIELDS.len());
        for (i, (s, s_label, v, v_label)) in POINT_FIELDS.into_iter().enumerate() {
            if i >= 2 && form.is_blank(s) && form.is_blank(v) {
                continue;
            }
            points.push((form.positive(s, s_label)?, form.positive(v, v_label)?));
        }
        Ok(RatePoints { points })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let fit = double_reciprocal_fit(&input.points).ok_or_else(|| {
            ValidationError::precondition("Substrate concentrations must not all be equal")
        })?;
        if fit.intercept <= 0.0 || fit.slope <= 0.0 {
            return Err(ValidationError::precondition(
                "Data do not follow Michaelis-Menten kinetics (non-positive slope or intercept)",
            ));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        // validate() has already rejected degenerate data
        double_reciprocal_fit(&input.points).unwrap_or(DoubleReciprocalFit {
            slope: f64::NAN,
            intercept: f64::NAN,
            r_squared: None,
        })
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary("Vmax", number(output.vmax(), 4))
            .primary("Km", number(output.km(), 4))
            .field("Slope (Km/Vmax)", number(output.slope, 4))
            .field("y-intercept (1/Vmax)", number(output.intercept, 4))
            .field("x-intercept (−1/Km)", number(output.x_intercept(), 4));
        if let Some(r2) = output.r_squared {
            view = view.field("R²", number(r2, 4));
        }
        view
    }
}

// ============================================================================
// Protein Molecular Weight
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProteinAnalysis {
    pub length: usize,
    /// Da
    pub molecular_weight: f64,
    /// M⁻¹cm⁻¹ at 280 nm, cystines assumed
    pub extinction_coefficient: f64,
    pub composition: Vec<(&'static AminoAcid, usize)>,
}

impl ProteinAnalysis {
    /// A280 of a 1 mg/mL solution
    pub fn absorbance_per_mg_ml(&self) -> f64 {
        self.extinction_coefficient / self.molecular_weight
    }
}

pub struct ProteinMolecularWeight;

static PROTEIN_MW_PAGE: CalculatorPage = CalculatorPage {
    title: "Protein Molecular Weight Calculator",
    description: "Calculate protein molecular weight, amino acid composition and extinction coefficient from a sequence.",
    meta_description: "Protein molecular weight and extinction coefficient from a one-letter amino acid sequence.",
    keywords: &["protein molecular weight", "amino acid sequence", "extinction coefficient", "kDa"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Summing residues",
        content: "A protein's mass is the sum of its amino acid residue masses plus one \
water molecule for the free termini. Enter the sequence in one-letter code.",
    },
    additional_sections: &[Section {
        title: "Extinction coefficient",
        content: "At 280 nm, ε = 5500·W + 1490·Y + 125·(C/2), counting each pair of \
cysteines as one cystine.",
    }],
    notes: &["Post-translational modifications are not included."],
};

impl Calculator for ProteinMolecularWeight {
    type Input = Vec<&'static AminoAcid>;
    type Output = ProteinAnalysis;

    fn id(&self) -> &'static str {
        "protein-molecular-weight"
    }

    fn page(&self) -> &'static CalculatorPage {
        &PROTEIN_MW_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::textarea("sequence", "Protein sequence (one-letter code)")
            .placeholder("MKTAYIAKQRQISFVKSHFSRQ")]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        form.text("sequence", "Protein sequence")?
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|code| {
                amino_acid(code).ok_or_else(|| {
                    ValidationError::precondition(format!(
                        "Unknown amino acid: {}",
                        code.to_ascii_uppercase()
                    ))
                })
            })
            .collect()
    }

    fn compute(&self, residues: &Self::Input) -> Self::Output {
        let count = |code: char| residues.iter().filter(|aa| aa.code == code).count();
        let composition: Vec<(&'static AminoAcid, usize)> = AMINO_ACIDS
            .iter()
            .map(|aa| (aa, count(aa.code)))
            .filter(|(_, n)| *n > 0)
            .collect();

        ProteinAnalysis {
            length: residues.len(),
            molecular_weight: residues.iter().map(|aa| aa.residue_mass).sum::<f64>() + WATER_MASS,
            extinction_coefficient: 5500.0 * count('W') as f64
                + 1490.0 * count('Y') as f64
                + 125.0 * (count('C') / 2) as f64,
            composition,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut rows = vec![vec![
            "Amino acid".to_string(),
            "Count".to_string(),
            "Mol %".to_string(),
        ]];
        for (aa, n) in &output.composition {
            rows.push(vec![
                format!("{} ({})", aa.name, aa.abbreviation),
                n.to_string(),
                percent(*n as f64 / output.length as f64, 1),
            ]);
        }
        ResultView::new()
            .primary("Molecular weight", with_unit(output.molecular_weight, 2, "Da"))
            .field("Molecular weight (kDa)", with_unit(output.molecular_weight / 1000.0, 2, "kDa"))
            .field("Length", format!("{} aa", output.length))
            .primary(
                "Extinction coefficient",
                with_unit(output.extinction_coefficient, 0, "M⁻¹cm⁻¹"),
            )
            .field("Abs 0.1% (1 mg/mL)", number(output.absorbance_per_mg_ml(), 3))
            .table(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::CalculatorLeaf;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_michaelis_menten_half_vmax_at_km() {
        let out = MichaelisMenten.compute(&EnzymeParameters {
            vmax: 100.0,
            km: 2.0,
            substrate: 2.0,
        });
        assert_abs_diff_eq!(out.velocity, 50.0);
        assert_abs_diff_eq!(out.saturation, 0.5);
        assert_eq!(out.curve.len(), SATURATION_CURVE.len());
    }

    #[test]
    fn test_lineweaver_burk_recovers_parameters() {
        let points = RatePoints {
            points: vec![(1.0, 10.0 / 3.0), (4.0, 20.0 / 3.0)],
        };
        assert!(LineweaverBurk.validate(&points).is_ok());
        let fit = LineweaverBurk.compute(&points);
        assert_abs_diff_eq!(fit.slope, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.vmax(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.km(), 2.0, epsilon = 1e-9);
        assert_eq!(fit.r_squared, None);
    }

    #[test]
    fn test_lineweaver_burk_optional_points() {
        let form = FormValues::from_pairs([
            ("s1", "1"),
            ("v1", "3.3333333333"),
            ("s2", "4"),
            ("v2", "6.6666666667"),
            ("s3", "8"),
            ("v3", "8"),
        ]);
        let evaluation = LineweaverBurk.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(result.value_of("Vmax"), Some("10.0000"));
        assert_eq!(result.value_of("R²"), Some("1.0000"));
    }

    #[test]
    fn test_lineweaver_burk_rejects_equal_substrate() {
        let form = FormValues::from_pairs([("s1", "2"), ("v1", "3"), ("s2", "2"), ("v2", "4")]);
        assert_eq!(
            LineweaverBurk.evaluate(&form).error(),
            Some("Substrate concentrations must not all be equal")
        );
    }

    #[test]
    fn test_protein_molecular_weight() {
        let form = FormValues::from_pairs([("sequence", "G")]);
        let evaluation = ProteinMolecularWeight.evaluate(&form);
        assert_eq!(
            evaluation.result().unwrap().value_of("Molecular weight"),
            Some("75.07 Da")
        );
    }

    #[test]
    fn test_extinction_coefficient() {
        let residues = ProteinMolecularWeight
            .parse(&FormValues::from_pairs([("sequence", "wyc c")]))
            .unwrap();
        let out = ProteinMolecularWeight.compute(&residues);
        assert_eq!(out.length, 4);
        assert_abs_diff_eq!(out.extinction_coefficient, 5500.0 + 1490.0 + 125.0);
        assert_eq!(out.composition.len(), 3);
    }

    #[test]
    fn test_unknown_amino_acid() {
        let form = FormValues::from_pairs([("sequence", "MKXB")]);
        assert_eq!(
            ProteinMolecularWeight.evaluate(&form).error(),
            Some("Unknown amino acid: X")
        );
    }
}
