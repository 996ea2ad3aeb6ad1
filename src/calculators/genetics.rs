//! Population and Mendelian genetics calculators.
//!
//! - `HardyWeinberg`: allele and expected genotype frequencies from observed frequencies
//! - `AlleleFrequency`: the same analysis from raw genotype counts
//! - `PunnettSquare`: monohybrid and dihybrid crosses
//!
//! Goodness-of-fit p-values use the approximation p ≈ e^(−χ²/2) for one
//! degree of freedom. It is close for small χ² and conservative elsewhere.

use crate::calculators::form::{FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, percent};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

const BACK_LINK: &str = "/category/biology/genetics";
const BACK_LABEL: &str = "Genetics Calculators";

/// Observed genotype frequencies must sum to one within this tolerance
const FREQUENCY_TOLERANCE: f64 = 0.001;

/// Individuals assumed for the χ² test when no population size is given
const DEFAULT_SAMPLE: f64 = 100.0;

const SIGNIFICANCE: f64 = 0.05;

/// χ² values below this are rounding residue of an exact equilibrium
const CHI_SQUARE_NOISE: f64 = 1e-9;

// ============================================================================
// Shared statistics
// ============================================================================

/// Genotype triple in AA, Aa, aa order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Genotypes {
    pub dominant: f64,
    pub heterozygous: f64,
    pub recessive: f64,
}

impl Genotypes {
    fn as_array(&self) -> [f64; 3] {
        [self.dominant, self.heterozygous, self.recessive]
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            dominant: self.dominant * factor,
            heterozygous: self.heterozygous * factor,
            recessive: self.recessive * factor,
        }
    }
}

/// Expected genotype frequencies p², 2pq, q²
fn expected_frequencies(p: f64) -> Genotypes {
    let q = 1.0 - p;
    Genotypes {
        dominant: p * p,
        heterozygous: 2.0 * p * q,
        recessive: q * q,
    }
}

/// Pearson χ² over the three genotype classes; empty expected classes are skipped
pub fn chi_square(observed: &Genotypes, expected: &Genotypes) -> f64 {
    observed
        .as_array()
        .iter()
        .zip(expected.as_array())
        .filter(|(_, e)| *e > 0.0)
        .map(|(o, e)| (o - e).powi(2) / e)
        .sum()
}

/// Approximate p-value for χ² with one degree of freedom
pub fn approximate_p_value(chi_square: f64) -> f64 {
    (-chi_square / 2.0).exp()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumTest {
    pub p: f64,
    pub q: f64,
    pub expected: Genotypes,
    pub chi_square: f64,
    pub p_value: f64,
}

impl EquilibriumTest {
    pub fn in_equilibrium(&self) -> bool {
        self.p_value > SIGNIFICANCE
    }

    fn verdict(&self) -> &'static str {
        if self.in_equilibrium() {
            "Consistent with Hardy-Weinberg equilibrium"
        } else {
            "Deviates from Hardy-Weinberg equilibrium"
        }
    }
}

/// Allele frequencies from observed genotype frequencies, then χ² against
/// expectations for a sample of `sample_size` individuals
fn equilibrium_test(observed: &Genotypes, sample_size: f64) -> EquilibriumTest {
    let p = observed.dominant + observed.heterozygous / 2.0;
    let q = observed.recessive + observed.heterozygous / 2.0;
    let expected = expected_frequencies(p);
    let chi_square = match chi_square(&observed.scaled(sample_size), &expected.scaled(sample_size)) {
        x if x < CHI_SQUARE_NOISE => 0.0,
        x => x,
    };
    EquilibriumTest {
        p,
        q,
        expected,
        chi_square,
        p_value: approximate_p_value(chi_square),
    }
}

fn genotype_table(observed: &Genotypes, expected: &Genotypes, scale: Option<f64>) -> Vec<Vec<String>> {
    let mut header = vec![
        "Genotype".to_string(),
        "Observed".to_string(),
        "Expected".to_string(),
    ];
    if scale.is_some() {
        header.push("Expected count".to_string());
    }
    let mut rows = vec![header];
    for (name, o, e) in [
        ("AA", observed.dominant, expected.dominant),
        ("Aa", observed.heterozygous, expected.heterozygous),
        ("aa", observed.recessive, expected.recessive),
    ] {
        let mut row = vec![name.to_string(), number(o, 4), number(e, 4)];
        if let Some(n) = scale {
            row.push(number(e * n, 1));
        }
        rows.push(row);
    }
    rows
}

// ============================================================================
// Hardy-Weinberg
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardyWeinbergInput {
    pub observed: Genotypes,
    pub population: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardyWeinbergOutput {
    pub observed: Genotypes,
    pub test: EquilibriumTest,
    pub population: Option<f64>,
}

pub struct HardyWeinberg;

static HARDY_WEINBERG_PAGE: CalculatorPage = CalculatorPage {
    title: "Hardy-Weinberg Equilibrium Calculator",
    description: "Calculate allele frequencies p and q, expected genotype frequencies and a chi-square test for Hardy-Weinberg equilibrium.",
    meta_description: "Hardy-Weinberg calculator: p, q, p², 2pq, q² and chi-square equilibrium test from genotype frequencies.",
    keywords: &["hardy-weinberg", "allele frequency", "p2 + 2pq + q2", "population genetics"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "The Hardy-Weinberg principle",
        content: "In a large, randomly mating population with no selection, mutation or \
migration, allele and genotype frequencies stay constant between generations. For a gene \
with two alleles at frequencies **p** and **q**, the genotype frequencies are \
p² + 2pq + q² = 1.",
    },
    additional_sections: &[
        Section {
            title: "How to use",
            content: "Enter the observed frequencies of the homozygous dominant (AA), \
heterozygous (Aa) and homozygous recessive (aa) genotypes. They must add up to 1. \
Optionally enter the population size to run the chi-square test on real counts.",
        },
        Section {
            title: "About the p-value",
            content: "The p-value is estimated as e^(−χ²/2) for one degree of freedom. \
This is an approximation; use a statistics package for publication-grade tests.",
        },
    ],
    notes: &["Without a population size the chi-square test assumes 100 individuals."],
};

impl Calculator for HardyWeinberg {
    type Input = HardyWeinbergInput;
    type Output = HardyWeinbergOutput;

    fn id(&self) -> &'static str {
        "hardy-weinberg"
    }

    fn page(&self) -> &'static CalculatorPage {
        &HARDY_WEINBERG_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("dominant", "Homozygous dominant (AA) frequency").placeholder("0.49"),
            FieldSpec::number("heterozygous", "Heterozygous (Aa) frequency").placeholder("0.42"),
            FieldSpec::number("recessive", "Homozygous recessive (aa) frequency").placeholder("0.09"),
            FieldSpec::number("population", "Population size")
                .unit("individuals")
                .optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(HardyWeinbergInput {
            observed: Genotypes {
                dominant: form.non_negative("dominant", "AA frequency")?,
                heterozygous: form.non_negative("heterozygous", "Aa frequency")?,
                recessive: form.non_negative("recessive", "aa frequency")?,
            },
            population: form.optional_positive("population", "Population size")?,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let sum: f64 = input.observed.as_array().iter().sum();
        if (sum - 1.0).abs() > FREQUENCY_TOLERANCE {
            return Err(ValidationError::precondition(format!(
                "Genotype frequencies must sum to 1 (currently {})",
                number(sum, 3)
            )));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let sample = input.population.unwrap_or(DEFAULT_SAMPLE);
        HardyWeinbergOutput {
            observed: input.observed,
            test: equilibrium_test(&input.observed, sample),
            population: input.population,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let test = &output.test;
        ResultView::new()
            .primary("p (dominant allele)", number(test.p, 4))
            .primary("q (recessive allele)", number(test.q, 4))
            .field("Expected AA (p²)", number(test.expected.dominant, 4))
            .field("Expected Aa (2pq)", number(test.expected.heterozygous, 4))
            .field("Expected aa (q²)", number(test.expected.recessive, 4))
            .field("Chi-square", number(test.chi_square, 4))
            .field("Approximate p-value", number(test.p_value, 4))
            .primary("Equilibrium", test.verdict())
            .table(genotype_table(&output.observed, &test.expected, output.population))
    }
}

// ============================================================================
// Allele Frequency
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenotypeCounts {
    pub dominant: u64,
    pub heterozygous: u64,
    pub recessive: u64,
}

impl GenotypeCounts {
    pub fn total(&self) -> u64 {
        self.dominant + self.heterozygous + self.recessive
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlleleFrequencyOutput {
    pub individuals: u64,
    pub observed: Genotypes,
    pub test: EquilibriumTest,
    pub observed_heterozygosity: f64,
    pub expected_heterozygosity: f64,
    /// Inbreeding coefficient F = 1 − Ho/He, absent when He is zero
    pub inbreeding: Option<f64>,
}

pub struct AlleleFrequency;

static ALLELE_FREQUENCY_PAGE: CalculatorPage = CalculatorPage {
    title: "Allele Frequency Calculator",
    description: "Calculate allele frequencies, heterozygosity and inbreeding coefficient from genotype counts.",
    meta_description: "Allele frequency calculator from AA, Aa and aa counts with heterozygosity and chi-square test.",
    keywords: &["allele frequency", "genotype counts", "heterozygosity", "inbreeding coefficient"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Counting alleles",
        content: "Each individual carries two copies of a gene. Homozygous dominant \
individuals contribute two **A** alleles, heterozygotes one of each. The frequency of A is \
p = (2·AA + Aa) / 2N.",
    },
    additional_sections: &[Section {
        title: "Heterozygosity",
        content: "Observed heterozygosity is the fraction of Aa individuals. Expected \
heterozygosity under Hardy-Weinberg is 2pq. The inbreeding coefficient F = 1 − Ho/He is \
positive when heterozygotes are missing.",
    }],
    notes: &["The p-value is the e^(−χ²/2) approximation for one degree of freedom."],
};

impl Calculator for AlleleFrequency {
    type Input = GenotypeCounts;
    type Output = AlleleFrequencyOutput;

    fn id(&self) -> &'static str {
        "allele-frequency"
    }

    fn page(&self) -> &'static CalculatorPage {
        &ALLELE_FREQUENCY_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("dominant", "AA individuals"),
            FieldSpec::number("heterozygous", "Aa individuals"),
            FieldSpec::number("recessive", "aa individuals"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(GenotypeCounts {
            dominant: form.count("dominant", "AA individuals")?,
            heterozygous: form.count("heterozygous", "Aa individuals")?,
            recessive: form.count("recessive", "aa individuals")?,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.total() == 0 {
            return Err(ValidationError::precondition("Enter at least one individual"));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let n = input.total() as f64;
        let observed = Genotypes {
            dominant: input.dominant as f64 / n,
            heterozygous: input.heterozygous as f64 / n,
            recessive: input.recessive as f64 / n,
        };
        let test = equilibrium_test(&observed, n);
        let expected_heterozygosity = test.expected.heterozygous;
        AlleleFrequencyOutput {
            individuals: input.total(),
            observed,
            test,
            observed_heterozygosity: observed.heterozygous,
            expected_heterozygosity,
            inbreeding: (expected_heterozygosity > 0.0)
                .then(|| 1.0 - observed.heterozygous / expected_heterozygosity),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let test = &output.test;
        let mut view = ResultView::new()
            .primary("Frequency of A (p)", number(test.p, 4))
            .primary("Frequency of a (q)", number(test.q, 4))
            .field("Individuals", output.individuals.to_string())
            .field("Alleles", (output.individuals * 2).to_string())
            .field("Observed heterozygosity", number(output.observed_heterozygosity, 4))
            .field("Expected heterozygosity", number(output.expected_heterozygosity, 4));
        if let Some(f) = output.inbreeding {
            view = view.field("Inbreeding coefficient (F)", number(f, 4));
        }
        view.field("Chi-square", number(test.chi_square, 4))
            .field("Approximate p-value", number(test.p_value, 4))
            .primary("Equilibrium", test.verdict())
            .table(genotype_table(
                &output.observed,
                &test.expected,
                Some(output.individuals as f64),
            ))
    }
}

// ============================================================================
// Punnett Square
// ============================================================================

/// Parent genotype as allele pairs, one per gene
pub type Genotype = Vec<[char; 2]>;

#[derive(Debug, Clone, PartialEq)]
pub struct Cross {
    pub mother: Genotype,
    pub father: Genotype,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossOutcome {
    pub mother_gametes: Vec<String>,
    pub father_gametes: Vec<String>,
    /// Offspring genotype for each (mother gamete, father gamete) cell
    pub grid: Vec<Vec<String>>,
    pub genotypes: Vec<(String, usize)>,
    pub phenotypes: Vec<(String, usize)>,
}

impl CrossOutcome {
    pub fn cells(&self) -> usize {
        self.grid.iter().map(Vec::len).sum()
    }
}

pub struct PunnettSquare;

static PUNNETT_PAGE: CalculatorPage = CalculatorPage {
    title: "Punnett Square Calculator",
    description: "Build monohybrid and dihybrid Punnett squares with genotype and phenotype ratios.",
    meta_description: "Punnett square calculator for one- and two-gene crosses with offspring ratios.",
    keywords: &["punnett square", "monohybrid cross", "dihybrid cross", "genotype ratio"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Predicting offspring",
        content: "A Punnett square lists every gamete of one parent across the top and \
every gamete of the other down the side. Each cell is one equally likely offspring \
genotype.",
    },
    additional_sections: &[Section {
        title: "Genotype notation",
        content: "Write each gene as two letters, uppercase for the dominant allele: \
`Aa` for one gene, `AaBb` for two. Genes are assumed to assort independently.",
    }],
    notes: &["Assumes complete dominance and unlinked genes."],
};

fn parse_genotype(raw: &str) -> Result<Genotype, ValidationError> {
    let letters: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if !matches!(letters.len(), 2 | 4) || !letters.iter().all(char::is_ascii_alphabetic) {
        return Err(ValidationError::precondition(
            "Genotypes must have one or two genes, e.g. Aa or AaBb",
        ));
    }
    letters
        .chunks(2)
        .map(|pair| {
            if pair[0].eq_ignore_ascii_case(&pair[1]) {
                Ok([pair[0], pair[1]])
            } else {
                Err(ValidationError::precondition(format!(
                    "Alleles {}{} do not belong to the same gene",
                    pair[0], pair[1]
                )))
            }
        })
        .collect()
}

/// Every gamete: one allele from each gene
fn gametes(genotype: &Genotype) -> Vec<String> {
    genotype.iter().fold(vec![String::new()], |acc, pair| {
        acc.iter()
            .flat_map(|prefix| pair.iter().map(move |allele| format!("{prefix}{allele}")))
            .collect()
    })
}

/// Combine two gametes into a genotype, dominant allele first per gene
fn combine(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| {
            if x.is_ascii_lowercase() && y.is_ascii_uppercase() {
                format!("{y}{x}")
            } else {
                format!("{x}{y}")
            }
        })
        .collect()
}

fn phenotype(genotype: &str) -> String {
    genotype
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let dominant = pair[0].to_ascii_uppercase() as char;
            if pair.iter().any(u8::is_ascii_uppercase) {
                format!("{dominant}_")
            } else {
                let recessive = pair[0] as char;
                format!("{recessive}{recessive}")
            }
        })
        .collect()
}

fn tally(items: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(k, _)| *k == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    counts.sort();
    counts
}

fn ratio(counts: &[(String, usize)]) -> String {
    counts
        .iter()
        .map(|(k, n)| format!("{n} {k}"))
        .collect::<Vec<_>>()
        .join(" : ")
}

impl Calculator for PunnettSquare {
    type Input = Cross;
    type Output = CrossOutcome;

    fn id(&self) -> &'static str {
        "punnett-square"
    }

    fn page(&self) -> &'static CalculatorPage {
        &PUNNETT_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("parent1", "Parent 1 genotype").placeholder("AaBb"),
            FieldSpec::text("parent2", "Parent 2 genotype").placeholder("AaBb"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let mother = form.text("parent1", "Parent 1 genotype")?;
        let father = form.text("parent2", "Parent 2 genotype")?;
        Ok(Cross {
            mother: parse_genotype(&mother)?,
            father: parse_genotype(&father)?,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let genes = |g: &Genotype| -> Vec<char> {
            g.iter().map(|pair| pair[0].to_ascii_lowercase()).collect()
        };
        if genes(&input.mother) != genes(&input.father) {
            return Err(ValidationError::precondition(
                "Both parents must carry the same genes in the same order",
            ));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let mother_gametes = gametes(&input.mother);
        let father_gametes = gametes(&input.father);
        let grid: Vec<Vec<String>> = mother_gametes
            .iter()
            .map(|m| father_gametes.iter().map(|f| combine(m, f)).collect())
            .collect();
        let genotypes = tally(grid.iter().flatten().cloned());
        let phenotypes = tally(grid.iter().flatten().map(|g| phenotype(g)));
        CrossOutcome {
            mother_gametes,
            father_gametes,
            grid,
            genotypes,
            phenotypes,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let cells = output.cells() as f64;
        let mut header = vec!["".to_string()];
        header.extend(output.father_gametes.iter().cloned());
        let mut table = vec![header];
        for (gamete, row) in output.mother_gametes.iter().zip(&output.grid) {
            let mut line = vec![gamete.clone()];
            line.extend(row.iter().cloned());
            table.push(line);
        }

        let mut view = ResultView::new()
            .primary("Genotype ratio", ratio(&output.genotypes))
            .primary("Phenotype ratio", ratio(&output.phenotypes));
        for (genotype, n) in &output.genotypes {
            view = view.field(
                format!("P({genotype})"),
                percent(*n as f64 / cells, 2),
            );
        }
        view.table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::CalculatorLeaf;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hardy_weinberg_at_equilibrium() {
        let input = HardyWeinbergInput {
            observed: Genotypes {
                dominant: 0.49,
                heterozygous: 0.42,
                recessive: 0.09,
            },
            population: None,
        };
        assert!(HardyWeinberg.validate(&input).is_ok());
        let out = HardyWeinberg.compute(&input);
        assert_abs_diff_eq!(out.test.p, 0.70, epsilon = 1e-12);
        assert_abs_diff_eq!(out.test.q, 0.30, epsilon = 1e-12);
        assert_abs_diff_eq!(out.test.expected.dominant, 0.49, epsilon = 1e-12);
        assert_abs_diff_eq!(out.test.expected.heterozygous, 0.42, epsilon = 1e-12);
        assert_abs_diff_eq!(out.test.expected.recessive, 0.09, epsilon = 1e-12);
        assert_abs_diff_eq!(out.test.chi_square, 0.0, epsilon = 1e-9);
        assert!(out.test.in_equilibrium());
    }

    #[test]
    fn test_hardy_weinberg_rejects_bad_sum() {
        let form = FormValues::from_pairs([
            ("dominant", "0.5"),
            ("heterozygous", "0.4"),
            ("recessive", "0.2"),
        ]);
        assert_eq!(
            HardyWeinberg.evaluate(&form).error(),
            Some("Genotype frequencies must sum to 1 (currently 1.100)")
        );
    }

    #[test]
    fn test_hardy_weinberg_tolerance() {
        let form = FormValues::from_pairs([
            ("dominant", "0.4905"),
            ("heterozygous", "0.42"),
            ("recessive", "0.09"),
        ]);
        assert!(HardyWeinberg.evaluate(&form).result().is_some());
    }

    #[test]
    fn test_allele_frequency_from_counts() {
        let out = AlleleFrequency.compute(&GenotypeCounts {
            dominant: 36,
            heterozygous: 48,
            recessive: 16,
        });
        assert_abs_diff_eq!(out.test.p, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(out.test.q, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(out.test.chi_square, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out.inbreeding.unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_allele_frequency_detects_heterozygote_deficit() {
        let out = AlleleFrequency.compute(&GenotypeCounts {
            dominant: 50,
            heterozygous: 0,
            recessive: 50,
        });
        assert_abs_diff_eq!(out.inbreeding.unwrap(), 1.0, epsilon = 1e-12);
        assert!(!out.test.in_equilibrium());
    }

    #[test]
    fn test_allele_frequency_rejects_oversized_counts() {
        let form = FormValues::from_pairs([
            ("dominant", "1e20"),
            ("heterozygous", "1e20"),
            ("recessive", "1"),
        ]);
        assert_eq!(
            AlleleFrequency.evaluate(&form).error(),
            Some("AA individuals is too large")
        );
    }

    #[test]
    fn test_allele_frequency_at_count_limit() {
        let limit = crate::calculators::form::MAX_COUNT.to_string();
        let form = FormValues::from_pairs([
            ("dominant", limit.as_str()),
            ("heterozygous", limit.as_str()),
            ("recessive", limit.as_str()),
        ]);
        assert!(AlleleFrequency.evaluate(&form).result().is_some());
    }

    #[test]
    fn test_monohybrid_cross() {
        let cross = Cross {
            mother: vec![['A', 'a']],
            father: vec![['A', 'a']],
        };
        let out = PunnettSquare.compute(&cross);
        assert_eq!(
            out.genotypes,
            vec![("AA".to_string(), 1), ("Aa".to_string(), 2), ("aa".to_string(), 1)]
        );
        assert_eq!(out.phenotypes, vec![("A_".to_string(), 3), ("aa".to_string(), 1)]);
    }

    #[test]
    fn test_dihybrid_cross_ratio() {
        let form = FormValues::from_pairs([("parent1", "AaBb"), ("parent2", "AaBb")]);
        let evaluation = PunnettSquare.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(
            result.value_of("Phenotype ratio"),
            Some("9 A_B_ : 3 A_bb : 3 aaB_ : 1 aabb")
        );
        // header row plus four gamete rows
        assert_eq!(result.table.as_ref().map(Vec::len), Some(5));
    }

    #[test]
    fn test_punnett_rejects_mismatched_genes() {
        let form = FormValues::from_pairs([("parent1", "Aa"), ("parent2", "Bb")]);
        assert!(PunnettSquare.evaluate(&form).error().is_some());
        let form = FormValues::from_pairs([("parent1", "Ab"), ("parent2", "Aa")]);
        assert_eq!(
            PunnettSquare.evaluate(&form).error(),
            Some("Alleles Ab do not belong to the same gene")
        );
    }
}
