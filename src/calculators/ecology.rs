//! Ecology calculators: population growth, species diversity, mark-recapture.

use crate::calculators::form::{FieldOptions, FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, percent};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

const BACK_LINK: &str = "/category/ecology";
const BACK_LABEL: &str = "Ecology Calculators";

// ============================================================================
// Population Growth
// ============================================================================

/// Rows in the projection table, including t = 0
const PROJECTION_STEPS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthModel {
    Exponential,
    Logistic,
}

impl FieldOptions for GrowthModel {
    const ALL: &'static [Self] = &[GrowthModel::Exponential, GrowthModel::Logistic];

    fn value(&self) -> &'static str {
        match self {
            GrowthModel::Exponential => "exponential",
            GrowthModel::Logistic => "logistic",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            GrowthModel::Exponential => "Exponential (unlimited resources)",
            GrowthModel::Logistic => "Logistic (carrying capacity)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthInput {
    pub model: GrowthModel,
    pub initial: f64,
    pub rate: f64,
    pub time: f64,
    pub capacity: Option<f64>,
}

impl GrowthInput {
    pub fn population_at(&self, t: f64) -> f64 {
        match (self.model, self.capacity) {
            (GrowthModel::Logistic, Some(k)) => {
                k / (1.0 + (k - self.initial) / self.initial * (-self.rate * t).exp())
            }
            _ => self.initial * (self.rate * t).exp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthProjection {
    pub final_population: f64,
    pub change: f64,
    pub doubling_time: Option<f64>,
    pub projection: Vec<(f64, f64)>,
    pub capacity: Option<f64>,
}

pub struct PopulationGrowth;

static POPULATION_GROWTH_PAGE: CalculatorPage = CalculatorPage {
    title: "Population Growth Calculator",
    description: "Project population size with exponential or logistic growth models.",
    meta_description: "Population growth calculator: exponential and logistic models with carrying capacity.",
    keywords: &["population growth", "exponential growth", "logistic growth", "carrying capacity"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Growth models",
        content: "With unlimited resources a population grows exponentially, N = N₀·e^(rt). \
When resources are limited growth slows as the population approaches the carrying \
capacity K: N = K / (1 + ((K − N₀)/N₀)·e^(−rt)).",
    },
    additional_sections: &[],
    notes: &["r is the intrinsic growth rate per unit of time; use the same time unit for t."],
};

impl Calculator for PopulationGrowth {
    type Input = GrowthInput;
    type Output = GrowthProjection;

    fn id(&self) -> &'static str {
        "population-growth"
    }

    fn page(&self) -> &'static CalculatorPage {
        &POPULATION_GROWTH_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice::<GrowthModel>("model", "Growth model"),
            FieldSpec::number("initial", "Initial population (N₀)"),
            FieldSpec::number("rate", "Growth rate (r)").help("Negative for a declining population"),
            FieldSpec::number("time", "Time (t)"),
            FieldSpec::number("capacity", "Carrying capacity (K)")
                .help("Logistic model only")
                .optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let model = form.choice::<GrowthModel>("model", "Growth model")?;
        Ok(GrowthInput {
            model,
            initial: form.positive("initial", "Initial population")?,
            rate: form.number("rate", "Growth rate")?,
            time: form.non_negative("time", "Time")?,
            capacity: match model {
                GrowthModel::Logistic => Some(form.positive("capacity", "Carrying capacity")?),
                GrowthModel::Exponential => None,
            },
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let final_population = input.population_at(input.time);
        let step = input.time / (PROJECTION_STEPS - 1) as f64;
        GrowthProjection {
            final_population,
            change: final_population - input.initial,
            doubling_time: (input.model == GrowthModel::Exponential && input.rate > 0.0)
                .then(|| std::f64::consts::LN_2 / input.rate),
            projection: (0..PROJECTION_STEPS)
                .map(|i| {
                    let t = step * i as f64;
                    (t, input.population_at(t))
                })
                .collect(),
            capacity: input.capacity,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary("Population at time t", number(output.final_population, 1))
            .field("Change", number(output.change, 1));
        if let Some(doubling) = output.doubling_time {
            view = view.field("Doubling time", number(doubling, 3));
        }
        if let Some(k) = output.capacity {
            view = view.field("Percent of carrying capacity", percent(output.final_population / k, 1));
        }
        let mut rows = vec![vec!["t".to_string(), "N".to_string()]];
        rows.extend(
            output
                .projection
                .iter()
                .map(|(t, n)| vec![number(*t, 2), number(*n, 1)]),
        );
        view.table(rows)
    }
}

// ============================================================================
// Shannon Diversity
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DiversityIndices {
    pub richness: usize,
    pub individuals: u64,
    /// Shannon H′ (natural log)
    pub shannon: f64,
    /// Pielou's J′, undefined for a single species
    pub evenness: Option<f64>,
    /// Simpson's 1 − D (unbiased D), undefined for fewer than two individuals
    pub simpson: Option<f64>,
}

/// Shannon, Pielou and Simpson indices from per-species counts
pub fn diversity(counts: &[u64]) -> DiversityIndices {
    let present: Vec<f64> = counts.iter().filter(|&&n| n > 0).map(|&n| n as f64).collect();
    let total: f64 = present.iter().sum();
    let shannon = -present
        .iter()
        .map(|n| {
            let p = n / total;
            p * p.ln()
        })
        .sum::<f64>();
    let richness = present.len();
    let simpson = (total > 1.0).then(|| {
        1.0 - present.iter().map(|n| n * (n - 1.0)).sum::<f64>() / (total * (total - 1.0))
    });
    DiversityIndices {
        richness,
        individuals: total as u64,
        shannon,
        evenness: (richness > 1).then(|| shannon / (richness as f64).ln()),
        simpson,
    }
}

pub struct ShannonDiversity;

static SHANNON_PAGE: CalculatorPage = CalculatorPage {
    title: "Shannon Diversity Index Calculator",
    description: "Calculate Shannon diversity H′, Pielou's evenness and Simpson's index from species counts.",
    meta_description: "Shannon-Wiener diversity index, evenness and Simpson's 1 − D calculator.",
    keywords: &["shannon diversity index", "species evenness", "simpson index", "biodiversity"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Measuring diversity",
        content: "The Shannon index H′ = −Σ pᵢ ln pᵢ grows with both the number of species and \
how evenly individuals are spread among them. Evenness J′ = H′ / ln S rescales it to 0–1.",
    },
    additional_sections: &[Section {
        title: "Simpson's index",
        content: "Simpson's 1 − D is the probability that two individuals drawn at random \
belong to different species.",
    }],
    notes: &["Enter one count per species, separated by commas, spaces or new lines."],
};

impl Calculator for ShannonDiversity {
    type Input = Vec<u64>;
    type Output = DiversityIndices;

    fn id(&self) -> &'static str {
        "shannon-diversity"
    }

    fn page(&self) -> &'static CalculatorPage {
        &SHANNON_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::textarea("counts", "Individuals per species").placeholder("25, 18, 12, 7, 3")]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        form.text("counts", "Individuals per species")?
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<u64>().map_err(|_| {
                    ValidationError::precondition(format!(
                        "Species counts must be whole numbers: \"{token}\""
                    ))
                })
            })
            .collect()
    }

    fn validate(&self, counts: &Self::Input) -> Result<(), ValidationError> {
        if counts.iter().all(|&n| n == 0) {
            return Err(ValidationError::precondition(
                "Enter at least one species with individuals",
            ));
        }
        Ok(())
    }

    fn compute(&self, counts: &Self::Input) -> Self::Output {
        diversity(counts)
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary("Shannon index (H′)", number(output.shannon, 4))
            .field("Species richness (S)", output.richness.to_string())
            .field("Individuals (N)", output.individuals.to_string());
        if let Some(evenness) = output.evenness {
            view = view.primary("Evenness (J′)", number(evenness, 4));
        }
        if let Some(simpson) = output.simpson {
            view = view.field("Simpson's index (1 − D)", number(simpson, 4));
        }
        view
    }
}

// ============================================================================
// Mark-Recapture
// ============================================================================

const Z_95: f64 = 1.96;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureCounts {
    /// Marked and released in the first session (M)
    pub marked: u64,
    /// Caught in the second session (C)
    pub captured: u64,
    /// Marked animals among the second catch (R)
    pub recaptured: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationEstimate {
    /// Undefined when nothing was recaptured
    pub lincoln_petersen: Option<f64>,
    pub chapman: f64,
    pub chapman_interval: (f64, f64),
}

pub struct MarkRecapture;

static MARK_RECAPTURE_PAGE: CalculatorPage = CalculatorPage {
    title: "Mark and Recapture Calculator",
    description: "Estimate population size with the Lincoln-Petersen and Chapman estimators.",
    meta_description: "Mark-recapture population estimate: Lincoln-Petersen index and Chapman estimator with confidence interval.",
    keywords: &["mark recapture", "lincoln-petersen", "chapman estimator", "population size"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Capture, mark, recapture",
        content: "Mark M animals and release them. Later catch C animals, R of which are \
marked. If marked animals mixed evenly, R/C ≈ M/N, so N ≈ M·C/R (Lincoln-Petersen).",
    },
    additional_sections: &[Section {
        title: "Chapman's correction",
        content: "N = (M+1)(C+1)/(R+1) − 1 is less biased for small samples and is defined \
even when no marked animals are recaptured.",
    }],
    notes: &["Assumes a closed population and that marks are not lost."],
};

impl Calculator for MarkRecapture {
    type Input = CaptureCounts;
    type Output = PopulationEstimate;

    fn id(&self) -> &'static str {
        "mark-recapture"
    }

    fn page(&self) -> &'static CalculatorPage {
        &MARK_RECAPTURE_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("marked", "Marked in first sample (M)"),
            FieldSpec::number("captured", "Caught in second sample (C)"),
            FieldSpec::number("recaptured", "Marked in second sample (R)"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(CaptureCounts {
            marked: form.count("marked", "Marked in first sample")?,
            captured: form.count("captured", "Caught in second sample")?,
            recaptured: form.count("recaptured", "Marked in second sample")?,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.marked == 0 || input.captured == 0 {
            return Err(ValidationError::precondition(
                "Both samples must contain at least one animal",
            ));
        }
        if input.recaptured > input.captured || input.recaptured > input.marked {
            return Err(ValidationError::precondition(
                "Recaptured animals cannot exceed either sample",
            ));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let m = input.marked as f64;
        let c = input.captured as f64;
        let r = input.recaptured as f64;
        let chapman = (m + 1.0) * (c + 1.0) / (r + 1.0) - 1.0;
        let variance =
            (m + 1.0) * (c + 1.0) * (m - r) * (c - r) / ((r + 1.0).powi(2) * (r + 2.0));
        let margin = Z_95 * variance.sqrt();
        PopulationEstimate {
            lincoln_petersen: (input.recaptured > 0).then(|| m * c / r),
            chapman,
            chapman_interval: ((chapman - margin).max(m + c - r), chapman + margin),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let lincoln = output
            .lincoln_petersen
            .map(|n| number(n, 0))
            .unwrap_or_else(|| "Undefined (no recaptures)".to_string());
        ResultView::new()
            .primary("Lincoln-Petersen estimate", lincoln)
            .primary("Chapman estimate", number(output.chapman, 0))
            .field(
                "Chapman 95% interval",
                format!(
                    "{} – {}",
                    number(output.chapman_interval.0, 0),
                    number(output.chapman_interval.1, 0)
                ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::CalculatorLeaf;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_exponential_growth() {
        let out = PopulationGrowth.compute(&GrowthInput {
            model: GrowthModel::Exponential,
            initial: 100.0,
            rate: 0.1,
            time: 10.0,
            capacity: None,
        });
        assert_abs_diff_eq!(out.final_population, 100.0 * std::f64::consts::E, epsilon = 1e-9);
        assert_eq!(out.projection.len(), PROJECTION_STEPS);
        assert_abs_diff_eq!(out.projection[0].1, 100.0);
    }

    #[test]
    fn test_logistic_approaches_capacity() {
        let input = GrowthInput {
            model: GrowthModel::Logistic,
            initial: 100.0,
            rate: 0.5,
            time: 100.0,
            capacity: Some(1000.0),
        };
        assert_abs_diff_eq!(input.population_at(0.0), 100.0, epsilon = 1e-9);
        let out = PopulationGrowth.compute(&input);
        assert_abs_diff_eq!(out.final_population, 1000.0, epsilon = 1e-6);
        assert_eq!(out.doubling_time, None);
    }

    #[test]
    fn test_logistic_requires_capacity() {
        let form = FormValues::from_pairs([
            ("model", "logistic"),
            ("initial", "10"),
            ("rate", "0.2"),
            ("time", "5"),
        ]);
        assert_eq!(
            PopulationGrowth.evaluate(&form).error(),
            Some("Carrying capacity is required")
        );
    }

    #[test]
    fn test_even_community() {
        let out = diversity(&[10, 10, 10, 10]);
        assert_abs_diff_eq!(out.shannon, 4f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(out.evenness.unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.simpson.unwrap(), 1.0 - 360.0 / 1560.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_species_has_no_evenness() {
        let out = diversity(&[12, 0]);
        assert_eq!(out.richness, 1);
        assert_abs_diff_eq!(out.shannon, 0.0);
        assert_eq!(out.evenness, None);
    }

    #[test]
    fn test_counts_parsing() {
        let form = FormValues::from_pairs([("counts", "25, 18\n12;7 3")]);
        assert_eq!(ShannonDiversity.parse(&form), Ok(vec![25, 18, 12, 7, 3]));
        let form = FormValues::from_pairs([("counts", "4, lots")]);
        assert_eq!(
            ShannonDiversity.evaluate(&form).error(),
            Some("Species counts must be whole numbers: \"lots\"")
        );
    }

    #[test]
    fn test_mark_recapture() {
        let out = MarkRecapture.compute(&CaptureCounts {
            marked: 50,
            captured: 40,
            recaptured: 10,
        });
        assert_abs_diff_eq!(out.lincoln_petersen.unwrap(), 200.0);
        assert_abs_diff_eq!(out.chapman, 51.0 * 41.0 / 11.0 - 1.0, epsilon = 1e-12);
        assert!(out.chapman_interval.0 < out.chapman && out.chapman < out.chapman_interval.1);
    }

    #[test]
    fn test_mark_recapture_without_recaptures() {
        let form = FormValues::from_pairs([("marked", "20"), ("captured", "15"), ("recaptured", "0")]);
        let evaluation = MarkRecapture.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(
            result.value_of("Lincoln-Petersen estimate"),
            Some("Undefined (no recaptures)")
        );
        assert_eq!(result.value_of("Chapman estimate"), Some("335"));
    }

    #[test]
    fn test_recaptures_cannot_exceed_catch() {
        let form = FormValues::from_pairs([("marked", "20"), ("captured", "5"), ("recaptured", "8")]);
        assert!(MarkRecapture.evaluate(&form).error().is_some());
    }
}
