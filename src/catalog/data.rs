//! Published catalog tables.
//!
//! Every `CalculatorEntry::id` listed here must be registered in
//! `calculators::Registry::builtin()`; the router tests walk this table.

use super::{CalculatorEntry, Category, CategoryContents, Subcategory};

// ============================================================================
// Biology
// ============================================================================

const CELL_BIOLOGY: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "cell-size",
        name: "Cell Size Calculator",
        description: "Volume, surface area and surface-to-volume ratio for common cell shapes",
    },
    CalculatorEntry {
        id: "doubling-time",
        name: "Cell Doubling Time Calculator",
        description: "Growth rate, doubling time and generations from two population counts",
    },
    CalculatorEntry {
        id: "hemocytometer",
        name: "Hemocytometer Cell Count Calculator",
        description: "Cell density and viability from hemocytometer square counts",
    },
];

const GENETICS: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "hardy-weinberg",
        name: "Hardy-Weinberg Equilibrium Calculator",
        description: "Allele frequencies, expected genotypes and chi-square test from genotype frequencies",
    },
    CalculatorEntry {
        id: "allele-frequency",
        name: "Allele Frequency Calculator",
        description: "Allele frequencies and heterozygosity from observed genotype counts",
    },
    CalculatorEntry {
        id: "punnett-square",
        name: "Punnett Square Calculator",
        description: "Offspring genotype and phenotype ratios for one or two genes",
    },
];

const MOLECULAR_BIOLOGY: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "dna-transcription",
        name: "DNA Transcription & Translation Calculator",
        description: "Complementary strand, mRNA transcript and protein sequence from DNA",
    },
    CalculatorEntry {
        id: "dna-concentration",
        name: "DNA Concentration Calculator",
        description: "Nucleic acid concentration and purity from A260/A280 absorbance",
    },
    CalculatorEntry {
        id: "primer-tm",
        name: "PCR Primer Melting Temperature Calculator",
        description: "Primer melting temperature, GC content and annealing temperature",
    },
];

const BIOCHEMISTRY: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "michaelis-menten",
        name: "Michaelis-Menten Kinetics Calculator",
        description: "Reaction velocity from Vmax, Km and substrate concentration",
    },
    CalculatorEntry {
        id: "lineweaver-burk",
        name: "Lineweaver-Burk Plot Calculator",
        description: "Vmax and Km from a double-reciprocal fit of two measurements",
    },
    CalculatorEntry {
        id: "protein-molecular-weight",
        name: "Protein Molecular Weight Calculator",
        description: "Molecular weight and extinction coefficient from an amino acid sequence",
    },
];

const BIOLOGY_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory {
        id: "cell-biology",
        name: "Cell Biology",
        description: "Cell geometry, growth and counting",
        calculators: CELL_BIOLOGY,
    },
    Subcategory {
        id: "genetics",
        name: "Genetics",
        description: "Population genetics and inheritance",
        calculators: GENETICS,
    },
    Subcategory {
        id: "molecular-biology",
        name: "Molecular Biology",
        description: "Nucleic acid sequences, quantification and PCR",
        calculators: MOLECULAR_BIOLOGY,
    },
    Subcategory {
        id: "biochemistry",
        name: "Biochemistry",
        description: "Enzyme kinetics and protein properties",
        calculators: BIOCHEMISTRY,
    },
];

// ============================================================================
// Chemistry
// ============================================================================

const GENERAL_CHEMISTRY: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "molecular-weight",
        name: "Molecular Weight Calculator",
        description: "Molar mass and element breakdown of a chemical formula",
    },
    CalculatorEntry {
        id: "percent-composition",
        name: "Percent Composition Calculator",
        description: "Mass percent of each element in a compound",
    },
    CalculatorEntry {
        id: "stoichiometry",
        name: "Stoichiometry Calculator",
        description: "Product or reactant mass from a balanced equation's mole ratio",
    },
    CalculatorEntry {
        id: "mole-calculator",
        name: "Mole Calculator",
        description: "Convert between grams, moles and number of particles",
    },
];

const SOLUTIONS: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "molarity",
        name: "Molarity Calculator",
        description: "Molar concentration from solute mass and solution volume",
    },
    CalculatorEntry {
        id: "solution-dilution",
        name: "Solution Dilution Calculator",
        description: "Solve C1V1 = C2V2 for the missing value",
    },
    CalculatorEntry {
        id: "ph",
        name: "pH Calculator",
        description: "pH, pOH and ion concentrations, including common weak and strong acids",
    },
    CalculatorEntry {
        id: "buffer-ph",
        name: "Buffer pH Calculator",
        description: "Henderson-Hasselbalch buffer pH from pKa and component concentrations",
    },
];

const GAS_LAWS: &[CalculatorEntry] = &[CalculatorEntry {
    id: "ideal-gas",
    name: "Ideal Gas Law Calculator",
    description: "Solve PV = nRT for pressure, volume, moles or temperature",
}];

const KINETICS: &[CalculatorEntry] = &[CalculatorEntry {
    id: "half-life",
    name: "Half-Life Calculator",
    description: "Remaining quantity and decay constant for first-order decay",
}];

const CHEMISTRY_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory {
        id: "general-chemistry",
        name: "General Chemistry",
        description: "Formula masses, composition and mole conversions",
        calculators: GENERAL_CHEMISTRY,
    },
    Subcategory {
        id: "solutions",
        name: "Solutions",
        description: "Concentration, dilution and acidity",
        calculators: SOLUTIONS,
    },
    Subcategory {
        id: "gas-laws",
        name: "Gas Laws",
        description: "Ideal gas relationships",
        calculators: GAS_LAWS,
    },
    Subcategory {
        id: "kinetics",
        name: "Kinetics",
        description: "Reaction rates and decay",
        calculators: KINETICS,
    },
];

// ============================================================================
// Flat categories
// ============================================================================

const ECOLOGY: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "population-growth",
        name: "Population Growth Calculator",
        description: "Exponential and logistic population projections",
    },
    CalculatorEntry {
        id: "shannon-diversity",
        name: "Shannon Diversity Index Calculator",
        description: "Shannon index, evenness and Simpson diversity from species counts",
    },
    CalculatorEntry {
        id: "mark-recapture",
        name: "Mark-Recapture Population Estimator",
        description: "Lincoln-Petersen and Chapman population size estimates",
    },
];

const HEALTH: &[CalculatorEntry] = &[
    CalculatorEntry {
        id: "blood-pressure",
        name: "Blood Pressure Calculator",
        description: "Blood pressure category, mean arterial pressure and reading averages",
    },
    CalculatorEntry {
        id: "metabolic-rate",
        name: "Basal Metabolic Rate Calculator",
        description: "BMR and daily energy needs by activity level",
    },
    CalculatorEntry {
        id: "bmi",
        name: "BMI Calculator",
        description: "Body mass index, weight category and healthy weight range",
    },
];

// ============================================================================
// Top-level table
// ============================================================================

pub static CATEGORIES: &[Category] = &[
    Category {
        id: "biology",
        name: "Biology",
        description: "Cell biology, genetics, molecular biology and biochemistry",
        icon: "🧬",
        color_token: "emerald",
        contents: CategoryContents::Subcategories(BIOLOGY_SUBCATEGORIES),
    },
    Category {
        id: "chemistry",
        name: "Chemistry",
        description: "Formula masses, solutions, gases and reaction kinetics",
        icon: "⚗️",
        color_token: "sky",
        contents: CategoryContents::Subcategories(CHEMISTRY_SUBCATEGORIES),
    },
    Category {
        id: "ecology",
        name: "Ecology",
        description: "Population dynamics and biodiversity",
        icon: "🌿",
        color_token: "lime",
        contents: CategoryContents::Calculators(ECOLOGY),
    },
    Category {
        id: "conversion",
        name: "Conversion",
        description: "Unit conversions",
        icon: "🔁",
        color_token: "slate",
        contents: CategoryContents::Calculators(&[]),
    },
    Category {
        id: "construction",
        name: "Construction",
        description: "Materials and measurements",
        icon: "🏗️",
        color_token: "orange",
        contents: CategoryContents::Calculators(&[]),
    },
    Category {
        id: "everyday",
        name: "Everyday Life",
        description: "Day-to-day calculations",
        icon: "🏠",
        color_token: "amber",
        contents: CategoryContents::Calculators(&[]),
    },
    Category {
        id: "finance",
        name: "Finance",
        description: "Loans, savings and interest",
        icon: "💰",
        color_token: "yellow",
        contents: CategoryContents::Calculators(&[]),
    },
    Category {
        id: "math",
        name: "Math",
        description: "Algebra, geometry and arithmetic",
        icon: "➗",
        color_token: "indigo",
        contents: CategoryContents::Calculators(&[]),
    },
    Category {
        id: "sport",
        name: "Sport",
        description: "Training and performance",
        icon: "🏃",
        color_token: "red",
        contents: CategoryContents::Calculators(&[]),
    },
    Category {
        id: "food",
        name: "Food",
        description: "Cooking and nutrition",
        icon: "🍎",
        color_token: "rose",
        contents: CategoryContents::Calculators(&[]),
    },
    Category {
        id: "health",
        name: "Health",
        description: "Cardiovascular health, metabolism and body composition",
        icon: "❤️",
        color_token: "pink",
        contents: CategoryContents::Calculators(HEALTH),
    },
    Category {
        id: "statistics",
        name: "Statistics",
        description: "Descriptive and inferential statistics",
        icon: "📊",
        color_token: "violet",
        contents: CategoryContents::Calculators(&[]),
    },
    Category {
        id: "other",
        name: "Other",
        description: "Everything else",
        icon: "✨",
        color_token: "gray",
        contents: CategoryContents::Calculators(&[]),
    },
];
