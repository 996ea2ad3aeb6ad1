//! Reference Data Lookup Tables
//!
//! Finite constant tables consumed by the chemistry and molecular biology
//! calculators. Kept apart from calculator logic so they can be extended
//! without touching any formula code.
//!
//! Data sources:
//! - Elements: IUPAC conventional standard atomic weights (H through U)
//! - Codons: NCBI translation table 1 (standard code)
//! - Amino acids: average residue masses (free acid mass minus water)
//! - Acids: first dissociation constants at 25 °C

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

// ============================================================================
// ELEMENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Standard atomic weight, g/mol
    pub mass: f64,
}

pub static ELEMENTS: &[Element] = &[
    Element { number: 1, symbol: "H", name: "Hydrogen", mass: 1.008 },
    Element { number: 2, symbol: "He", name: "Helium", mass: 4.0026 },
    Element { number: 3, symbol: "Li", name: "Lithium", mass: 6.94 },
    Element { number: 4, symbol: "Be", name: "Beryllium", mass: 9.0122 },
    Element { number: 5, symbol: "B", name: "Boron", mass: 10.81 },
    Element { number: 6, symbol: "C", name: "Carbon", mass: 12.011 },
    Element { number: 7, symbol: "N", name: "Nitrogen", mass: 14.007 },
    Element { number: 8, symbol: "O", name: "Oxygen", mass: 15.999 },
    Element { number: 9, symbol: "F", name: "Fluorine", mass: 18.998 },
    Element { number: 10, symbol: "Ne", name: "Neon", mass: 20.180 },
    Element { number: 11, symbol: "Na", name: "Sodium", mass: 22.990 },
    Element { number: 12, symbol: "Mg", name: "Magnesium", mass: 24.305 },
    Element { number: 13, symbol: "Al", name: "Aluminium", mass: 26.982 },
    Element { number: 14, symbol: "Si", name: "Silicon", mass: 28.085 },
    Element { number: 15, symbol: "P", name: "Phosphorus", mass: 30.974 },
    Element { number: 16, symbol: "S", name: "Sulfur", mass: 32.06 },
    Element { number: 17, symbol: "Cl", name: "Chlorine", mass: 35.45 },
    Element { number: 18, symbol: "Ar", name: "Argon", mass: 39.948 },
    Element { number: 19, symbol: "K", name: "Potassium", mass: 39.098 },
    Element { number: 20, symbol: "Ca", name: "Calcium", mass: 40.078 },
    Element { number: 21, symbol: "Sc", name: "Scandium", mass: 44.956 },
    Element { number: 22, symbol: "Ti", name: "Titanium", mass: 47.867 },
    Element { number: 23, symbol: "V", name: "Vanadium", mass: 50.942 },
    Element { number: 24, symbol: "Cr", name: "Chromium", mass: 51.996 },
    Element { number: 25, symbol: "Mn", name: "Manganese", mass: 54.938 },
    Element { number: 26, symbol: "Fe", name: "Iron", mass: 55.845 },
    Element { number: 27, symbol: "Co", name: "Cobalt", mass: 58.933 },
    Element { number: 28, symbol: "Ni", name: "Nickel", mass: 58.693 },
    Element { number: 29, symbol: "Cu", name: "Copper", mass: 63.546 },
    Element { number: 30, symbol: "Zn", name: "Zinc", mass: 65.38 },
    Element { number: 31, symbol: "Ga", name: "Gallium", mass: 69.723 },
    Element { number: 32, symbol: "Ge", name: "Germanium", mass: 72.630 },
    Element { number: 33, symbol: "As", name: "Arsenic", mass: 74.922 },
    Element { number: 34, symbol: "Se", name: "Selenium", mass: 78.971 },
    Element { number: 35, symbol: "Br", name: "Bromine", mass: 79.904 },
    Element { number: 36, symbol: "Kr", name: "Krypton", mass: 83.798 },
    Element { number: 37, symbol: "Rb", name: "Rubidium", mass: 85.468 },
    Element { number: 38, symbol: "Sr", name: "Strontium", mass: 87.62 },
    Element { number: 39, symbol: "Y", name: "Yttrium", mass: 88.906 },
    Element { number: 40, symbol: "Zr", name: "Zirconium", mass: 91.224 },
    Element { number: 41, symbol: "Nb", name: "Niobium", mass: 92.906 },
    Element { number: 42, symbol: "Mo", name: "Molybdenum", mass: 95.95 },
    Element { number: 43, symbol: "Tc", name: "Technetium", mass: 98.0 },
    Element { number: 44, symbol: "Ru", name: "Ruthenium", mass: 101.07 },
    Element { number: 45, symbol: "Rh", name: "Rhodium", mass: 102.91 },
    Element { number: 46, symbol: "Pd", name: "Palladium", mass: 106.42 },
    Element { number: 47, symbol: "Ag", name: "Silver", mass: 107.87 },
    Element { number: 48, symbol: "Cd", name: "Cadmium", mass: 112.41 },
    Element { number: 49, symbol: "In", name: "Indium", mass: 114.82 },
    Element { number: 50, symbol: "Sn", name: "Tin", mass: 118.71 },
    Element { number: 51, symbol: "Sb", name: "Antimony", mass: 121.76 },
    Element { number: 52, symbol: "Te", name: "Tellurium", mass: 127.60 },
    Element { number: 53, symbol: "I", name: "Iodine", mass: 126.90 },
    Element { number: 54, symbol: "Xe", name: "Xenon", mass: 131.29 },
    Element { number: 55, symbol: "Cs", name: "Caesium", mass: 132.91 },
    Element { number: 56, symbol: "Ba", name: "Barium", mass: 137.33 },
    Element { number: 57, symbol: "La", name: "Lanthanum", mass: 138.91 },
    Element { number: 58, symbol: "Ce", name: "Cerium", mass: 140.12 },
    Element { number: 59, symbol: "Pr", name: "Praseodymium", mass: 140.91 },
    Element { number: 60, symbol: "Nd", name: "Neodymium", mass: 144.24 },
    Element { number: 61, symbol: "Pm", name: "Promethium", mass: 145.0 },
    Element { number: 62, symbol: "Sm", name: "Samarium", mass: 150.36 },
    Element { number: 63, symbol: "Eu", name: "Europium", mass: 151.96 },
    Element { number: 64, symbol: "Gd", name: "Gadolinium", mass: 157.25 },
    Element { number: 65, symbol: "Tb", name: "Terbium", mass: 158.93 },
    Element { number: 66, symbol: "Dy", name: "Dysprosium", mass: 162.50 },
    Element { number: 67, symbol: "Ho", name: "Holmium", mass: 164.93 },
    Element { number: 68, symbol: "Er", name: "Erbium", mass: 167.26 },
    Element { number: 69, symbol: "Tm", name: "Thulium", mass: 168.93 },
    Element { number: 70, symbol: "Yb", name: "Ytterbium", mass: 173.05 },
    Element { number: 71, symbol: "Lu", name: "Lutetium", mass: 174.97 },
    Element { number: 72, symbol: "Hf", name: "Hafnium", mass: 178.49 },
    Element { number: 73, symbol: "Ta", name: "Tantalum", mass: 180.95 },
    Element { number: 74, symbol: "W", name: "Tungsten", mass: 183.84 },
    Element { number: 75, symbol: "Re", name: "Rhenium", mass: 186.21 },
    Element { number: 76, symbol: "Os", name: "Osmium", mass: 190.23 },
    Element { number: 77, symbol: "Ir", name: "Iridium", mass: 192.22 },
    Element { number: 78, symbol: "Pt", name: "Platinum", mass: 195.08 },
    Element { number: 79, symbol: "Au", name: "Gold", mass: 196.97 },
    Element { number: 80, symbol: "Hg", name: "Mercury", mass: 200.59 },
    Element { number: 81, symbol: "Tl", name: "Thallium", mass: 204.38 },
    Element { number: 82, symbol: "Pb", name: "Lead", mass: 207.2 },
    Element { number: 83, symbol: "Bi", name: "Bismuth", mass: 208.98 },
    Element { number: 84, symbol: "Po", name: "Polonium", mass: 209.0 },
    Element { number: 85, symbol: "At", name: "Astatine", mass: 210.0 },
    Element { number: 86, symbol: "Rn", name: "Radon", mass: 222.0 },
    Element { number: 87, symbol: "Fr", name: "Francium", mass: 223.0 },
    Element { number: 88, symbol: "Ra", name: "Radium", mass: 226.0 },
    Element { number: 89, symbol: "Ac", name: "Actinium", mass: 227.0 },
    Element { number: 90, symbol: "Th", name: "Thorium", mass: 232.04 },
    Element { number: 91, symbol: "Pa", name: "Protactinium", mass: 231.04 },
    Element { number: 92, symbol: "U", name: "Uranium", mass: 238.03 },
];

static ELEMENT_INDEX: LazyLock<FxHashMap<&'static str, &'static Element>> =
    LazyLock::new(|| ELEMENTS.iter().map(|e| (e.symbol, e)).collect());

/// Look up an element by its case-sensitive symbol ("Na", not "NA")
pub fn element(symbol: &str) -> Option<&'static Element> {
    ELEMENT_INDEX.get(symbol).copied()
}

// ============================================================================
// CODONS
// ============================================================================

/// Amino acid per codon, bases ordered U, C, A, G at each position.
/// `*` marks a stop codon.
const CODON_TABLE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

fn base_index(base: u8) -> Option<usize> {
    match base {
        b'U' | b'T' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

/// Translate one RNA (or DNA coding-strand) codon to a one-letter amino acid.
///
/// Returns `Some('*')` for stop codons and `None` for anything that is not
/// three valid bases.
pub fn translate_codon(codon: &str) -> Option<char> {
    let bytes = codon.as_bytes();
    if bytes.len() != 3 {
        return None;
    }
    let idx = base_index(bytes[0].to_ascii_uppercase())? * 16
        + base_index(bytes[1].to_ascii_uppercase())? * 4
        + base_index(bytes[2].to_ascii_uppercase())?;
    Some(CODON_TABLE[idx] as char)
}

pub const START_CODON: &str = "AUG";

// ============================================================================
// AMINO ACIDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AminoAcid {
    pub code: char,
    pub abbreviation: &'static str,
    pub name: &'static str,
    /// Average residue mass, Da
    pub residue_mass: f64,
}

/// Mass of the water added back for the free termini, Da
pub const WATER_MASS: f64 = 18.01524;

pub static AMINO_ACIDS: &[AminoAcid] = &[
    AminoAcid { code: 'A', abbreviation: "Ala", name: "Alanine", residue_mass: 71.0788 },
    AminoAcid { code: 'R', abbreviation: "Arg", name: "Arginine", residue_mass: 156.1875 },
    AminoAcid { code: 'N', abbreviation: "Asn", name: "Asparagine", residue_mass: 114.1038 },
    AminoAcid { code: 'D', abbreviation: "Asp", name: "Aspartic acid", residue_mass: 115.0886 },
    AminoAcid { code: 'C', abbreviation: "Cys", name: "Cysteine", residue_mass: 103.1388 },
    AminoAcid { code: 'E', abbreviation: "Glu", name: "Glutamic acid", residue_mass: 129.1155 },
    AminoAcid { code: 'Q', abbreviation: "Gln", name: "Glutamine", residue_mass: 128.1307 },
    AminoAcid { code: 'G', abbreviation: "Gly", name: "Glycine", residue_mass: 57.0519 },
    AminoAcid { code: 'H', abbreviation: "His", name: "Histidine", residue_mass: 137.1411 },
    AminoAcid { code: 'I', abbreviation: "Ile", name: "Isoleucine", residue_mass: 113.1594 },
    AminoAcid { code: 'L', abbreviation: "Leu", name: "Leucine", residue_mass: 113.1594 },
    AminoAcid { code: 'K', abbreviation: "Lys", name: "Lysine", residue_mass: 128.1741 },
    AminoAcid { code: 'M', abbreviation: "Met", name: "Methionine", residue_mass: 131.1926 },
    AminoAcid { code: 'F', abbreviation: "Phe", name: "Phenylalanine", residue_mass: 147.1766 },
    AminoAcid { code: 'P', abbreviation: "Pro", name: "Proline", residue_mass: 97.1167 },
    AminoAcid { code: 'S', abbreviation: "Ser", name: "Serine", residue_mass: 87.0782 },
    AminoAcid { code: 'T', abbreviation: "Thr", name: "Threonine", residue_mass: 101.1051 },
    AminoAcid { code: 'W', abbreviation: "Trp", name: "Tryptophan", residue_mass: 186.2132 },
    AminoAcid { code: 'Y', abbreviation: "Tyr", name: "Tyrosine", residue_mass: 163.1760 },
    AminoAcid { code: 'V', abbreviation: "Val", name: "Valine", residue_mass: 99.1326 },
];

static AMINO_ACID_INDEX: LazyLock<FxHashMap<char, &'static AminoAcid>> =
    LazyLock::new(|| AMINO_ACIDS.iter().map(|a| (a.code, a)).collect());

/// Look up an amino acid by one-letter code (case-insensitive)
pub fn amino_acid(code: char) -> Option<&'static AminoAcid> {
    AMINO_ACID_INDEX.get(&code.to_ascii_uppercase()).copied()
}

// ============================================================================
// COMMON ACIDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acid {
    pub id: &'static str,
    pub name: &'static str,
    pub formula: &'static str,
    /// First dissociation constant; `None` for strong acids
    pub ka: Option<f64>,
    /// Protons released per formula unit when fully dissociated
    pub protons: u8,
}

impl Acid {
    pub fn is_strong(&self) -> bool {
        self.ka.is_none()
    }

    pub fn pka(&self) -> Option<f64> {
        self.ka.map(|ka| -ka.log10())
    }
}

pub static ACIDS: &[Acid] = &[
    Acid { id: "hydrochloric", name: "Hydrochloric acid", formula: "HCl", ka: None, protons: 1 },
    Acid { id: "hydrobromic", name: "Hydrobromic acid", formula: "HBr", ka: None, protons: 1 },
    Acid { id: "nitric", name: "Nitric acid", formula: "HNO3", ka: None, protons: 1 },
    Acid { id: "perchloric", name: "Perchloric acid", formula: "HClO4", ka: None, protons: 1 },
    // Both protons treated as fully dissociated
    Acid { id: "sulfuric", name: "Sulfuric acid", formula: "H2SO4", ka: None, protons: 2 },
    Acid { id: "phosphoric", name: "Phosphoric acid", formula: "H3PO4", ka: Some(7.5e-3), protons: 1 },
    Acid { id: "hydrofluoric", name: "Hydrofluoric acid", formula: "HF", ka: Some(6.8e-4), protons: 1 },
    Acid { id: "citric", name: "Citric acid", formula: "C6H8O7", ka: Some(7.4e-4), protons: 1 },
    Acid { id: "formic", name: "Formic acid", formula: "HCOOH", ka: Some(1.8e-4), protons: 1 },
    Acid { id: "lactic", name: "Lactic acid", formula: "C3H6O3", ka: Some(1.4e-4), protons: 1 },
    Acid { id: "benzoic", name: "Benzoic acid", formula: "C6H5COOH", ka: Some(6.3e-5), protons: 1 },
    Acid { id: "acetic", name: "Acetic acid", formula: "CH3COOH", ka: Some(1.8e-5), protons: 1 },
    Acid { id: "carbonic", name: "Carbonic acid", formula: "H2CO3", ka: Some(4.3e-7), protons: 1 },
    Acid { id: "hypochlorous", name: "Hypochlorous acid", formula: "HClO", ka: Some(3.0e-8), protons: 1 },
];

pub fn acid(id: &str) -> Option<&'static Acid> {
    ACIDS.iter().find(|a| a.id == id)
}
