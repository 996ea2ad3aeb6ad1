//! Molecular biology calculators: transcription and translation, nucleic acid
//! quantification, primer melting temperature.

use crate::calculators::form::{FieldOptions, FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, percent, with_unit};
use crate::calculators::lookup_tables::translate_codon;
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

const BACK_LINK: &str = "/category/biology/molecular-biology";
const BACK_LABEL: &str = "Molecular Biology Calculators";

/// Uppercased sequence with whitespace removed; only A, T, G and C allowed
fn parse_dna(form: &FormValues, name: &'static str, label: &'static str) -> Result<String, ValidationError> {
    let sequence: String = form
        .text(name, label)?
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if !sequence.chars().all(|c| matches!(c, 'A' | 'T' | 'G' | 'C')) {
        return Err(ValidationError::precondition(
            "Sequence must contain only A, T, G and C",
        ));
    }
    Ok(sequence)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseCounts {
    pub a: usize,
    pub t: usize,
    pub g: usize,
    pub c: usize,
}

impl BaseCounts {
    pub fn of(sequence: &str) -> Self {
        sequence.chars().fold(Self::default(), |mut counts, base| {
            match base {
                'A' => counts.a += 1,
                'T' => counts.t += 1,
                'G' => counts.g += 1,
                'C' => counts.c += 1,
                _ => {}
            }
            counts
        })
    }

    pub fn len(&self) -> usize {
        self.a + self.t + self.g + self.c
    }

    pub fn gc(&self) -> usize {
        self.g + self.c
    }

    /// GC fraction, zero for an empty sequence
    pub fn gc_fraction(&self) -> f64 {
        match self.len() {
            0 => 0.0,
            n => self.gc() as f64 / n as f64,
        }
    }
}

fn complement_base(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        other => other,
    }
}

// ============================================================================
// DNA Transcription
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    pub complement: String,
    pub reverse_complement: String,
    /// mRNA read off the coding strand (T → U)
    pub rna: String,
    /// One-letter protein, stop codon shown as `*`
    pub protein: String,
    pub counts: BaseCounts,
}

pub struct DnaTranscription;

static DNA_TRANSCRIPTION_PAGE: CalculatorPage = CalculatorPage {
    title: "DNA Transcription & Translation Calculator",
    description: "Get the complementary strand, mRNA transcript, protein translation and GC content of a DNA sequence.",
    meta_description: "Transcribe DNA to mRNA and translate to protein with the standard codon table.",
    keywords: &["dna to rna", "transcription", "translation", "complementary strand", "gc content"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "From DNA to protein",
        content: "The coding strand of DNA has the same sequence as its mRNA, with uracil \
(U) in place of thymine (T). Each three-base codon of the mRNA specifies one amino acid.",
    },
    additional_sections: &[Section {
        title: "Base pairing",
        content: "A pairs with T and G pairs with C. The complementary strand is read in \
the same direction; the reverse complement is read 5′ → 3′.",
    }],
    notes: &["Translation starts at the first base and stops at the first stop codon."],
};

impl Calculator for DnaTranscription {
    type Input = String;
    type Output = Transcription;

    fn id(&self) -> &'static str {
        "dna-transcription"
    }

    fn page(&self) -> &'static CalculatorPage {
        &DNA_TRANSCRIPTION_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::textarea("sequence", "DNA sequence (coding strand)")
            .placeholder("ATGGCCATTGTAATGGGCCGCTGA")]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        parse_dna(form, "sequence", "DNA sequence")
    }

    fn compute(&self, sequence: &Self::Input) -> Self::Output {
        let complement: String = sequence.chars().map(complement_base).collect();
        let rna: String = sequence.chars().map(|b| if b == 'T' { 'U' } else { b }).collect();

        let mut protein = String::new();
        for codon in rna.as_bytes().chunks_exact(3) {
            let Some(residue) = std::str::from_utf8(codon).ok().and_then(translate_codon) else {
                break;
            };
            protein.push(residue);
            if residue == '*' {
                break;
            }
        }

        Transcription {
            reverse_complement: complement.chars().rev().collect(),
            complement,
            rna,
            protein,
            counts: BaseCounts::of(sequence),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary("Complementary strand", output.complement.clone())
            .field("Reverse complement (5′→3′)", output.reverse_complement.clone())
            .primary("mRNA", output.rna.clone())
            .field("Length", format!("{} bp", output.counts.len()))
            .field("GC content", percent(output.counts.gc_fraction(), 1));
        view = if output.protein.is_empty() {
            view.field("Protein", "Sequence shorter than one codon")
        } else {
            view.field("Protein", output.protein.clone())
        };
        view.table(vec![
            vec!["Base".into(), "Count".into()],
            vec!["A".into(), output.counts.a.to_string()],
            vec!["T".into(), output.counts.t.to_string()],
            vec!["G".into(), output.counts.g.to_string()],
            vec!["C".into(), output.counts.c.to_string()],
        ])
    }
}

// ============================================================================
// DNA Concentration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NucleicAcid {
    DoubleStranded,
    SingleStranded,
    Rna,
    Oligo,
}

impl FieldOptions for NucleicAcid {
    const ALL: &'static [Self] = &[
        NucleicAcid::DoubleStranded,
        NucleicAcid::SingleStranded,
        NucleicAcid::Rna,
        NucleicAcid::Oligo,
    ];

    fn value(&self) -> &'static str {
        match self {
            NucleicAcid::DoubleStranded => "dsdna",
            NucleicAcid::SingleStranded => "ssdna",
            NucleicAcid::Rna => "rna",
            NucleicAcid::Oligo => "oligo",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            NucleicAcid::DoubleStranded => "Double-stranded DNA (50 µg/mL)",
            NucleicAcid::SingleStranded => "Single-stranded DNA (33 µg/mL)",
            NucleicAcid::Rna => "RNA (40 µg/mL)",
            NucleicAcid::Oligo => "Oligonucleotide (20 µg/mL)",
        }
    }
}

impl NucleicAcid {
    /// µg/mL per A260 unit
    pub fn conversion_factor(&self) -> f64 {
        match self {
            NucleicAcid::DoubleStranded => 50.0,
            NucleicAcid::SingleStranded => 33.0,
            NucleicAcid::Rna => 40.0,
            NucleicAcid::Oligo => 20.0,
        }
    }

    /// Acceptable A260/A280 window for a clean sample
    fn pure_ratio(&self) -> (f64, f64) {
        match self {
            NucleicAcid::Rna => (1.9, 2.1),
            _ => (1.7, 2.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorbanceReading {
    pub a260: f64,
    pub a280: Option<f64>,
    pub dilution: f64,
    pub kind: NucleicAcid,
    pub volume_ul: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantification {
    /// µg/mL, numerically equal to ng/µL
    pub concentration: f64,
    pub purity_ratio: Option<f64>,
    pub kind: NucleicAcid,
    /// µg
    pub total_yield: Option<f64>,
}

impl Quantification {
    pub fn purity_assessment(&self) -> Option<&'static str> {
        let ratio = self.purity_ratio?;
        let (low, high) = self.kind.pure_ratio();
        Some(if ratio < low {
            "Low ratio: possible protein or phenol contamination"
        } else if ratio > high {
            "High ratio: possible RNA contamination or degraded sample"
        } else {
            "Pure"
        })
    }
}

pub struct DnaConcentration;

static DNA_CONCENTRATION_PAGE: CalculatorPage = CalculatorPage {
    title: "DNA Concentration Calculator",
    description: "Convert A260 absorbance into DNA or RNA concentration and check purity with the A260/A280 ratio.",
    meta_description: "DNA and RNA concentration from A260 with dilution factor, yield and A260/A280 purity.",
    keywords: &["dna concentration", "a260", "a260/a280", "nanodrop", "rna concentration"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Quantifying nucleic acids",
        content: "Nucleic acids absorb ultraviolet light at 260 nm. An A260 of 1.0 \
corresponds to about 50 µg/mL of double-stranded DNA, 33 µg/mL of single-stranded DNA, \
40 µg/mL of RNA and roughly 20 µg/mL of short oligonucleotides.",
    },
    additional_sections: &[Section {
        title: "Purity",
        content: "Proteins absorb at 280 nm. A260/A280 near 1.8 indicates clean DNA and \
near 2.0 clean RNA. Lower ratios suggest protein contamination.",
    }],
    notes: &["Readings are most accurate between A260 0.1 and 1.0."],
};

impl Calculator for DnaConcentration {
    type Input = AbsorbanceReading;
    type Output = Quantification;

    fn id(&self) -> &'static str {
        "dna-concentration"
    }

    fn page(&self) -> &'static CalculatorPage {
        &DNA_CONCENTRATION_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("a260", "Absorbance at 260 nm"),
            FieldSpec::number("a280", "Absorbance at 280 nm").optional(),
            FieldSpec::number("dilution", "Dilution factor").default_value("1"),
            FieldSpec::choice::<NucleicAcid>("kind", "Sample type"),
            FieldSpec::number("volume", "Sample volume").unit("µL").optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(AbsorbanceReading {
            a260: form.positive("a260", "A260")?,
            a280: form.optional_positive("a280", "A280")?,
            dilution: form.positive("dilution", "Dilution factor")?,
            kind: form.choice("kind", "Sample type")?,
            volume_ul: form.optional_positive("volume", "Sample volume")?,
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let concentration = input.a260 * input.kind.conversion_factor() * input.dilution;
        Quantification {
            concentration,
            purity_ratio: input.a280.map(|a280| input.a260 / a280),
            kind: input.kind,
            // µg/mL × µL / 1000
            total_yield: input.volume_ul.map(|ul| concentration * ul / 1000.0),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary("Concentration", with_unit(output.concentration, 2, "µg/mL"))
            .field("Concentration (ng/µL)", with_unit(output.concentration, 2, "ng/µL"));
        if let Some(total) = output.total_yield {
            view = view.primary("Total yield", with_unit(total, 2, "µg"));
        }
        if let (Some(ratio), Some(assessment)) = (output.purity_ratio, output.purity_assessment()) {
            view = view
                .field("A260/A280", number(ratio, 2))
                .field("Purity", assessment);
        }
        view
    }
}

// ============================================================================
// Primer Tm
// ============================================================================

/// Primers shorter than this use the Wallace rule
const WALLACE_MAX_LENGTH: usize = 14;

const ANNEALING_OFFSET: f64 = 5.0;
const ANNEALING_WINDOW: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TmMethod {
    Wallace,
    GcContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimerAnalysis {
    pub length: usize,
    pub gc_fraction: f64,
    pub tm: f64,
    pub method: TmMethod,
    pub annealing: f64,
    pub gc_clamp: bool,
}

/// Melting temperature in °C from base counts
pub fn melting_temperature(counts: &BaseCounts) -> (f64, TmMethod) {
    let n = counts.len();
    if n < WALLACE_MAX_LENGTH {
        let tm = 2.0 * (counts.a + counts.t) as f64 + 4.0 * counts.gc() as f64;
        (tm, TmMethod::Wallace)
    } else {
        let tm = 64.9 + 41.0 * (counts.gc() as f64 - 16.4) / n as f64;
        (tm, TmMethod::GcContent)
    }
}

pub struct PrimerTm;

static PRIMER_TM_PAGE: CalculatorPage = CalculatorPage {
    title: "Primer Tm Calculator",
    description: "Estimate primer melting temperature and a PCR annealing temperature from the primer sequence.",
    meta_description: "Primer melting temperature calculator using the Wallace rule and GC-content formula.",
    keywords: &["primer tm", "melting temperature", "annealing temperature", "pcr primer"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Melting temperature",
        content: "The melting temperature (Tm) is where half of the primer is bound to its \
target. Short primers use the Wallace rule Tm = 2(A+T) + 4(G+C). Longer primers use \
Tm = 64.9 + 41(G+C − 16.4)/N.",
    },
    additional_sections: &[Section {
        title: "Primer design tips",
        content: "- Length 18–25 nt\n- GC content 40–60%\n- End in G or C (a GC clamp)\n\
- Keep the two primers within 5 °C of each other",
    }],
    notes: &["Salt and primer concentration shift the real Tm by several degrees."],
};

impl Calculator for PrimerTm {
    type Input = String;
    type Output = PrimerAnalysis;

    fn id(&self) -> &'static str {
        "primer-tm"
    }

    fn page(&self) -> &'static CalculatorPage {
        &PRIMER_TM_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::text("sequence", "Primer sequence (5′→3′)").placeholder("AGCGGATAACAATTTCACACAGGA")]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        parse_dna(form, "sequence", "Primer sequence")
    }

    fn compute(&self, sequence: &Self::Input) -> Self::Output {
        let counts = BaseCounts::of(sequence);
        let (tm, method) = melting_temperature(&counts);
        PrimerAnalysis {
            length: counts.len(),
            gc_fraction: counts.gc_fraction(),
            tm,
            method,
            annealing: tm - ANNEALING_OFFSET,
            gc_clamp: sequence.ends_with(['G', 'C']),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let method = match output.method {
            TmMethod::Wallace => "Wallace rule (< 14 nt)",
            TmMethod::GcContent => "GC-content formula",
        };
        let mut view = ResultView::new()
            .primary("Melting temperature", with_unit(output.tm, 1, "°C"))
            .primary("Annealing temperature", with_unit(output.annealing, 1, "°C"))
            .field(
                "Annealing range",
                format!(
                    "{}–{} °C",
                    number(output.annealing - ANNEALING_WINDOW, 1),
                    number(output.annealing + ANNEALING_WINDOW, 1)
                ),
            )
            .field("Length", format!("{} nt", output.length))
            .field("GC content", percent(output.gc_fraction, 1))
            .field("Method", method);
        if !(18..=25).contains(&output.length) {
            view = view.note("Most PCR primers are 18–25 nt long.");
        }
        if !(0.4..=0.6).contains(&output.gc_fraction) {
            view = view.note("GC content outside the recommended 40–60%.");
        }
        if !output.gc_clamp {
            view = view.note("No GC clamp: the primer does not end in G or C.");
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
    fn test_transcription_atgc() {
        let out = DnaTranscription.compute(&"ATGC".to_string());
        assert_eq!(out.complement, "TACG");
        assert_eq!(out.rna, "AUGC");
        assert_eq!(out.reverse_complement, "GCAT");
        assert_eq!(out.protein, "M");
        assert_abs_diff_eq!(out.counts.gc_fraction(), 0.5);
    }

    #[test]
    fn test_translation_stops_at_stop_codon() {
        let out = DnaTranscription.compute(&"ATGGCCTGAGGG".to_string());
        assert_eq!(out.protein, "MA*");
    }

    #[test]
    fn test_transcription_normalizes_input() {
        let form = FormValues::from_pairs([("sequence", " atg c ")]);
        let evaluation = DnaTranscription.evaluate(&form);
        assert_eq!(evaluation.result().unwrap().value_of("mRNA"), Some("AUGC"));
    }

    #[test]
    fn test_transcription_rejects_non_dna() {
        let form = FormValues::from_pairs([("sequence", "AUGC")]);
        assert_eq!(
            DnaTranscription.evaluate(&form).error(),
            Some("Sequence must contain only A, T, G and C")
        );
    }

    #[test]
    fn test_dna_concentration() {
        let out = DnaConcentration.compute(&AbsorbanceReading {
            a260: 0.5,
            a280: Some(0.27),
            dilution: 10.0,
            kind: NucleicAcid::DoubleStranded,
            volume_ul: Some(50.0),
        });
        assert_abs_diff_eq!(out.concentration, 250.0);
        assert_abs_diff_eq!(out.total_yield.unwrap(), 12.5);
        assert_eq!(out.purity_assessment(), Some("Pure"));
    }

    #[test]
    fn test_rna_factor_and_contamination() {
        let out = DnaConcentration.compute(&AbsorbanceReading {
            a260: 1.0,
            a280: Some(0.8),
            dilution: 1.0,
            kind: NucleicAcid::Rna,
            volume_ul: None,
        });
        assert_abs_diff_eq!(out.concentration, 40.0);
        assert_eq!(
            out.purity_assessment(),
            Some("Low ratio: possible protein or phenol contamination")
        );
    }

    #[test]
    fn test_wallace_rule() {
        let out = PrimerTm.compute(&"ATGCATGC".to_string());
        assert_eq!(out.method, TmMethod::Wallace);
        assert_abs_diff_eq!(out.tm, 24.0);
        assert_abs_diff_eq!(out.annealing, 19.0);
    }

    #[test]
    fn test_gc_formula_for_long_primers() {
        let out = PrimerTm.compute(&"ATGCATGCATGCATGCATGC".to_string());
        assert_eq!(out.method, TmMethod::GcContent);
        assert_abs_diff_eq!(out.tm, 51.78, epsilon = 1e-9);
        assert!(out.gc_clamp);
    }

    #[test]
    fn test_primer_annealing_range() {
        let form = FormValues::from_pairs([("sequence", "ATGCATGC")]);
        let evaluation = PrimerTm.evaluate(&form);
        assert_eq!(
            evaluation.result().unwrap().value_of("Annealing range"),
            Some("17.0–21.0 °C")
        );
    }
}
