//! Cell biology calculators: cell geometry, population doubling, hemocytometer counts.

use std::f64::consts::{LN_2, PI};

use crate::calculators::form::{FieldOptions, FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, percent, with_unit};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

const BACK_LINK: &str = "/category/biology/cell-biology";
const BACK_LABEL: &str = "Cell Biology Calculators";

// ============================================================================
// Cell Size
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShape {
    Sphere,
    Cube,
    Cylinder,
    Custom,
}

impl FieldOptions for CellShape {
    const ALL: &'static [Self] = &[
        CellShape::Sphere,
        CellShape::Cube,
        CellShape::Cylinder,
        CellShape::Custom,
    ];

    fn value(&self) -> &'static str {
        match self {
            CellShape::Sphere => "sphere",
            CellShape::Cube => "cube",
            CellShape::Cylinder => "cylinder",
            CellShape::Custom => "custom",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CellShape::Sphere => "Sphere (cocci, lymphocytes, eggs)",
            CellShape::Cube => "Cube (cuboidal epithelium)",
            CellShape::Cylinder => "Cylinder (rods, bacilli, muscle fibres)",
            CellShape::Custom => "Custom (known volume and surface area)",
        }
    }
}

/// Geometry with the measurements each shape needs, in µm
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellGeometry {
    Sphere { diameter: f64 },
    Cube { side: f64 },
    Cylinder { diameter: f64, height: f64 },
    Custom { volume: f64, surface_area: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// µm³
    pub volume: f64,
    /// µm²
    pub surface_area: f64,
    /// µm⁻¹
    pub sa_to_volume: f64,
    /// Diameter of a sphere with the same volume, µm
    pub equivalent_diameter: f64,
}

pub struct CellSize;

static CELL_SIZE_PAGE: CalculatorPage = CalculatorPage {
    title: "Cell Size Calculator",
    description: "Calculate cell volume, surface area and surface-area-to-volume ratio for spherical, cuboidal, cylindrical or custom cells.",
    meta_description: "Free cell size calculator: volume, surface area and SA:V ratio for sphere, cube and cylinder shaped cells.",
    keywords: &["cell size", "surface area to volume ratio", "cell volume", "SA:V"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Why cell size matters",
        content: "A cell exchanges nutrients and waste across its membrane, but its metabolic \
demand scales with its volume. As a cell grows, volume increases faster than surface \
area, so the **surface-area-to-volume ratio** falls. This ratio limits how large cells \
can get before diffusion becomes too slow.",
    },
    additional_sections: &[
        Section {
            title: "Formulas",
            content: "- Sphere: V = ⁴⁄₃πr³, SA = 4πr²\n\
- Cube: V = s³, SA = 6s²\n\
- Cylinder: V = πr²h, SA = 2πr² + 2πrh\n\n\
The equivalent spherical diameter is the diameter of a sphere with the same volume.",
        },
        Section {
            title: "FAQ",
            content: "**What units should I use?** Enter all lengths in micrometres (µm). \
Volumes are reported in µm³ (1 µm³ = 1 fL).\n\n\
**Why does SA:V drop as cells grow?** For a sphere SA:V = 6/d, so doubling the \
diameter halves the ratio.",
        },
    ],
    notes: &["Real cells are rarely perfect geometric solids; treat results as estimates."],
};

impl Calculator for CellSize {
    type Input = CellGeometry;
    type Output = CellMetrics;

    fn id(&self) -> &'static str {
        "cell-size"
    }

    fn page(&self) -> &'static CalculatorPage {
        &CELL_SIZE_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice::<CellShape>("shape", "Cell shape"),
            FieldSpec::number("dimension", "Diameter or side length")
                .unit("µm")
                .help("Diameter for spheres and cylinders, edge length for cubes")
                .optional(),
            FieldSpec::number("height", "Cylinder length").unit("µm").optional(),
            FieldSpec::number("volume", "Volume (custom shape)").unit("µm³").optional(),
            FieldSpec::number("surface_area", "Surface area (custom shape)")
                .unit("µm²")
                .optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let shape = form.choice::<CellShape>("shape", "Cell shape")?;
        Ok(match shape {
            CellShape::Sphere => CellGeometry::Sphere {
                diameter: form.positive("dimension", "Diameter")?,
            },
            CellShape::Cube => CellGeometry::Cube {
                side: form.positive("dimension", "Side length")?,
            },
            CellShape::Cylinder => CellGeometry::Cylinder {
                diameter: form.positive("dimension", "Diameter")?,
                height: form.positive("height", "Cylinder length")?,
            },
            CellShape::Custom => CellGeometry::Custom {
                volume: form.positive("volume", "Volume")?,
                surface_area: form.positive("surface_area", "Surface area")?,
            },
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let (volume, surface_area) = match *input {
            CellGeometry::Sphere { diameter } => {
                let r = diameter / 2.0;
                (4.0 / 3.0 * PI * r.powi(3), 4.0 * PI * r.powi(2))
            }
            CellGeometry::Cube { side } => (side.powi(3), 6.0 * side.powi(2)),
            CellGeometry::Cylinder { diameter, height } => {
                let r = diameter / 2.0;
                (PI * r.powi(2) * height, 2.0 * PI * r.powi(2) + 2.0 * PI * r * height)
            }
            CellGeometry::Custom {
                volume,
                surface_area,
            } => (volume, surface_area),
        };

        CellMetrics {
            volume,
            surface_area,
            sa_to_volume: surface_area / volume,
            equivalent_diameter: (6.0 * volume / PI).cbrt(),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        ResultView::new()
            .primary("Volume", with_unit(output.volume, 3, "µm³"))
            .primary("Surface area", with_unit(output.surface_area, 3, "µm²"))
            .primary("SA:V ratio", with_unit(output.sa_to_volume, 3, "µm⁻¹"))
            .field(
                "Equivalent spherical diameter",
                with_unit(output.equivalent_diameter, 3, "µm"),
            )
            .field("Volume (femtolitres)", with_unit(output.volume, 3, "fL"))
    }
}

// ============================================================================
// Doubling Time
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl FieldOptions for TimeUnit {
    const ALL: &'static [Self] = &[TimeUnit::Hours, TimeUnit::Minutes, TimeUnit::Days];

    fn value(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "Minutes",
            TimeUnit::Hours => "Hours",
            TimeUnit::Days => "Days",
        }
    }
}

impl TimeUnit {
    fn short(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublingInput {
    pub initial: f64,
    pub final_count: f64,
    pub elapsed: f64,
    pub unit: TimeUnit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublingOutput {
    /// Specific growth rate per time unit
    pub growth_rate: f64,
    pub doubling_time: f64,
    pub generations: f64,
    pub fold_change: f64,
    pub unit: TimeUnit,
}

pub struct DoublingTime;

static DOUBLING_TIME_PAGE: CalculatorPage = CalculatorPage {
    title: "Cell Doubling Time Calculator",
    description: "Find the doubling time, specific growth rate and number of generations of an exponentially growing culture.",
    meta_description: "Calculate cell doubling time and growth rate from initial and final cell counts.",
    keywords: &["doubling time", "growth rate", "cell culture", "generation time"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Exponential growth",
        content: "During the log phase a culture grows as N = N₀·e^(rt). Measuring the cell \
count at two time points gives the specific growth rate **r** and the **doubling time** \
T_d = ln 2 / r.",
    },
    additional_sections: &[Section {
        title: "Formulas",
        content: "- r = ln(N / N₀) / t\n- T_d = ln 2 / r\n- generations = log₂(N / N₀)",
    }],
    notes: &["Only valid while the culture is growing exponentially."],
};

impl Calculator for DoublingTime {
    type Input = DoublingInput;
    type Output = DoublingOutput;

    fn id(&self) -> &'static str {
        "doubling-time"
    }

    fn page(&self) -> &'static CalculatorPage {
        &DOUBLING_TIME_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("initial", "Initial cell count").unit("cells"),
            FieldSpec::number("final", "Final cell count").unit("cells"),
            FieldSpec::number("time", "Elapsed time"),
            FieldSpec::choice::<TimeUnit>("unit", "Time unit"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(DoublingInput {
            initial: form.positive("initial", "Initial cell count")?,
            final_count: form.positive("final", "Final cell count")?,
            elapsed: form.positive("time", "Elapsed time")?,
            unit: form.choice("unit", "Time unit")?,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.final_count <= input.initial {
            return Err(ValidationError::precondition(
                "Final cell count must be greater than the initial count",
            ));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let fold_change = input.final_count / input.initial;
        let growth_rate = fold_change.ln() / input.elapsed;
        DoublingOutput {
            growth_rate,
            doubling_time: LN_2 / growth_rate,
            generations: fold_change.log2(),
            fold_change,
            unit: input.unit,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let unit = output.unit.short();
        ResultView::new()
            .primary("Doubling time", with_unit(output.doubling_time, 3, unit))
            .primary(
                "Growth rate",
                with_unit(output.growth_rate, 4, &format!("{unit}⁻¹")),
            )
            .field("Generations", number(output.generations, 2))
            .field("Fold change", format!("{}×", number(output.fold_change, 2)))
    }
}

// ============================================================================
// Hemocytometer
// ============================================================================

/// Volume over one large hemocytometer square is 0.1 µL
const SQUARE_FACTOR: f64 = 1.0e4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemocytometerInput {
    pub live_cells: u64,
    pub dead_cells: u64,
    pub squares: u64,
    pub dilution_factor: f64,
    pub suspension_ml: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemocytometerOutput {
    /// Viable cells per mL
    pub live_per_ml: f64,
    pub total_per_ml: f64,
    pub viability: f64,
    pub total_live_cells: Option<f64>,
}

pub struct Hemocytometer;

static HEMOCYTOMETER_PAGE: CalculatorPage = CalculatorPage {
    title: "Hemocytometer Cell Count Calculator",
    description: "Convert hemocytometer square counts into cell density, viability and total cell number.",
    meta_description: "Hemocytometer calculator: cells per mL, trypan blue viability and total cells.",
    keywords: &["hemocytometer", "cell count", "trypan blue", "viability"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Counting cells",
        content: "Each large square of a Neubauer hemocytometer holds 0.1 µL. The average \
count per square multiplied by 10⁴ and by the dilution factor gives cells per mL.",
    },
    additional_sections: &[Section {
        title: "Viability",
        content: "With trypan blue, dead cells take up the dye. Viability is live cells \
divided by all counted cells.",
    }],
    notes: &["Count at least 100 cells in total for a reliable estimate."],
};

impl Calculator for Hemocytometer {
    type Input = HemocytometerInput;
    type Output = HemocytometerOutput;

    fn id(&self) -> &'static str {
        "hemocytometer"
    }

    fn page(&self) -> &'static CalculatorPage {
        &HEMOCYTOMETER_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("live_cells", "Live cells counted (all squares)"),
            FieldSpec::number("dead_cells", "Dead cells counted")
                .optional()
                .default_value("0"),
            FieldSpec::number("squares", "Large squares counted").default_value("4"),
            FieldSpec::number("dilution", "Dilution factor")
                .default_value("2")
                .help("2 for a 1:1 mix with trypan blue"),
            FieldSpec::number("volume", "Suspension volume").unit("mL").optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let dead_cells = if form.is_blank("dead_cells") {
            0
        } else {
            form.count("dead_cells", "Dead cells counted")?
        };
        Ok(HemocytometerInput {
            live_cells: form.count("live_cells", "Live cells counted")?,
            dead_cells,
            squares: form.count("squares", "Large squares counted")?,
            dilution_factor: form.positive("dilution", "Dilution factor")?,
            suspension_ml: form.optional_positive("volume", "Suspension volume")?,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.squares == 0 {
            return Err(ValidationError::precondition("Count at least one square"));
        }
        if input.dilution_factor < 1.0 {
            return Err(ValidationError::precondition("Dilution factor must be at least 1"));
        }
        if input.live_cells + input.dead_cells == 0 {
            return Err(ValidationError::precondition("No cells were counted"));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let per_square = |cells: u64| cells as f64 / input.squares as f64;
        let factor = input.dilution_factor * SQUARE_FACTOR;
        let live_per_ml = per_square(input.live_cells) * factor;
        let total_per_ml = per_square(input.live_cells + input.dead_cells) * factor;
        HemocytometerOutput {
            live_per_ml,
            total_per_ml,
            viability: input.live_cells as f64 / (input.live_cells + input.dead_cells) as f64,
            total_live_cells: input.suspension_ml.map(|ml| live_per_ml * ml),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let mut view = ResultView::new()
            .primary("Viable cells", with_unit(output.live_per_ml, 0, "cells/mL"))
            .primary("Viability", percent(output.viability, 1))
            .field("Total cells", with_unit(output.total_per_ml, 0, "cells/mL"));
        if let Some(total) = output.total_live_cells {
            view = view.field("Viable cells in suspension", number(total, 0));
        }
        if output.viability < 0.9 {
            view = view.note("Viability below 90%: check culture health before seeding.");
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{CalculatorLeaf, Evaluation};
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_diameter_10() {
        let out = CellSize.compute(&CellGeometry::Sphere { diameter: 10.0 });
        assert_relative_eq!(out.volume, 523.599, epsilon = 1e-3);
        assert_relative_eq!(out.surface_area, 314.159, epsilon = 1e-3);
        assert_relative_eq!(out.sa_to_volume, 0.6, epsilon = 1e-9);
        assert_relative_eq!(out.equivalent_diameter, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let input = CellGeometry::Sphere { diameter: 10.0 };
        let a = CellSize.compute(&input);
        let b = CellSize.compute(&input);
        assert_eq!(a.volume.to_bits(), b.volume.to_bits());
        assert_eq!(a.surface_area.to_bits(), b.surface_area.to_bits());
        assert_eq!(a.sa_to_volume.to_bits(), b.sa_to_volume.to_bits());
    }

    #[test]
    fn test_form_sphere() {
        let form = FormValues::from_pairs([("shape", "sphere"), ("dimension", "10")]);
        let evaluation = CellSize.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(result.value_of("Volume"), Some("523.599 µm³"));
        assert_eq!(result.value_of("Surface area"), Some("314.159 µm²"));
        assert_eq!(result.value_of("SA:V ratio"), Some("0.600 µm⁻¹"));
    }

    #[test]
    fn test_cube_and_cylinder() {
        let cube = CellSize.compute(&CellGeometry::Cube { side: 2.0 });
        assert_relative_eq!(cube.volume, 8.0);
        assert_relative_eq!(cube.surface_area, 24.0);

        let cyl = CellSize.compute(&CellGeometry::Cylinder {
            diameter: 2.0,
            height: 5.0,
        });
        assert_relative_eq!(cyl.volume, 5.0 * PI);
        assert_relative_eq!(cyl.surface_area, 2.0 * PI + 10.0 * PI);
    }

    #[test]
    fn test_cylinder_requires_height() {
        let form = FormValues::from_pairs([("shape", "cylinder"), ("dimension", "2")]);
        assert_eq!(
            CellSize.evaluate(&form).error(),
            Some("Cylinder length is required")
        );
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let form = FormValues::from_pairs([("shape", "torus"), ("dimension", "2")]);
        assert!(matches!(
            CellSize.evaluate(&form),
            Evaluation::Rejected { field: Some("shape"), .. }
        ));
    }

    #[test]
    fn test_doubling_time() {
        let out = DoublingTime.compute(&DoublingInput {
            initial: 1000.0,
            final_count: 8000.0,
            elapsed: 6.0,
            unit: TimeUnit::Hours,
        });
        assert_relative_eq!(out.generations, 3.0, epsilon = 1e-12);
        assert_relative_eq!(out.doubling_time, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_doubling_requires_growth() {
        let form = FormValues::from_pairs([("initial", "500"), ("final", "400"), ("time", "3")]);
        assert_eq!(
            DoublingTime.evaluate(&form).error(),
            Some("Final cell count must be greater than the initial count")
        );
    }

    #[test]
    fn test_hemocytometer() {
        let out = Hemocytometer.compute(&HemocytometerInput {
            live_cells: 200,
            dead_cells: 50,
            squares: 4,
            dilution_factor: 2.0,
            suspension_ml: Some(10.0),
        });
        assert_relative_eq!(out.live_per_ml, 1.0e6);
        assert_relative_eq!(out.total_per_ml, 1.25e6);
        assert_relative_eq!(out.viability, 0.8);
        assert_relative_eq!(out.total_live_cells.unwrap(), 1.0e7);
    }

    #[test]
    fn test_hemocytometer_rejects_oversized_count() {
        let form = FormValues::from_pairs([
            ("live_cells", "1e20"),
            ("dead_cells", "10"),
            ("squares", "4"),
            ("dilution", "1"),
        ]);
        assert_eq!(
            Hemocytometer.evaluate(&form).error(),
            Some("Live cells counted is too large")
        );
    }

    #[test]
    fn test_hemocytometer_blank_dead_cells() {
        let form = FormValues::from_pairs([
            ("live_cells", "120"),
            ("squares", "4"),
            ("dilution", "1"),
        ]);
        let evaluation = Hemocytometer.evaluate(&form);
        assert_eq!(evaluation.result().unwrap().value_of("Viability"), Some("100.0%"));
    }
}
