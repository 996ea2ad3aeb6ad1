//! Health calculators: blood pressure, metabolic rate, body mass index.

use crate::calculators::form::{FieldOptions, FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, with_unit};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

const BACK_LINK: &str = "/category/health";
const BACK_LABEL: &str = "Health Calculators";

// ============================================================================
// Blood Pressure
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodPressureCategory {
    Low,
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
}

impl BloodPressureCategory {
    /// AHA/ACC 2017 categories; the more severe of the two readings wins
    pub fn classify(systolic: f64, diastolic: f64) -> Self {
        if systolic > 180.0 || diastolic > 120.0 {
            Self::Crisis
        } else if systolic >= 140.0 || diastolic >= 90.0 {
            Self::Stage2
        } else if systolic >= 130.0 || diastolic >= 80.0 {
            Self::Stage1
        } else if systolic >= 120.0 {
            Self::Elevated
        } else if systolic < 90.0 || diastolic < 60.0 {
            Self::Low
        } else {
            Self::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low blood pressure",
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::Stage1 => "Hypertension stage 1",
            Self::Stage2 => "Hypertension stage 2",
            Self::Crisis => "Hypertensive crisis",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => "Low readings are usually harmless but discuss dizziness or fainting with a doctor.",
            Self::Normal => "Keep up healthy habits.",
            Self::Elevated => "Lifestyle changes can keep blood pressure from rising further.",
            Self::Stage1 => "Talk to a doctor about lifestyle changes and possible medication.",
            Self::Stage2 => "See a doctor; medication is usually recommended.",
            Self::Crisis => "Seek medical care immediately if readings stay this high.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub systolic: f64,
    pub diastolic: f64,
}

impl Reading {
    /// Mean arterial pressure, DBP + (SBP − DBP) / 3
    pub fn mean_arterial(&self) -> f64 {
        self.diastolic + (self.systolic - self.diastolic) / 3.0
    }

    pub fn pulse_pressure(&self) -> f64 {
        self.systolic - self.diastolic
    }

    pub fn category(&self) -> BloodPressureCategory {
        BloodPressureCategory::classify(self.systolic, self.diastolic)
    }
}

/// Parse "120/80" style readings, one per line or separated by commas
fn parse_readings(raw: &str) -> Result<Vec<Reading>, ValidationError> {
    raw.split(|c: char| c == '\n' || c == ',' || c == ';')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| {
            let invalid = || {
                ValidationError::precondition(format!(
                    "Previous reading {} must look like 120/80",
                    i + 1
                ))
            };
            let (s, d) = line.split_once('/').ok_or_else(invalid)?;
            let systolic: f64 = s.trim().parse().map_err(|_| invalid())?;
            let diastolic: f64 = d.trim().parse().map_err(|_| invalid())?;
            if systolic <= 0.0 || diastolic <= 0.0 {
                return Err(invalid());
            }
            if systolic <= diastolic {
                return Err(ValidationError::precondition(format!(
                    "Previous reading {}: systolic must be greater than diastolic",
                    i + 1
                )));
            }
            Ok(Reading {
                systolic,
                diastolic,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BloodPressureInput {
    pub current: Reading,
    pub previous: Vec<Reading>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloodPressureOutput {
    pub current: Reading,
    pub category: BloodPressureCategory,
    /// Average over the current and previous readings, when any were given
    pub average: Option<(Reading, usize)>,
}

pub struct BloodPressure;

static BLOOD_PRESSURE_PAGE: CalculatorPage = CalculatorPage {
    title: "Blood Pressure Calculator",
    description: "Classify a blood pressure reading, and calculate mean arterial pressure and pulse pressure.",
    meta_description: "Blood pressure calculator with AHA categories, MAP, pulse pressure and reading averages.",
    keywords: &["blood pressure", "hypertension", "mean arterial pressure", "pulse pressure"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Reading your numbers",
        content: "Blood pressure is written as **systolic/diastolic** in mmHg. Systolic is \
the pressure while the heart beats, diastolic the pressure between beats.",
    },
    additional_sections: &[
        Section {
            title: "Categories",
            content: "| Category | Systolic | | Diastolic |\n|---|---|---|---|\n\
| Normal | < 120 | and | < 80 |\n\
| Elevated | 120–129 | and | < 80 |\n\
| Stage 1 | 130–139 | or | 80–89 |\n\
| Stage 2 | ≥ 140 | or | ≥ 90 |\n\
| Crisis | > 180 | or | > 120 |",
        },
        Section {
            title: "Averaging",
            content: "A single reading can mislead. Paste earlier readings, one per line, \
to see the average across all of them.",
        },
    ],
    notes: &["This calculator is informational and is not a diagnosis."],
};

impl Calculator for BloodPressure {
    type Input = BloodPressureInput;
    type Output = BloodPressureOutput;

    fn id(&self) -> &'static str {
        "blood-pressure"
    }

    fn page(&self) -> &'static CalculatorPage {
        &BLOOD_PRESSURE_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("systolic", "Systolic pressure").unit("mmHg"),
            FieldSpec::number("diastolic", "Diastolic pressure").unit("mmHg"),
            FieldSpec::textarea("previous", "Previous readings")
                .placeholder("128/84\n122/79")
                .optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(BloodPressureInput {
            current: Reading {
                systolic: form.positive("systolic", "Systolic pressure")?,
                diastolic: form.positive("diastolic", "Diastolic pressure")?,
            },
            previous: form.raw("previous").map(parse_readings).transpose()?.unwrap_or_default(),
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.current.systolic <= input.current.diastolic {
            return Err(ValidationError::precondition(
                "Systolic pressure must be greater than diastolic pressure",
            ));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let average = (!input.previous.is_empty()).then(|| {
            let all: Vec<&Reading> = std::iter::once(&input.current).chain(&input.previous).collect();
            let n = all.len() as f64;
            let reading = Reading {
                systolic: all.iter().map(|r| r.systolic).sum::<f64>() / n,
                diastolic: all.iter().map(|r| r.diastolic).sum::<f64>() / n,
            };
            (reading, all.len())
        });
        BloodPressureOutput {
            current: input.current,
            category: input.current.category(),
            average,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let reading = |r: &Reading| format!("{}/{} mmHg", number(r.systolic, 0), number(r.diastolic, 0));
        let mut view = ResultView::new()
            .primary("Reading", reading(&output.current))
            .primary("Category", output.category.label())
            .field("Mean arterial pressure", with_unit(output.current.mean_arterial(), 1, "mmHg"))
            .field("Pulse pressure", with_unit(output.current.pulse_pressure(), 0, "mmHg"));
        if let Some((average, count)) = &output.average {
            view = view
                .field(format!("Average of {count} readings"), reading(average))
                .field("Average category", average.category().label());
        }
        view.note(output.category.advice())
    }
}

// ============================================================================
// Metabolic Rate
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl FieldOptions for Sex {
    const ALL: &'static [Self] = &[Sex::Male, Sex::Female];

    fn value(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl FieldOptions for ActivityLevel {
    const ALL: &'static [Self] = &[
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    fn value(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Lightly active (1–3 days/week)",
            ActivityLevel::Moderate => "Moderately active (3–5 days/week)",
            ActivityLevel::Active => "Very active (6–7 days/week)",
            ActivityLevel::VeryActive => "Extra active (physical job or twice daily)",
        }
    }
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub sex: Sex,
    pub age: f64,
    /// kg
    pub weight: f64,
    /// cm
    pub height: f64,
    pub activity: ActivityLevel,
}

impl Body {
    /// Mifflin-St Jeor BMR, kcal/day
    pub fn mifflin_st_jeor(&self) -> f64 {
        let base = 10.0 * self.weight + 6.25 * self.height - 5.0 * self.age;
        match self.sex {
            Sex::Male => base + 5.0,
            Sex::Female => base - 161.0,
        }
    }

    /// Revised Harris-Benedict BMR (Roza & Shizgal), kcal/day
    pub fn harris_benedict(&self) -> f64 {
        match self.sex {
            Sex::Male => 88.362 + 13.397 * self.weight + 4.799 * self.height - 5.677 * self.age,
            Sex::Female => 447.593 + 9.247 * self.weight + 3.098 * self.height - 4.330 * self.age,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetabolicOutput {
    pub mifflin: f64,
    pub harris_benedict: f64,
    pub activity: ActivityLevel,
}

impl MetabolicOutput {
    pub fn daily_energy(&self) -> f64 {
        self.mifflin * self.activity.multiplier()
    }
}

pub struct MetabolicRate;

static METABOLIC_RATE_PAGE: CalculatorPage = CalculatorPage {
    title: "Basal Metabolic Rate Calculator",
    description: "Estimate basal metabolic rate and daily calorie needs with the Mifflin-St Jeor and Harris-Benedict equations.",
    meta_description: "BMR calculator: Mifflin-St Jeor and revised Harris-Benedict with activity-adjusted daily energy.",
    keywords: &["bmr", "basal metabolic rate", "mifflin-st jeor", "harris-benedict", "tdee"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Energy at rest",
        content: "Basal metabolic rate is the energy your body uses at complete rest. \
Multiplying it by an activity factor estimates total daily energy expenditure.",
    },
    additional_sections: &[Section {
        title: "Equations",
        content: "- Mifflin-St Jeor: 10·W + 6.25·H − 5·A + 5 (men) or − 161 (women)\n\
- Revised Harris-Benedict: 88.362 + 13.397·W + 4.799·H − 5.677·A (men), \
447.593 + 9.247·W + 3.098·H − 4.330·A (women)\n\n\
W is weight in kg, H height in cm and A age in years.",
    }],
    notes: &["Daily energy uses the Mifflin-St Jeor estimate."],
};

impl Calculator for MetabolicRate {
    type Input = Body;
    type Output = MetabolicOutput;

    fn id(&self) -> &'static str {
        "metabolic-rate"
    }

    fn page(&self) -> &'static CalculatorPage {
        &METABOLIC_RATE_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice::<Sex>("sex", "Sex"),
            FieldSpec::number("age", "Age").unit("years"),
            FieldSpec::number("weight", "Weight").unit("kg"),
            FieldSpec::number("height", "Height").unit("cm"),
            FieldSpec::choice::<ActivityLevel>("activity", "Activity level"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(Body {
            sex: form.choice("sex", "Sex")?,
            age: form.positive("age", "Age")?,
            weight: form.positive("weight", "Weight")?,
            height: form.positive("height", "Height")?,
            activity: form.choice("activity", "Activity level")?,
        })
    }

    fn compute(&self, body: &Self::Input) -> Self::Output {
        MetabolicOutput {
            mifflin: body.mifflin_st_jeor(),
            harris_benedict: body.harris_benedict(),
            activity: body.activity,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        ResultView::new()
            .primary("BMR (Mifflin-St Jeor)", with_unit(output.mifflin, 0, "kcal/day"))
            .field("BMR (Harris-Benedict)", with_unit(output.harris_benedict, 0, "kcal/day"))
            .primary("Daily energy needs", with_unit(output.daily_energy(), 0, "kcal/day"))
            .field("Activity multiplier", number(output.activity.multiplier(), 3))
    }
}

// ============================================================================
// BMI
// ============================================================================

const HEALTHY_BMI: (f64, f64) = (18.5, 24.9);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiInput {
    /// kg
    pub weight: f64,
    /// cm
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiOutput {
    pub bmi: f64,
    /// kg range for a healthy BMI at this height
    pub healthy_weight: (f64, f64),
}

impl BmiOutput {
    pub fn category(&self) -> &'static str {
        match self.bmi {
            b if b < 18.5 => "Underweight",
            b if b < 25.0 => "Normal weight",
            b if b < 30.0 => "Overweight",
            b if b < 35.0 => "Obesity class I",
            b if b < 40.0 => "Obesity class II",
            _ => "Obesity class III",
        }
    }
}

pub struct Bmi;

static BMI_PAGE: CalculatorPage = CalculatorPage {
    title: "BMI Calculator",
    description: "Calculate body mass index and the healthy weight range for your height.",
    meta_description: "BMI calculator with WHO weight categories and healthy weight range.",
    keywords: &["bmi", "body mass index", "healthy weight", "obesity"],
    back_link: BACK_LINK,
    back_label: BACK_LABEL,
    introduction: Section {
        title: "Body mass index",
        content: "BMI = weight (kg) / height (m)². It is a quick screening measure and does \
not distinguish muscle from fat.",
    },
    additional_sections: &[Section {
        title: "WHO categories",
        content: "- Below 18.5: underweight\n- 18.5–24.9: normal\n- 25–29.9: overweight\n\
- 30 and above: obesity",
    }],
    notes: &[],
};

impl Calculator for Bmi {
    type Input = BmiInput;
    type Output = BmiOutput;

    fn id(&self) -> &'static str {
        "bmi"
    }

    fn page(&self) -> &'static CalculatorPage {
        &BMI_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("weight", "Weight").unit("kg"),
            FieldSpec::number("height", "Height").unit("cm"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        Ok(BmiInput {
            weight: form.positive("weight", "Weight")?,
            height: form.positive("height", "Height")?,
        })
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let metres_squared = (input.height / 100.0).powi(2);
        BmiOutput {
            bmi: input.weight / metres_squared,
            healthy_weight: (HEALTHY_BMI.0 * metres_squared, HEALTHY_BMI.1 * metres_squared),
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        ResultView::new()
            .primary("BMI", number(output.bmi, 1))
            .primary("Category", output.category())
            .field(
                "Healthy weight range",
                format!(
                    "{}–{} kg",
                    number(output.healthy_weight.0, 1),
                    number(output.healthy_weight.1, 1)
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
    fn test_systolic_must_exceed_diastolic() {
        let form = FormValues::from_pairs([("systolic", "80"), ("diastolic", "90")]);
        assert_eq!(
            BloodPressure.evaluate(&form).error(),
            Some("Systolic pressure must be greater than diastolic pressure")
        );
    }

    #[test]
    fn test_categories() {
        use BloodPressureCategory::*;
        assert_eq!(BloodPressureCategory::classify(115.0, 75.0), Normal);
        assert_eq!(BloodPressureCategory::classify(125.0, 75.0), Elevated);
        assert_eq!(BloodPressureCategory::classify(125.0, 85.0), Stage1);
        assert_eq!(BloodPressureCategory::classify(145.0, 70.0), Stage2);
        assert_eq!(BloodPressureCategory::classify(190.0, 100.0), Crisis);
        assert_eq!(BloodPressureCategory::classify(85.0, 55.0), Low);
    }

    #[test]
    fn test_map_and_pulse_pressure() {
        let reading = Reading {
            systolic: 120.0,
            diastolic: 80.0,
        };
        assert_abs_diff_eq!(reading.mean_arterial(), 93.333, epsilon = 1e-3);
        assert_abs_diff_eq!(reading.pulse_pressure(), 40.0);
    }

    #[test]
    fn test_previous_readings_averaged() {
        let form = FormValues::from_pairs([
            ("systolic", "130"),
            ("diastolic", "85"),
            ("previous", "120/80\n110/75"),
        ]);
        let evaluation = BloodPressure.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(result.value_of("Average of 3 readings"), Some("120/80 mmHg"));
        assert_eq!(result.value_of("Category"), Some("Hypertension stage 1"));
    }

    #[test]
    fn test_bad_previous_reading() {
        let form = FormValues::from_pairs([
            ("systolic", "130"),
            ("diastolic", "85"),
            ("previous", "120/80, 70/90"),
        ]);
        assert_eq!(
            BloodPressure.evaluate(&form).error(),
            Some("Previous reading 2: systolic must be greater than diastolic")
        );
        let form = FormValues::from_pairs([
            ("systolic", "130"),
            ("diastolic", "85"),
            ("previous", "high"),
        ]);
        assert_eq!(
            BloodPressure.evaluate(&form).error(),
            Some("Previous reading 1 must look like 120/80")
        );
    }

    #[test]
    fn test_bmr_equations() {
        let body = Body {
            sex: Sex::Male,
            age: 30.0,
            weight: 80.0,
            height: 180.0,
            activity: ActivityLevel::Moderate,
        };
        let out = MetabolicRate.compute(&body);
        assert_abs_diff_eq!(out.mifflin, 1780.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out.harris_benedict, 1853.632, epsilon = 1e-6);
        assert_abs_diff_eq!(out.daily_energy(), 1780.0 * 1.55, epsilon = 1e-9);

        let female = Body { sex: Sex::Female, ..body };
        assert_abs_diff_eq!(female.mifflin_st_jeor(), 1614.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bmi() {
        let form = FormValues::from_pairs([("weight", "70"), ("height", "175")]);
        let evaluation = Bmi.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(result.value_of("BMI"), Some("22.9"));
        assert_eq!(result.value_of("Category"), Some("Normal weight"));
        assert_eq!(result.value_of("Healthy weight range"), Some("56.7–76.3 kg"));
    }
}
