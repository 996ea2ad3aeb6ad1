//! First-order decay and half-life.

use std::f64::consts::LN_2;

use crate::calculators::form::{FieldOptions, FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, percent, with_unit};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecaySolve {
    Remaining,
    HalfLife,
    Elapsed,
}

impl FieldOptions for DecaySolve {
    const ALL: &'static [Self] = &[DecaySolve::Remaining, DecaySolve::HalfLife, DecaySolve::Elapsed];

    fn value(&self) -> &'static str {
        match self {
            DecaySolve::Remaining => "remaining",
            DecaySolve::HalfLife => "half_life",
            DecaySolve::Elapsed => "elapsed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DecaySolve::Remaining => "Amount remaining",
            DecaySolve::HalfLife => "Half-life",
            DecaySolve::Elapsed => "Elapsed time",
        }
    }
}

/// Initial amount plus the two of (remaining, half-life, elapsed) not being solved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayInput {
    Remaining { initial: f64, half_life: f64, elapsed: f64 },
    HalfLife { initial: f64, remaining: f64, elapsed: f64 },
    Elapsed { initial: f64, remaining: f64, half_life: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    pub solved: DecaySolve,
    pub initial: f64,
    pub remaining: f64,
    pub half_life: f64,
    pub elapsed: f64,
}

impl Decay {
    /// λ = ln 2 / t½
    pub fn decay_constant(&self) -> f64 {
        LN_2 / self.half_life
    }

    pub fn mean_lifetime(&self) -> f64 {
        1.0 / self.decay_constant()
    }

    pub fn fraction_remaining(&self) -> f64 {
        self.remaining / self.initial
    }

    pub fn half_lives_elapsed(&self) -> f64 {
        self.elapsed / self.half_life
    }
}

pub struct HalfLife;

static HALF_LIFE_PAGE: CalculatorPage = CalculatorPage {
    title: "Half-Life Calculator",
    description: "Calculate remaining amount, half-life or elapsed time for first-order decay.",
    meta_description: "Half-life calculator for radioactive decay and first-order reactions: N = N₀(½)^(t/t½).",
    keywords: &["half-life", "radioactive decay", "first-order kinetics", "decay constant"],
    back_link: "/category/chemistry",
    back_label: "Chemistry Calculators",
    introduction: Section {
        title: "First-order decay",
        content: "In radioactive decay and first-order reactions a constant fraction decays \
per unit time. After each **half-life** half of what was left remains: \
N = N₀ · (½)^(t / t½).",
    },
    additional_sections: &[Section {
        title: "Related quantities",
        content: "- Decay constant λ = ln 2 / t½\n- Mean lifetime τ = 1 / λ",
    }],
    notes: &["Use the same time unit for the half-life and elapsed time."],
};

impl Calculator for HalfLife {
    type Input = DecayInput;
    type Output = Decay;

    fn id(&self) -> &'static str {
        "half-life"
    }

    fn page(&self) -> &'static CalculatorPage {
        &HALF_LIFE_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice::<DecaySolve>("solve", "Solve for"),
            FieldSpec::number("initial", "Initial amount (N₀)"),
            FieldSpec::number("remaining", "Amount remaining (N)").optional(),
            FieldSpec::number("half_life", "Half-life (t½)").optional(),
            FieldSpec::number("elapsed", "Elapsed time (t)").optional(),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let solve = form.choice::<DecaySolve>("solve", "Solve for")?;
        let initial = form.positive("initial", "Initial amount")?;
        Ok(match solve {
            DecaySolve::Remaining => DecayInput::Remaining {
                initial,
                half_life: form.positive("half_life", "Half-life")?,
                elapsed: form.non_negative("elapsed", "Elapsed time")?,
            },
            DecaySolve::HalfLife => DecayInput::HalfLife {
                initial,
                remaining: form.positive("remaining", "Amount remaining")?,
                elapsed: form.positive("elapsed", "Elapsed time")?,
            },
            DecaySolve::Elapsed => DecayInput::Elapsed {
                initial,
                remaining: form.positive("remaining", "Amount remaining")?,
                half_life: form.positive("half_life", "Half-life")?,
            },
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        match *input {
            DecayInput::HalfLife { initial, remaining, .. } if remaining >= initial => Err(
                ValidationError::precondition("Remaining amount must be less than the initial amount"),
            ),
            DecayInput::Elapsed { initial, remaining, .. } if remaining > initial => Err(
                ValidationError::precondition("Remaining amount cannot exceed the initial amount"),
            ),
            _ => Ok(()),
        }
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        match *input {
            DecayInput::Remaining {
                initial,
                half_life,
                elapsed,
            } => Decay {
                solved: DecaySolve::Remaining,
                initial,
                remaining: initial * 0.5f64.powf(elapsed / half_life),
                half_life,
                elapsed,
            },
            DecayInput::HalfLife {
                initial,
                remaining,
                elapsed,
            } => Decay {
                solved: DecaySolve::HalfLife,
                initial,
                remaining,
                half_life: elapsed * LN_2 / (initial / remaining).ln(),
                elapsed,
            },
            DecayInput::Elapsed {
                initial,
                remaining,
                half_life,
            } => Decay {
                solved: DecaySolve::Elapsed,
                initial,
                remaining,
                half_life,
                elapsed: half_life * (initial / remaining).log2(),
            },
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let (label, value) = match output.solved {
            DecaySolve::Remaining => ("Amount remaining", output.remaining),
            DecaySolve::HalfLife => ("Half-life", output.half_life),
            DecaySolve::Elapsed => ("Elapsed time", output.elapsed),
        };
        ResultView::new()
            .primary(label, number(value, 4))
            .field("Fraction remaining", percent(output.fraction_remaining(), 2))
            .field("Half-lives elapsed", number(output.half_lives_elapsed(), 3))
            .field("Decay constant (λ)", with_unit(output.decay_constant(), 5, "per time unit"))
            .field("Mean lifetime (τ)", number(output.mean_lifetime(), 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::CalculatorLeaf;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_two_half_lives_leave_a_quarter() {
        let out = HalfLife.compute(&DecayInput::Remaining {
            initial: 100.0,
            half_life: 5.0,
            elapsed: 10.0,
        });
        assert_abs_diff_eq!(out.remaining, 25.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.half_lives_elapsed(), 2.0);
    }

    #[test]
    fn test_solve_half_life_and_elapsed() {
        let out = HalfLife.compute(&DecayInput::HalfLife {
            initial: 80.0,
            remaining: 10.0,
            elapsed: 15.0,
        });
        assert_abs_diff_eq!(out.half_life, 5.0, epsilon = 1e-12);

        let out = HalfLife.compute(&DecayInput::Elapsed {
            initial: 80.0,
            remaining: 10.0,
            half_life: 5730.0,
        });
        assert_abs_diff_eq!(out.elapsed, 3.0 * 5730.0, epsilon = 1e-9);
    }

    #[test]
    fn test_form_default_mode() {
        let form = FormValues::from_pairs([("initial", "1"), ("half_life", "1"), ("elapsed", "1")]);
        let evaluation = HalfLife.evaluate(&form);
        assert_eq!(
            evaluation.result().unwrap().value_of("Amount remaining"),
            Some("0.5000")
        );
    }

    #[test]
    fn test_rejects_growth() {
        let form = FormValues::from_pairs([
            ("solve", "half_life"),
            ("initial", "10"),
            ("remaining", "20"),
            ("elapsed", "3"),
        ]);
        assert_eq!(
            HalfLife.evaluate(&form).error(),
            Some("Remaining amount must be less than the initial amount")
        );
    }
}
