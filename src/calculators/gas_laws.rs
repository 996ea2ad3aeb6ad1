//! Ideal gas law, PV = nRT, solved for whichever quantity is left blank.

use crate::calculators::form::{FieldOptions, FieldSpec, FormValues, ValidationError};
use crate::calculators::format::{number, with_unit};
use crate::calculators::{Calculator, CalculatorPage, ResultView, Section};

/// Gas constant in L·atm/(mol·K)
pub const GAS_CONSTANT: f64 = 0.082057;

const CELSIUS_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureUnit {
    Atm,
    KiloPascal,
    MillimetreMercury,
    Bar,
}

impl FieldOptions for PressureUnit {
    const ALL: &'static [Self] = &[
        PressureUnit::Atm,
        PressureUnit::KiloPascal,
        PressureUnit::MillimetreMercury,
        PressureUnit::Bar,
    ];

    fn value(&self) -> &'static str {
        match self {
            PressureUnit::Atm => "atm",
            PressureUnit::KiloPascal => "kpa",
            PressureUnit::MillimetreMercury => "mmhg",
            PressureUnit::Bar => "bar",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PressureUnit::Atm => "atm",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::MillimetreMercury => "mmHg",
            PressureUnit::Bar => "bar",
        }
    }
}

impl PressureUnit {
    /// How many of this unit make one atmosphere
    fn per_atm(&self) -> f64 {
        match self {
            PressureUnit::Atm => 1.0,
            PressureUnit::KiloPascal => 101.325,
            PressureUnit::MillimetreMercury => 760.0,
            PressureUnit::Bar => 1.01325,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
}

impl FieldOptions for TemperatureUnit {
    const ALL: &'static [Self] = &[TemperatureUnit::Kelvin, TemperatureUnit::Celsius];

    fn value(&self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "k",
            TemperatureUnit::Celsius => "c",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Celsius => "°C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasUnknown {
    Pressure,
    Volume,
    Moles,
    Temperature,
}

/// Known values in SI-ish working units: atm, L, mol, K
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasState {
    pub pressure: Option<f64>,
    pub volume: Option<f64>,
    pub moles: Option<f64>,
    pub temperature: Option<f64>,
    pub pressure_unit: PressureUnit,
    pub temperature_unit: TemperatureUnit,
}

impl GasState {
    fn unknown(&self) -> Option<GasUnknown> {
        let slots = [
            (self.pressure.is_none(), GasUnknown::Pressure),
            (self.volume.is_none(), GasUnknown::Volume),
            (self.moles.is_none(), GasUnknown::Moles),
            (self.temperature.is_none(), GasUnknown::Temperature),
        ];
        let mut missing = slots.iter().filter(|(blank, _)| *blank).map(|(_, u)| *u);
        match (missing.next(), missing.next()) {
            (Some(unknown), None) => Some(unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedGas {
    pub solved: GasUnknown,
    /// atm
    pub pressure: f64,
    /// L
    pub volume: f64,
    pub moles: f64,
    /// K
    pub temperature: f64,
    pub pressure_unit: PressureUnit,
    pub temperature_unit: TemperatureUnit,
}

impl SolvedGas {
    pub fn molar_volume(&self) -> f64 {
        self.volume / self.moles
    }
}

pub struct IdealGas;

static IDEAL_GAS_PAGE: CalculatorPage = CalculatorPage {
    title: "Ideal Gas Law Calculator",
    description: "Solve PV = nRT for pressure, volume, moles or temperature.",
    meta_description: "Ideal gas law calculator: find P, V, n or T with unit conversion for pressure and temperature.",
    keywords: &["ideal gas law", "pv=nrt", "gas constant", "molar volume"],
    back_link: "/category/chemistry",
    back_label: "Chemistry Calculators",
    introduction: Section {
        title: "PV = nRT",
        content: "An ideal gas obeys PV = nRT, where R = 0.082057 L·atm/(mol·K). Enter any \
three of pressure, volume, amount and temperature and leave the fourth blank.",
    },
    additional_sections: &[Section {
        title: "Standard conditions",
        content: "At 0 °C and 1 atm one mole of ideal gas occupies about 22.41 L.",
    }],
    notes: &["Real gases deviate at high pressure and low temperature."],
};

impl Calculator for IdealGas {
    type Input = GasState;
    type Output = SolvedGas;

    fn id(&self) -> &'static str {
        "ideal-gas"
    }

    fn page(&self) -> &'static CalculatorPage {
        &IDEAL_GAS_PAGE
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("pressure", "Pressure (P)").optional(),
            FieldSpec::choice::<PressureUnit>("pressure_unit", "Pressure unit"),
            FieldSpec::number("volume", "Volume (V)").unit("L").optional(),
            FieldSpec::number("moles", "Amount (n)").unit("mol").optional(),
            FieldSpec::number("temperature", "Temperature (T)").optional(),
            FieldSpec::choice::<TemperatureUnit>("temperature_unit", "Temperature unit"),
        ]
    }

    fn parse(&self, form: &FormValues) -> Result<Self::Input, ValidationError> {
        let pressure_unit = form.choice::<PressureUnit>("pressure_unit", "Pressure unit")?;
        let temperature_unit = form.choice::<TemperatureUnit>("temperature_unit", "Temperature unit")?;
        let temperature = form
            .optional_number("temperature", "Temperature")?
            .map(|t| match temperature_unit {
                TemperatureUnit::Kelvin => t,
                TemperatureUnit::Celsius => t + CELSIUS_OFFSET,
            });
        Ok(GasState {
            pressure: form
                .optional_positive("pressure", "Pressure")?
                .map(|p| p / pressure_unit.per_atm()),
            volume: form.optional_positive("volume", "Volume")?,
            moles: form.optional_positive("moles", "Amount")?,
            temperature,
            pressure_unit,
            temperature_unit,
        })
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.unknown().is_none() {
            return Err(ValidationError::precondition(
                "Leave exactly one of pressure, volume, amount and temperature blank",
            ));
        }
        if input.temperature.is_some_and(|t| t <= 0.0) {
            return Err(ValidationError::precondition(
                "Temperature must be above absolute zero",
            ));
        }
        Ok(())
    }

    fn compute(&self, input: &Self::Input) -> Self::Output {
        let solved = input.unknown().unwrap_or(GasUnknown::Pressure);
        let p = input.pressure.unwrap_or(f64::NAN);
        let v = input.volume.unwrap_or(f64::NAN);
        let n = input.moles.unwrap_or(f64::NAN);
        let t = input.temperature.unwrap_or(f64::NAN);
        let r = GAS_CONSTANT;
        let (pressure, volume, moles, temperature) = match solved {
            GasUnknown::Pressure => (n * r * t / v, v, n, t),
            GasUnknown::Volume => (p, n * r * t / p, n, t),
            GasUnknown::Moles => (p, v, p * v / (r * t), t),
            GasUnknown::Temperature => (p, v, n, p * v / (n * r)),
        };
        SolvedGas {
            solved,
            pressure,
            volume,
            moles,
            temperature,
            pressure_unit: input.pressure_unit,
            temperature_unit: input.temperature_unit,
        }
    }

    fn render(&self, output: &Self::Output) -> ResultView {
        let pressure = with_unit(
            output.pressure * output.pressure_unit.per_atm(),
            4,
            output.pressure_unit.label(),
        );
        let temperature = match output.temperature_unit {
            TemperatureUnit::Kelvin => with_unit(output.temperature, 2, "K"),
            TemperatureUnit::Celsius => with_unit(output.temperature - CELSIUS_OFFSET, 2, "°C"),
        };
        let volume = with_unit(output.volume, 4, "L");
        let moles = with_unit(output.moles, 4, "mol");

        let (label, headline) = match output.solved {
            GasUnknown::Pressure => ("Pressure", pressure.clone()),
            GasUnknown::Volume => ("Volume", volume.clone()),
            GasUnknown::Moles => ("Amount", moles.clone()),
            GasUnknown::Temperature => ("Temperature", temperature.clone()),
        };
        ResultView::new()
            .primary(label, headline)
            .table(vec![
                vec!["Quantity".into(), "Value".into()],
                vec!["P".into(), pressure],
                vec!["V".into(), volume],
                vec!["n".into(), moles],
                vec!["T".into(), temperature],
            ])
            .field("Molar volume", with_unit(output.molar_volume(), 3, "L/mol"))
            .field("R", number(GAS_CONSTANT, 6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::CalculatorLeaf;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_molar_volume_at_stp() {
        let form = FormValues::from_pairs([
            ("pressure", "1"),
            ("moles", "1"),
            ("temperature", "0"),
            ("temperature_unit", "c"),
        ]);
        let input = IdealGas.parse(&form).unwrap();
        assert!(IdealGas.validate(&input).is_ok());
        let out = IdealGas.compute(&input);
        assert_eq!(out.solved, GasUnknown::Volume);
        assert_abs_diff_eq!(out.volume, 22.414, epsilon = 1e-3);
    }

    #[test]
    fn test_solves_pressure_in_kpa() {
        let form = FormValues::from_pairs([
            ("volume", "22.414"),
            ("moles", "1"),
            ("temperature", "273.15"),
            ("pressure_unit", "kpa"),
        ]);
        let evaluation = IdealGas.evaluate(&form);
        let result = evaluation.result().unwrap();
        assert_eq!(result.value_of("Pressure"), Some("101.3244 kPa"));
    }

    #[test]
    fn test_solves_temperature() {
        let out = IdealGas.compute(&GasState {
            pressure: Some(2.0),
            volume: Some(10.0),
            moles: Some(1.0),
            temperature: None,
            pressure_unit: PressureUnit::Atm,
            temperature_unit: TemperatureUnit::Kelvin,
        });
        assert_abs_diff_eq!(out.temperature, 20.0 / GAS_CONSTANT, epsilon = 1e-9);
    }

    #[test]
    fn test_requires_exactly_one_blank() {
        let form = FormValues::from_pairs([("pressure", "1"), ("volume", "2")]);
        assert_eq!(
            IdealGas.evaluate(&form).error(),
            Some("Leave exactly one of pressure, volume, amount and temperature blank")
        );
    }

    #[test]
    fn test_rejects_absolute_zero() {
        let form = FormValues::from_pairs([
            ("pressure", "1"),
            ("volume", "2"),
            ("temperature", "-300"),
            ("temperature_unit", "c"),
        ]);
        assert_eq!(
            IdealGas.evaluate(&form).error(),
            Some("Temperature must be above absolute zero")
        );
    }
}
