//! Body-mass-index calculator.
//!
//! [`calculate_bmi`] is a pure function of weight and height and performs no
//! validation. Range checks belong to the caller; [`BmiForm`] implements the
//! checks the calculator page runs before calling it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification band, left-inclusive on fixed thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    /// bmi < 18.5
    Underweight,
    /// 18.5 <= bmi < 25
    Normal,
    /// 25 <= bmi < 30
    Overweight,
    /// bmi >= 30
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    /// Band for an index value.
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Berat Badan Kurang",
            BmiCategory::Normal => "Berat Badan Normal",
            BmiCategory::Overweight => "Berat Badan Berlebih",
            BmiCategory::Obese => "Obesitas",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "Disarankan untuk menambah berat badan dengan pola makan bergizi"
            }
            BmiCategory::Normal => "Pertahankan pola hidup sehat dan berat badan ideal",
            BmiCategory::Overweight => {
                "Disarankan untuk mengurangi berat badan dengan diet dan olahraga"
            }
            BmiCategory::Obese => "Konsultasi dengan dokter untuk program penurunan berat badan",
        }
    }

    /// Range as shown in the reference table.
    pub fn range_label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "< 18.5",
            BmiCategory::Normal => "18.5 - 24.9",
            BmiCategory::Overweight => "25.0 - 29.9",
            BmiCategory::Obese => "≥ 30.0",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    #[serde(rename = "laki-laki")]
    Male,
    #[serde(rename = "perempuan")]
    Female,
}

/// Outcome of a BMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    pub weight: f64,
    pub height: f64,
    /// Index rounded to two decimals
    pub bmi: f64,
    pub category: BmiCategory,
    pub recommendation: String,
    /// Carried through from the form; not used in the computation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

/// Compute the body-mass index for a weight in kilograms and height in
/// centimetres.
///
/// The band is chosen from the unrounded index; the reported `bmi` is rounded
/// to two decimals.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> BmiResult {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    let category = BmiCategory::classify(bmi);

    BmiResult {
        weight: weight_kg,
        height: height_cm,
        bmi: round2(bmi),
        category,
        recommendation: category.recommendation().to_string(),
        age: None,
        gender: None,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculator form rejections, in the order they are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BmiInputError {
    #[error("Silakan lengkapi semua data yang diperlukan")]
    Incomplete,

    #[error("Berat badan harus antara 1-500 kg")]
    WeightOutOfRange,

    #[error("Tinggi badan harus antara 1-300 cm")]
    HeightOutOfRange,

    #[error("Usia harus antara 18-100 tahun")]
    AgeOutOfRange,
}

/// Raw calculator form input. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BmiForm {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
}

impl BmiForm {
    pub fn new(weight_kg: f64, height_cm: f64, age: i32, gender: Gender) -> Self {
        Self {
            weight_kg: Some(weight_kg),
            height_cm: Some(height_cm),
            age: Some(age),
            gender: Some(gender),
        }
    }

    /// Check the form. Zero and NaN count as missing, like an empty field.
    pub fn validate(&self) -> Result<(), BmiInputError> {
        let (Some(weight), Some(height), Some(age), Some(_)) =
            (present(self.weight_kg), present(self.height_cm), self.age, self.gender)
        else {
            return Err(BmiInputError::Incomplete);
        };
        if age == 0 {
            return Err(BmiInputError::Incomplete);
        }

        if weight <= 0.0 || weight > 500.0 {
            return Err(BmiInputError::WeightOutOfRange);
        }
        if height <= 0.0 || height > 300.0 {
            return Err(BmiInputError::HeightOutOfRange);
        }
        if !(18..=100).contains(&age) {
            return Err(BmiInputError::AgeOutOfRange);
        }
        Ok(())
    }

    /// Validate, then calculate with age and gender attached to the result.
    pub fn evaluate(&self) -> Result<BmiResult, BmiInputError> {
        self.validate()?;
        let (Some(weight), Some(height)) = (self.weight_kg, self.height_cm) else {
            return Err(BmiInputError::Incomplete);
        };

        let mut result = calculate_bmi(weight, height);
        result.age = self.age;
        result.gender = self.gender;
        Ok(result)
    }
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan() && *v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value() {
        let result = calculate_bmi(70.0, 175.0);
        assert_eq!(result.bmi, 22.86);
        assert_eq!(result.category, BmiCategory::Normal);
        assert_eq!(
            result.recommendation,
            "Pertahankan pola hidup sehat dan berat badan ideal"
        );
        assert_eq!(result.weight, 70.0);
        assert_eq!(result.height, 175.0);
        assert!(result.age.is_none());
    }

    #[test]
    fn test_band_boundaries_are_left_inclusive() {
        // At 100cm the index equals the weight.
        let cases = [
            (18.49, BmiCategory::Underweight),
            (18.5, BmiCategory::Normal),
            (24.99, BmiCategory::Normal),
            (25.0, BmiCategory::Overweight),
            (29.99, BmiCategory::Overweight),
            (30.0, BmiCategory::Obese),
        ];
        for (weight, expected) in cases {
            let result = calculate_bmi(weight, 100.0);
            assert_eq!(result.category, expected, "weight {}", weight);
            assert_eq!(result.bmi, weight);
        }
    }

    #[test]
    fn test_range_labels() {
        let labels: Vec<_> = BmiCategory::ALL.iter().map(|c| c.range_label()).collect();
        assert_eq!(labels, vec!["< 18.5", "18.5 - 24.9", "25.0 - 29.9", "≥ 30.0"]);
    }

    #[test]
    fn test_form_missing_fields() {
        assert_eq!(BmiForm::default().validate(), Err(BmiInputError::Incomplete));

        let mut form = BmiForm::new(70.0, 175.0, 30, Gender::Female);
        form.gender = None;
        assert_eq!(form.validate(), Err(BmiInputError::Incomplete));

        let form = BmiForm::new(0.0, 175.0, 30, Gender::Female);
        assert_eq!(form.validate(), Err(BmiInputError::Incomplete));
    }

    #[test]
    fn test_form_range_checks_in_order() {
        let form = BmiForm::new(501.0, 400.0, 10, Gender::Male);
        assert_eq!(form.validate(), Err(BmiInputError::WeightOutOfRange));

        let form = BmiForm::new(-3.0, 170.0, 30, Gender::Male);
        assert_eq!(form.validate(), Err(BmiInputError::WeightOutOfRange));

        let form = BmiForm::new(70.0, 301.0, 10, Gender::Male);
        assert_eq!(form.validate(), Err(BmiInputError::HeightOutOfRange));

        let form = BmiForm::new(70.0, 170.0, 17, Gender::Male);
        assert_eq!(form.validate(), Err(BmiInputError::AgeOutOfRange));

        let form = BmiForm::new(70.0, 170.0, 101, Gender::Male);
        assert_eq!(form.validate(), Err(BmiInputError::AgeOutOfRange));
    }

    #[test]
    fn test_form_limits_inclusive() {
        assert!(BmiForm::new(500.0, 300.0, 18, Gender::Male).validate().is_ok());
        assert!(BmiForm::new(1.0, 1.0, 100, Gender::Female).validate().is_ok());
    }

    #[test]
    fn test_evaluate_attaches_age_and_gender() {
        let result = BmiForm::new(95.0, 170.0, 45, Gender::Male).evaluate().unwrap();

        assert_eq!(result.bmi, 32.87);
        assert_eq!(result.category, BmiCategory::Obese);
        assert_eq!(result.age, Some(45));
        assert_eq!(result.gender, Some(Gender::Male));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BmiInputError::HeightOutOfRange.to_string(),
            "Tinggi badan harus antara 1-300 cm"
        );
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(calculate_bmi(50.0, 160.0)).unwrap();
        assert_eq!(json["bmi"], 19.53);
        assert_eq!(json["category"], "normal");
        assert!(json.get("age").is_none());
    }
}
