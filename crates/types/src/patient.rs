//! Patient metadata carried alongside a symptom selection.
//!
//! The engine passes this through untouched for display; it never affects
//! the predicted condition.

use crate::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const AGE_RANGE: (u32, u32) = (1, 120);
const HEIGHT_RANGE_CM: (f64, f64) = (30.0, 250.0);
const WEIGHT_RANGE_KG: (f64, f64) = (1.0, 500.0);

/// Validation failures for patient metadata.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PatientError {
    #[error("Age must be within 1-120 years.")]
    AgeOutOfRange(u32),
    #[error("Physical height must be within 30-250 cm.")]
    HeightOutOfRange(f64),
    #[error("Physical weight must be within 1-500 kg.")]
    WeightOutOfRange(f64),
    #[error("unrecognised gender '{0}' (expected Male, Female or Other)")]
    UnknownGender(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(s)
    }
}

impl FromStr for Gender {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(PatientError::UnknownGender(s.to_string())),
        }
    }
}

/// Optional, uninterpreted patient details supplied with a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

impl PatientContext {
    /// Checks the supplied measurements against the accepted physical ranges.
    ///
    /// Absent fields are not an error; only values that are present are checked.
    pub fn validate(&self) -> Result<(), PatientError> {
        if let Some(age) = self.age {
            if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&age) {
                return Err(PatientError::AgeOutOfRange(age));
            }
        }
        if let Some(h) = self.height_cm {
            if !(HEIGHT_RANGE_CM.0..=HEIGHT_RANGE_CM.1).contains(&h) {
                return Err(PatientError::HeightOutOfRange(h));
            }
        }
        if let Some(w) = self.weight_kg {
            if !(WEIGHT_RANGE_KG.0..=WEIGHT_RANGE_KG.1).contains(&w) {
                return Err(PatientError::WeightOutOfRange(w));
            }
        }
        Ok(())
    }

    /// Body mass index, when both height and weight are known.
    pub fn bmi(&self) -> Option<Bmi> {
        Bmi::from_measurements(self.height_cm?, self.weight_kg?)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

impl Bmi {
    /// Computes BMI from height in centimetres and weight in kilograms.
    ///
    /// Returns `None` for non-positive measurements.
    pub fn from_measurements(height_cm: f64, weight_kg: f64) -> Option<Self> {
        if height_cm <= 0.0 || weight_kg <= 0.0 {
            return None;
        }
        let metres = height_cm / 100.0;
        let value = weight_kg / (metres * metres);
        let category = if value < 18.5 {
            BmiCategory::Underweight
        } else if value < 25.0 {
            BmiCategory::Normal
        } else if value < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        };
        Some(Self { value, category })
    }
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ({})", self.value, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_empty_context() {
        assert!(PatientContext::default().validate().is_ok());
        assert!(PatientContext::default().is_empty());
    }

    #[test]
    fn test_validate_rejects_age_out_of_range() {
        let ctx = PatientContext {
            age: Some(0),
            ..Default::default()
        };
        assert_eq!(ctx.validate(), Err(PatientError::AgeOutOfRange(0)));

        let ctx = PatientContext {
            age: Some(121),
            ..Default::default()
        };
        assert!(ctx.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_measurements_out_of_range() {
        let ctx = PatientContext {
            height_cm: Some(29.0),
            ..Default::default()
        };
        assert!(matches!(
            ctx.validate(),
            Err(PatientError::HeightOutOfRange(_))
        ));

        let ctx = PatientContext {
            weight_kg: Some(501.0),
            ..Default::default()
        };
        assert!(matches!(
            ctx.validate(),
            Err(PatientError::WeightOutOfRange(_))
        ));
    }

    #[test]
    fn test_bmi_categories() {
        let cases = [
            (180.0, 55.0, BmiCategory::Underweight),
            (180.0, 75.0, BmiCategory::Normal),
            (180.0, 90.0, BmiCategory::Overweight),
            (180.0, 110.0, BmiCategory::Obese),
        ];
        for (h, w, expected) in cases {
            let bmi = Bmi::from_measurements(h, w).unwrap();
            assert_eq!(bmi.category, expected, "h={h} w={w}");
        }
    }

    #[test]
    fn test_bmi_display_matches_one_decimal() {
        let bmi = Bmi::from_measurements(175.0, 70.0).unwrap();
        assert_eq!(bmi.to_string(), "22.9 (Normal)");
    }

    #[test]
    fn test_bmi_requires_both_measurements() {
        let ctx = PatientContext {
            height_cm: Some(170.0),
            ..Default::default()
        };
        assert!(ctx.bmi().is_none());
        assert!(Bmi::from_measurements(0.0, 70.0).is_none());
    }

    #[test]
    fn test_gender_parses_case_insensitively() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" MALE ".parse::<Gender>().unwrap(), Gender::Male);
        assert!("unknown".parse::<Gender>().is_err());
    }
}
