//! Request and response bodies for the REST API.

use neuralcare_core::{
    ConditionCatalog, Diagnosis, DiagnosisError, Gender, NonEmptyText, PatientContext,
    PatientError, SymptomCatalog, DISCLAIMER,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    pub model_loaded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SymptomEntry {
    /// Identifier to send back in a diagnose request.
    pub id: String,
    /// Feature-vector position.
    pub index: usize,
    pub label: String,
}

impl SymptomEntry {
    pub fn from_id(id: &str) -> Option<Self> {
        let index = SymptomCatalog::get().index_of(id)?;
        Some(Self {
            id: id.to_string(),
            index,
            label: SymptomCatalog::display_label(id),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListSymptomsRes {
    pub symptoms: Vec<SymptomEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConditionEntry {
    pub code: i64,
    /// Exact name, including any trailing whitespace.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListConditionsRes {
    pub conditions: Vec<ConditionEntry>,
}

impl ListConditionsRes {
    pub fn from_catalog(catalog: &ConditionCatalog) -> Self {
        Self {
            conditions: catalog
                .iter()
                .map(|(code, name)| ConditionEntry {
                    code: code.0,
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

/// Optional patient details. None of them affect the prediction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatientReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    /// `Male`, `Female` or `Other`.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

impl TryFrom<PatientReq> for PatientContext {
    type Error = PatientError;

    fn try_from(req: PatientReq) -> Result<Self, Self::Error> {
        let ctx = PatientContext {
            // A blank name is treated as no name.
            name: req.name.and_then(|n| NonEmptyText::new(n).ok()),
            age: req.age,
            gender: req
                .gender
                .filter(|g| !g.trim().is_empty())
                .map(|g| g.parse::<Gender>())
                .transpose()?,
            height_cm: req.height_cm,
            weight_kg: req.weight_kg,
        };
        ctx.validate()?;
        Ok(ctx)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagnoseReq {
    /// Symptom identifiers; unknown identifiers are ignored.
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub patient: Option<PatientReq>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_category: Option<String>,
}

impl From<&PatientContext> for PatientSummary {
    fn from(ctx: &PatientContext) -> Self {
        let bmi = ctx.bmi();
        Self {
            name: ctx.name.as_ref().map(|n| n.to_string()),
            age: ctx.age,
            gender: ctx.gender.map(|g| g.to_string()),
            height_cm: ctx.height_cm,
            weight_kg: ctx.weight_kg,
            bmi: bmi.map(|b| (b.value * 10.0).round() / 10.0),
            bmi_category: bmi.map(|b| b.category.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagnoseRes {
    pub request_id: String,
    pub assessed_at: String,
    pub code: i64,
    pub condition: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub medications: Vec<String>,
    pub diet: Vec<String>,
    pub workout: Vec<String>,
    pub reported_symptoms: Vec<SymptomEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientSummary>,
    pub disclaimer: String,
}

impl DiagnoseRes {
    pub fn from_diagnosis(diagnosis: Diagnosis, request_id: String, assessed_at: String) -> Self {
        let patient = if diagnosis.patient.is_empty() {
            None
        } else {
            Some(PatientSummary::from(&diagnosis.patient))
        };
        let bundle = diagnosis.recommendation;
        Self {
            request_id,
            assessed_at,
            code: diagnosis.code.0,
            condition: bundle.condition,
            description: bundle.description,
            precautions: bundle.precautions,
            medications: bundle.medications,
            diet: bundle.diet,
            workout: bundle.workout,
            reported_symptoms: diagnosis
                .reported_symptoms
                .iter()
                .filter_map(|id| SymptomEntry::from_id(id))
                .collect(),
            patient,
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    /// Machine-readable error kind.
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&DiagnosisError> for ErrorRes {
    fn from(e: &DiagnosisError) -> Self {
        let kind = match e {
            DiagnosisError::ModelUnavailable { .. } => "model_unavailable",
            DiagnosisError::NoSymptomsSelected => "no_symptoms_selected",
            DiagnosisError::UnknownConditionCode(_) => "unknown_condition_code",
            DiagnosisError::Classifier(_) => "classifier_failed",
        };
        Self {
            error: kind.into(),
            message: e.to_string(),
            hint: e.user_hint().map(str::to_string),
        }
    }
}

impl From<&PatientError> for ErrorRes {
    fn from(e: &PatientError) -> Self {
        Self {
            error: "invalid_patient".into(),
            message: e.to_string(),
            hint: Some("Correct the highlighted patient details and submit again.".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_req_converts_and_validates() {
        let req = PatientReq {
            name: Some("  ".into()),
            age: Some(40),
            gender: Some("female".into()),
            height_cm: Some(165.0),
            weight_kg: Some(60.0),
        };
        let ctx = PatientContext::try_from(req).unwrap();
        assert!(ctx.name.is_none());
        assert_eq!(ctx.gender, Some(Gender::Female));

        let req = PatientReq {
            age: Some(200),
            ..Default::default()
        };
        assert!(matches!(
            PatientContext::try_from(req),
            Err(PatientError::AgeOutOfRange(200))
        ));
    }

    #[test]
    fn test_patient_summary_rounds_bmi() {
        let ctx = PatientContext {
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            ..Default::default()
        };
        let summary = PatientSummary::from(&ctx);
        assert_eq!(summary.bmi, Some(22.9));
        assert_eq!(summary.bmi_category.as_deref(), Some("Normal"));
    }

    #[test]
    fn test_error_res_kinds() {
        let res = ErrorRes::from(&DiagnosisError::NoSymptomsSelected);
        assert_eq!(res.error, "no_symptoms_selected");
        assert!(res.hint.is_some());

        let json = serde_json::to_value(ErrorRes::from(&DiagnosisError::UnknownConditionCode(
            neuralcare_core::ConditionCode(77),
        )))
        .unwrap();
        assert!(json.get("hint").is_none());
    }

    #[test]
    fn test_condition_listing_preserves_whitespace() {
        let res = ListConditionsRes::from_catalog(ConditionCatalog::get());
        assert_eq!(res.conditions.len(), 41);
        assert!(res.conditions.iter().any(|c| c.name == "Hypertension "));
    }
}
