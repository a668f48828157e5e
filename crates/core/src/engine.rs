//! Diagnosis orchestration.
//!
//! A request runs encode, classify, resolve name, then the five reference lookups.
//! The engine keeps no per-request state; one instance can be shared across threads
//! behind an `Arc`.

use crate::catalog::{ConditionCatalog, ConditionCode};
use crate::classifier::ClassifierHandle;
use crate::config::CoreConfig;
use crate::encoder::FeatureEncoder;
use crate::reference::ReferenceStore;
use crate::{DiagnosisError, DiagnosisResult};
use neuralcare_types::PatientContext;
use serde::Serialize;

/// Guidance assembled for one predicted condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationBundle {
    /// Condition name exactly as it appears in the vocabulary.
    pub condition: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub medications: Vec<String>,
    pub diet: Vec<String>,
    pub workout: Vec<String>,
}

/// A successful diagnosis: the recommendation plus what it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    /// Passed through from the request for display.
    pub patient: PatientContext,
    /// Recognised symptoms in catalog order; unknown identifiers are not listed.
    pub reported_symptoms: Vec<&'static str>,
    pub code: ConditionCode,
    pub recommendation: RecommendationBundle,
}

#[derive(Debug)]
pub struct DiagnosisEngine {
    encoder: FeatureEncoder,
    classifier: ClassifierHandle,
    conditions: &'static ConditionCatalog,
    references: ReferenceStore,
}

impl DiagnosisEngine {
    pub fn new(classifier: ClassifierHandle, references: ReferenceStore) -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            classifier,
            conditions: ConditionCatalog::get(),
            references,
        }
    }

    /// Loads the classifier artifact and reference tables named by `cfg`.
    ///
    /// This is the only blocking I/O the engine performs. Load failures do not abort
    /// startup: a missing model makes every request fail with `ModelUnavailable`, and a
    /// missing table degrades to its sentinel.
    pub fn load(cfg: &CoreConfig) -> Self {
        let classifier = ClassifierHandle::load_linear(cfg.model_path());
        let references = ReferenceStore::load(cfg.data_dir());

        let report = references.consistency_report(ConditionCatalog::get());
        if report.is_clean() {
            tracing::info!("reference tables cover every condition");
        } else {
            report.log();
        }

        Self::new(classifier, references)
    }

    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_loaded()
    }

    pub fn classifier(&self) -> &ClassifierHandle {
        &self.classifier
    }

    pub fn references(&self) -> &ReferenceStore {
        &self.references
    }

    /// Predicts a condition for `symptoms` and assembles its recommendation.
    ///
    /// # Errors
    ///
    /// - `ModelUnavailable` if no classifier was loaded; nothing else is attempted.
    /// - `NoSymptomsSelected` if none of `symptoms` is in the vocabulary; the
    ///   classifier is not called.
    /// - `UnknownConditionCode` if the classifier returns a label outside the
    ///   condition vocabulary.
    /// - `Classifier` if the classifier itself fails.
    pub fn diagnose<I, S>(&self, patient: &PatientContext, symptoms: I) -> DiagnosisResult<Diagnosis>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classifier = self.classifier.get()?;

        let features = self.encoder.encode(symptoms);
        let recognised = features.count_ones();
        if recognised == 0 {
            return Err(DiagnosisError::NoSymptomsSelected);
        }

        let code = classifier.predict(&features)?;
        tracing::debug!(recognised, code = %code, "classifier prediction");

        let Some(condition) = self.conditions.name_of(code) else {
            tracing::error!(code = %code, "classifier returned a code outside the condition vocabulary");
            return Err(DiagnosisError::UnknownConditionCode(code));
        };

        Ok(Diagnosis {
            patient: patient.clone(),
            reported_symptoms: features.reported_symptoms(),
            code,
            recommendation: self.recommend(condition),
        })
    }

    /// Assembles the recommendation for an exact condition name.
    pub fn recommend(&self, condition: &str) -> RecommendationBundle {
        let refs = &self.references;
        RecommendationBundle {
            condition: condition.to_string(),
            description: refs.description(condition),
            precautions: refs.precautions(condition),
            medications: refs.medications(condition),
            diet: refs.diet(condition),
            workout: refs.workout(condition),
        }
    }
}
