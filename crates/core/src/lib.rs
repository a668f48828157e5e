//! # NeuralCare Core
//!
//! Symptom-to-recommendation inference.
//!
//! This crate contains the whole pipeline and nothing else:
//! - Static symptom and condition vocabularies
//! - Encoding a symptom selection into a feature vector
//! - The classifier seam and the linear model artifact loader
//! - Reference tables (description, precautions, medications, diet, workout)
//! - The diagnosis engine that ties them together
//!
//! **No presentation concerns**: HTTP servers and the CLI live in `api-rest` and
//! `neuralcare-cli`, and call into [`DiagnosisEngine`].

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod reference;

pub use catalog::{ConditionCatalog, ConditionCode, SymptomCatalog, CONDITION_COUNT, SYMPTOM_COUNT};
pub use classifier::{ClassifierHandle, ConditionClassifier, LinearClassifier, LinearModelArtifact};
pub use config::CoreConfig;
pub use constants::{DEFAULT_DATA_DIR, DISCLAIMER};
pub use encoder::{FeatureEncoder, FeatureVector};
pub use engine::{Diagnosis, DiagnosisEngine, RecommendationBundle};
pub use error::{
    ClassifierError, ConfigError, ConfigResult, DiagnosisError, DiagnosisResult, LoadError,
    LoadResult,
};
pub use reference::{ConsistencyReport, ReferenceStore, ReferenceTable, TableGap, TableKind};

pub use neuralcare_types::{Bmi, BmiCategory, Gender, NonEmptyText, PatientContext, PatientError};
