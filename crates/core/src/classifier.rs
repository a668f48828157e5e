//! Condition classifier seam.
//!
//! The engine only knows the [`ConditionClassifier`] contract: a feature vector goes
//! in, a condition code comes out. [`LinearClassifier`] reads the JSON linear model
//! exported by the training pipeline; tests and other hosts may inject their own
//! implementation.
//!
//! Whether a model was loaded at startup is tracked by [`ClassifierHandle`], so a
//! missing artifact becomes a reportable state rather than a crash.

use crate::catalog::{ConditionCode, SYMPTOM_COUNT};
use crate::encoder::FeatureVector;
use crate::{ClassifierError, DiagnosisError, DiagnosisResult, LoadError, LoadResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A pre-trained model mapping a feature vector to a condition code.
///
/// Implementations must be deterministic for a fixed artifact and safe to call from
/// several threads at once.
pub trait ConditionClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<ConditionCode, ClassifierError>;
}

/// On-disk form of a linear model: one weight row and intercept per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Linear decision model: predicts the class with the highest `w · x + b`.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<ConditionCode>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    /// Validates the artifact shape against the symptom vocabulary.
    pub fn from_artifact(artifact: LinearModelArtifact) -> LoadResult<Self> {
        if artifact.n_features != SYMPTOM_COUNT {
            return Err(LoadError::ModelShape(format!(
                "model was trained on {} features, expected {}",
                artifact.n_features, SYMPTOM_COUNT
            )));
        }
        if artifact.classes.is_empty() {
            return Err(LoadError::ModelShape("model has no classes".into()));
        }
        if artifact.coefficients.len() != artifact.classes.len()
            || artifact.intercepts.len() != artifact.classes.len()
        {
            return Err(LoadError::ModelShape(format!(
                "{} classes but {} coefficient rows and {} intercepts",
                artifact.classes.len(),
                artifact.coefficients.len(),
                artifact.intercepts.len()
            )));
        }
        if let Some((i, row)) = artifact
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != artifact.n_features)
        {
            return Err(LoadError::ModelShape(format!(
                "coefficient row {} has {} weights, expected {}",
                i,
                row.len(),
                artifact.n_features
            )));
        }

        Ok(Self {
            classes: artifact.classes.into_iter().map(ConditionCode).collect(),
            coefficients: artifact.coefficients,
            intercepts: artifact.intercepts,
        })
    }

    /// Reads and validates a JSON artifact from disk.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: LinearModelArtifact =
            serde_json::from_str(&raw).map_err(|source| LoadError::ModelParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_artifact(artifact)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl ConditionClassifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ConditionCode, ClassifierError> {
        let x = features.as_slice();
        let mut best: Option<(usize, f64)> = None;

        for (k, (row, b)) in self.coefficients.iter().zip(&self.intercepts).enumerate() {
            if row.len() != x.len() {
                return Err(ClassifierError::FeatureLength {
                    expected: row.len(),
                    actual: x.len(),
                });
            }
            let score = row
                .iter()
                .zip(x)
                .map(|(w, v)| w * f64::from(*v))
                .sum::<f64>()
                + b;
            // Strict comparison keeps the first class on ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((k, score));
            }
        }

        best.map(|(k, _)| self.classes[k])
            .ok_or(ClassifierError::NoClasses)
    }
}

/// The classifier as loaded at startup, or the reason it could not be.
#[derive(Clone)]
pub enum ClassifierHandle {
    Loaded(Arc<dyn ConditionClassifier>),
    Unavailable { reason: String },
}

impl fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierHandle::Loaded(_) => f.write_str("ClassifierHandle::Loaded"),
            ClassifierHandle::Unavailable { reason } => f
                .debug_struct("ClassifierHandle::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

impl ClassifierHandle {
    pub fn loaded(classifier: impl ConditionClassifier + 'static) -> Self {
        ClassifierHandle::Loaded(Arc::new(classifier))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ClassifierHandle::Unavailable {
            reason: reason.into(),
        }
    }

    /// Loads a [`LinearClassifier`] artifact, recording any failure instead of returning it.
    pub fn load_linear(path: &Path) -> Self {
        match LinearClassifier::load(path) {
            Ok(model) => {
                tracing::info!(
                    path = %path.display(),
                    classes = model.class_count(),
                    "loaded classifier artifact"
                );
                Self::loaded(model)
            }
            Err(e) => {
                tracing::error!("failed to load classifier from {}: {}", path.display(), e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ClassifierHandle::Loaded(_))
    }

    /// The loaded classifier, or [`DiagnosisError::ModelUnavailable`].
    pub fn get(&self) -> DiagnosisResult<&dyn ConditionClassifier> {
        match self {
            ClassifierHandle::Loaded(c) => Ok(c.as_ref()),
            ClassifierHandle::Unavailable { reason } => Err(DiagnosisError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }
}
