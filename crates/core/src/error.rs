use crate::catalog::ConditionCode;
use crate::reference::TableKind;
use std::path::PathBuf;

/// Errors returned by a diagnosis request.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("the prediction model is unavailable: {reason}")]
    ModelUnavailable { reason: String },
    #[error("no recognised symptoms were selected")]
    NoSymptomsSelected,
    #[error("classifier returned condition code {0}, which is not in the condition vocabulary")]
    UnknownConditionCode(ConditionCode),
    #[error("classifier failed: {0}")]
    Classifier(#[from] ClassifierError),
}

impl DiagnosisError {
    /// Whether the caller can fix this by re-prompting the user or retrying later.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DiagnosisError::ModelUnavailable { .. } | DiagnosisError::NoSymptomsSelected
        )
    }

    /// What the user can do next, for recoverable errors.
    pub fn user_hint(&self) -> Option<&'static str> {
        match self {
            DiagnosisError::ModelUnavailable { .. } => Some(
                "The prediction model could not be loaded. Check the installation and try again once it is available.",
            ),
            DiagnosisError::NoSymptomsSelected => {
                Some("Please select at least one symptom from the list.")
            }
            DiagnosisError::UnknownConditionCode(_) | DiagnosisError::Classifier(_) => None,
        }
    }
}

pub type DiagnosisResult<T> = std::result::Result<T, DiagnosisError>;

/// Errors raised by a classifier while scoring a feature vector.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("feature vector has {actual} entries but the model expects {expected}")]
    FeatureLength { expected: usize, actual: usize },
    #[error("model has no classes")]
    NoClasses,
}

/// Errors raised while loading startup artifacts.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse model artifact {}: {source}", .path.display())]
    ModelParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    ModelShape(String),
    #[error("{table} table has no key column (expected 'Disease' or 'disease')")]
    MissingKeyColumn { table: TableKind },
    #[error("{table} table is missing column '{column}'")]
    MissingColumn { table: TableKind, column: String },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidInput(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
