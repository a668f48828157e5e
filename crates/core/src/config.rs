//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the engine
//! loader. Request handling never reads environment variables.

use crate::constants::{DEFAULT_DATA_DIR, MODEL_FILENAME};
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    model_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The data directory must exist. The model path is not checked here: a missing
    /// artifact is reported as an unavailable model when the engine loads.
    pub fn new(data_dir: PathBuf, model_path: PathBuf) -> ConfigResult<Self> {
        if !data_dir.is_dir() {
            return Err(ConfigError::InvalidInput(format!(
                "data directory does not exist: {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            data_dir,
            model_path,
        })
    }

    /// Resolve both paths from optional overrides, as hosts do at startup.
    pub fn resolve(
        data_dir_override: Option<PathBuf>,
        model_path_override: Option<PathBuf>,
    ) -> ConfigResult<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        let model_path = resolve_model_path(model_path_override, &data_dir);
        Self::new(data_dir, model_path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn table_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

/// Resolve the reference data directory without reading environment variables.
///
/// If `override_dir` is provided, it must be a directory. Otherwise this searches for
/// `data/` relative to the current working directory and then walks up from
/// `CARGO_MANIFEST_DIR`.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> ConfigResult<PathBuf> {
    if let Some(dir) = override_dir {
        if dir.is_dir() {
            return Ok(dir);
        }
        return Err(ConfigError::InvalidInput(format!(
            "NEURALCARE_DATA_DIR override is not a directory: {}",
            dir.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_DATA_DIR);
    if cwd_relative.is_dir() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_DATA_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }

    Err(ConfigError::InvalidInput(
        "could not locate data/ directory with reference tables".into(),
    ))
}

/// Resolve the classifier artifact path.
///
/// An override is used verbatim. Otherwise the artifact is expected next to the data
/// directory (`<data_dir>/../model.json`), falling back to inside it.
pub fn resolve_model_path(override_path: Option<PathBuf>, data_dir: &Path) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }

    let sibling = data_dir
        .parent()
        .map(|p| p.join(MODEL_FILENAME))
        .unwrap_or_else(|| PathBuf::from(MODEL_FILENAME));
    if sibling.is_file() {
        return sibling;
    }

    let inside = data_dir.join(MODEL_FILENAME);
    if inside.is_file() {
        return inside;
    }

    sibling
}
