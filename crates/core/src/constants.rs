//! Constants used throughout the NeuralCare core crate.
//!
//! File names and fixed text live here so hosts and tests agree on them.

/// Default directory holding the reference tables, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Filename of the classifier artifact.
pub const MODEL_FILENAME: &str = "model.json";

/// Filename for the condition description table.
pub const DESCRIPTION_CSV: &str = "description.csv";

/// Filename for the precautions table.
pub const PRECAUTIONS_CSV: &str = "precautions_df.csv";

/// Filename for the medications table.
pub const MEDICATIONS_CSV: &str = "medications.csv";

/// Filename for the diet table.
pub const DIETS_CSV: &str = "diets.csv";

/// Filename for the workout table.
pub const WORKOUT_CSV: &str = "workout_df.csv";

/// Key column name; the workout table uses the lower-case variant.
pub const KEY_COLUMN: &str = "Disease";
pub const KEY_COLUMN_LOWER: &str = "disease";

/// Shown with every rendered diagnosis.
pub const DISCLAIMER: &str = "DISCLAIMER: This application is for informational purposes only. \
It does not replace professional medical advice, diagnosis, or treatment. \
Always consult with a qualified healthcare provider for medical concerns.";
