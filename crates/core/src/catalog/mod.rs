//! Static vocabularies shared by the encoder and the engine.

pub mod conditions;
pub mod symptoms;

pub use conditions::{ConditionCatalog, ConditionCode, CONDITION_COUNT};
pub use symptoms::{SymptomCatalog, SYMPTOM_COUNT};
