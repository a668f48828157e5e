//! Condition vocabulary.
//!
//! Maps classifier output labels to condition names. Names are joined against
//! the reference tables by exact string match, so the trailing spaces on
//! `"Diabetes "` and `"Hypertension "` and the double space inside the vertigo
//! entry are intentional and must not be normalised.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Number of labels the classifier can produce.
pub const CONDITION_COUNT: usize = 41;

/// Condition names indexed by classifier label.
static CONDITIONS: [&str; CONDITION_COUNT] = [
    "(vertigo) Paroymsal  Positional Vertigo",
    "AIDS",
    "Acne",
    "Alcoholic hepatitis",
    "Allergy",
    "Arthritis",
    "Bronchial Asthma",
    "Cervical spondylosis",
    "Chicken pox",
    "Chronic cholestasis",
    "Common Cold",
    "Dengue",
    "Diabetes ",
    "Dimorphic hemmorhoids(piles)",
    "Drug Reaction",
    "Fungal infection",
    "GERD",
    "Gastroenteritis",
    "Heart attack",
    "Hepatitis B",
    "Hepatitis C",
    "Hepatitis D",
    "Hepatitis E",
    "Hypertension ",
    "Hyperthyroidism",
    "Hypoglycemia",
    "Hypothyroidism",
    "Impetigo",
    "Jaundice",
    "Malaria",
    "Migraine",
    "Osteoarthristis",
    "Paralysis (brain hemorrhage)",
    "Peptic ulcer diseae",
    "Pneumonia",
    "Psoriasis",
    "Tuberculosis",
    "Typhoid",
    "Urinary tract infection",
    "Varicose veins",
    "hepatitis A",];

static CATALOG: LazyLock<ConditionCatalog> = LazyLock::new(|| ConditionCatalog {
    by_name: CONDITIONS
        .iter()
        .enumerate()
        .map(|(code, name)| (*name, ConditionCode(code as i64)))
        .collect(),
});

/// A classifier output label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCode(pub i64);

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable lookup over the condition vocabulary.
#[derive(Debug)]
pub struct ConditionCatalog {
    by_name: HashMap<&'static str, ConditionCode>,
}

impl ConditionCatalog {
    /// Returns the process-wide catalog.
    pub fn get() -> &'static ConditionCatalog {
        &CATALOG
    }

    pub fn len(&self) -> usize {
        CONDITION_COUNT
    }

    pub fn is_empty(&self) -> bool {
        CONDITION_COUNT == 0
    }

    /// Name for `code`, or `None` when the label is outside the vocabulary.
    pub fn name_of(&self, code: ConditionCode) -> Option<&'static str> {
        usize::try_from(code.0)
            .ok()
            .and_then(|i| CONDITIONS.get(i))
            .copied()
    }

    /// Label for an exact condition name.
    pub fn code_of(&self, name: &str) -> Option<ConditionCode> {
        self.by_name.get(name).copied()
    }

    /// `(code, name)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (ConditionCode, &'static str)> {
        CONDITIONS
            .iter()
            .enumerate()
            .map(|(i, name)| (ConditionCode(i as i64), *name))
    }

    pub fn names(&self) -> &'static [&'static str] {
        &CONDITIONS
    }
}
