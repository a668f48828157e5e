//! Symptom selection to feature vector encoding.

use crate::catalog::{SymptomCatalog, SYMPTOM_COUNT};

/// Fixed-width binary vector, one slot per symptom in catalog order.
///
/// `1` means the symptom was reported. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector([u8; SYMPTOM_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        SYMPTOM_COUNT
    }

    pub fn is_empty(&self) -> bool {
        SYMPTOM_COUNT == 0
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.0.get(index).copied() == Some(1)
    }

    /// Number of reported symptoms.
    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|v| **v == 1).count()
    }

    /// Identifiers of the reported symptoms, in catalog order.
    pub fn reported_symptoms(&self) -> Vec<&'static str> {
        let catalog = SymptomCatalog::get();
        self.0
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1)
            .filter_map(|(i, _)| catalog.id_at(i))
            .collect()
    }
}

/// Turns a set of symptom identifiers into a [`FeatureVector`].
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder {
    catalog: &'static SymptomCatalog,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEncoder {
    pub fn new() -> Self {
        Self {
            catalog: SymptomCatalog::get(),
        }
    }

    /// Sets the slot for every recognised identifier.
    ///
    /// Identifiers outside the vocabulary are skipped without error, and duplicates
    /// have no extra effect. An empty selection yields an all-zero vector.
    pub fn encode<I, S>(&self, selected: I) -> FeatureVector
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = [0u8; SYMPTOM_COUNT];
        for symptom in selected {
            let symptom = symptom.as_ref();
            match self.catalog.index_of(symptom) {
                Some(i) => values[i] = 1,
                None => tracing::debug!(symptom, "ignoring unrecognised symptom"),
            }
        }
        FeatureVector(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sets_catalog_positions() {
        let encoder = FeatureEncoder::new();
        let selected = ["itching", "skin_rash", "nodal_skin_eruptions", "yellow_crust_ooze"];
        let v = encoder.encode(selected);

        assert_eq!(v.len(), SYMPTOM_COUNT);
        assert_eq!(v.count_ones(), selected.len());
        for s in selected {
            let i = SymptomCatalog::get().index_of(s).unwrap();
            assert!(v.is_set(i));
        }
        assert_eq!(
            v.as_slice().iter().filter(|x| **x == 0).count(),
            SYMPTOM_COUNT - selected.len()
        );
    }

    #[test]
    fn test_encode_every_single_symptom() {
        let encoder = FeatureEncoder::new();
        for (i, id) in SymptomCatalog::get().iter() {
            let v = encoder.encode([id]);
            assert_eq!(v.count_ones(), 1);
            assert!(v.is_set(i));
        }
    }

    #[test]
    fn test_encode_ignores_unknown_identifiers() {
        let encoder = FeatureEncoder::new();
        let known = encoder.encode(["cough", "headache"]);
        let with_unknown = encoder.encode(["cough", "not_a_symptom", "headache", "Cough"]);
        assert_eq!(known, with_unknown);
    }

    #[test]
    fn test_encode_empty_selection_is_all_zero() {
        let v = FeatureEncoder::new().encode(Vec::<String>::new());
        assert_eq!(v.count_ones(), 0);
        assert!(v.reported_symptoms().is_empty());
    }

    #[test]
    fn test_encode_duplicates_are_idempotent() {
        let encoder = FeatureEncoder::new();
        let v = encoder.encode(["cough", "cough", "cough"]);
        assert_eq!(v.count_ones(), 1);
    }

    #[test]
    fn test_reported_symptoms_in_catalog_order() {
        let v = FeatureEncoder::new().encode(["headache", "itching", "cough"]);
        assert_eq!(v.reported_symptoms(), vec!["itching", "cough", "headache"]);
    }
}
