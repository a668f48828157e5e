//! Symptom vocabulary.
//!
//! The position of each identifier in [`SYMPTOMS`] is its feature-vector index.
//! The order must match the column order the classifier artifact was trained on.
//! Several identifiers carry stray spaces or punctuation from the training data
//! (`spotting_ urination`, `foul_smell_of urine`, `fluid_overload.1`); they are
//! part of the vocabulary and are kept verbatim.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Number of entries in the symptom vocabulary, and the feature vector width.
pub const SYMPTOM_COUNT: usize = 132;

static SYMPTOMS: [&str; SYMPTOM_COUNT] = [
    "itching",
    "skin_rash",
    "nodal_skin_eruptions",
    "continuous_sneezing",
    "shivering",
    "chills",
    "joint_pain",
    "stomach_pain",
    "acidity",
    "ulcers_on_tongue",
    "muscle_wasting",
    "vomiting",
    "burning_micturition",
    "spotting_ urination",
    "fatigue",
    "weight_gain",
    "anxiety",
    "cold_hands_and_feets",
    "mood_swings",
    "weight_loss",
    "restlessness",
    "lethargy",
    "patches_in_throat",
    "irregular_sugar_level",
    "cough",
    "high_fever",
    "sunken_eyes",
    "breathlessness",
    "sweating",
    "dehydration",
    "indigestion",
    "headache",
    "yellowish_skin",
    "dark_urine",
    "nausea",
    "loss_of_appetite",
    "pain_behind_the_eyes",
    "back_pain",
    "constipation",
    "abdominal_pain",
    "diarrhoea",
    "mild_fever",
    "yellow_urine",
    "yellowing_of_eyes",
    "acute_liver_failure",
    "fluid_overload",
    "swelling_of_stomach",
    "swelled_lymph_nodes",
    "malaise",
    "blurred_and_distorted_vision",
    "phlegm",
    "throat_irritation",
    "redness_of_eyes",
    "sinus_pressure",
    "runny_nose",
    "congestion",
    "chest_pain",
    "weakness_in_limbs",
    "fast_heart_rate",
    "pain_during_bowel_movements",
    "pain_in_anal_region",
    "bloody_stool",
    "irritation_in_anus",
    "neck_pain",
    "dizziness",
    "cramps",
    "bruising",
    "obesity",
    "swollen_legs",
    "swollen_blood_vessels",
    "puffy_face_and_eyes",
    "enlarged_thyroid",
    "brittle_nails",
    "swollen_extremeties",
    "excessive_hunger",
    "extra_marital_contacts",
    "drying_and_tingling_lips",
    "slurred_speech",
    "knee_pain",
    "hip_joint_pain",
    "muscle_weakness",
    "stiff_neck",
    "swelling_joints",
    "movement_stiffness",
    "spinning_movements",
    "loss_of_balance",
    "unsteadiness",
    "weakness_of_one_body_side",
    "loss_of_smell",
    "bladder_discomfort",
    "foul_smell_of urine",
    "continuous_feel_of_urine",
    "passage_of_gases",
    "internal_itching",
    "toxic_look_(typhos)",
    "depression",
    "irritability",
    "muscle_pain",
    "altered_sensorium",
    "red_spots_over_body",
    "belly_pain",
    "abnormal_menstruation",
    "dischromic _patches",
    "watering_from_eyes",
    "increased_appetite",
    "polyuria",
    "family_history",
    "mucoid_sputum",
    "rusty_sputum",
    "lack_of_concentration",
    "visual_disturbances",
    "receiving_blood_transfusion",
    "receiving_unsterile_injections",
    "coma",
    "stomach_bleeding",
    "distention_of_abdomen",
    "history_of_alcohol_consumption",
    "fluid_overload.1",
    "blood_in_sputum",
    "prominent_veins_on_calf",
    "palpitations",
    "painful_walking",
    "pus_filled_pimples",
    "blackheads",
    "scurring",
    "skin_peeling",
    "silver_like_dusting",
    "small_dents_in_nails",
    "inflammatory_nails",
    "blister",
    "red_sore_around_nose",
    "yellow_crust_ooze",
];

static CATALOG: LazyLock<SymptomCatalog> = LazyLock::new(|| SymptomCatalog {
    index: SYMPTOMS.iter().enumerate().map(|(i, s)| (*s, i)).collect(),
});

/// Immutable lookup over the symptom vocabulary.
#[derive(Debug)]
pub struct SymptomCatalog {
    index: HashMap<&'static str, usize>,
}

impl SymptomCatalog {
    /// Returns the process-wide catalog.
    pub fn get() -> &'static SymptomCatalog {
        &CATALOG
    }

    pub fn len(&self) -> usize {
        SYMPTOM_COUNT
    }

    pub fn is_empty(&self) -> bool {
        SYMPTOM_COUNT == 0
    }

    /// Feature-vector position of `symptom_id`, or `None` if it is not in the vocabulary.
    pub fn index_of(&self, symptom_id: &str) -> Option<usize> {
        self.index.get(symptom_id).copied()
    }

    pub fn contains(&self, symptom_id: &str) -> bool {
        self.index.contains_key(symptom_id)
    }

    pub fn id_at(&self, index: usize) -> Option<&'static str> {
        SYMPTOMS.get(index).copied()
    }

    /// All identifiers in feature-vector order.
    pub fn ids(&self) -> &'static [&'static str] {
        &SYMPTOMS
    }

    /// `(index, id)` pairs in feature-vector order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> {
        SYMPTOMS.iter().copied().enumerate()
    }

    /// Identifiers in alphabetical order, for listing in a picker.
    pub fn sorted(&self) -> Vec<&'static str> {
        let mut ids = SYMPTOMS.to_vec();
        ids.sort_unstable();
        ids
    }

    /// Identifiers whose readable form contains `query`, case-insensitively.
    ///
    /// Underscores are treated as spaces on both sides, so `"skin rash"` and
    /// `"skin_rash"` both match `skin_rash`. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&'static str> {
        let needle = query.trim().replace('_', " ").to_lowercase();
        SYMPTOMS
            .iter()
            .copied()
            .filter(|id| id.replace('_', " ").to_lowercase().contains(&needle))
            .collect()
    }

    /// Human-readable label: underscores become spaces and each word is capitalised.
    ///
    /// `skin_rash` becomes `Skin Rash`, `toxic_look_(typhos)` becomes `Toxic Look (Typhos)`.
    pub fn display_label(symptom_id: &str) -> String {
        let mut out = String::with_capacity(symptom_id.len());
        let mut prev_alpha = false;
        for ch in symptom_id.chars() {
            let ch = if ch == '_' { ' ' } else { ch };
            if ch.is_alphabetic() {
                if prev_alpha {
                    out.extend(ch.to_lowercase());
                } else {
                    out.extend(ch.to_uppercase());
                }
                prev_alpha = true;
            } else {
                out.push(ch);
                prev_alpha = false;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_injective() {
        let catalog = SymptomCatalog::get();
        let unique: HashSet<_> = catalog.ids().iter().collect();
        assert_eq!(unique.len(), SYMPTOM_COUNT);
        for (i, id) in catalog.iter() {
            assert_eq!(catalog.index_of(id), Some(i));
        }
    }

    #[test]
    fn test_known_positions() {
        let catalog = SymptomCatalog::get();
        assert_eq!(catalog.index_of("itching"), Some(0));
        assert_eq!(catalog.index_of("skin_rash"), Some(1));
        assert_eq!(catalog.index_of("nodal_skin_eruptions"), Some(2));
        assert_eq!(catalog.index_of("fluid_overload.1"), Some(117));
        assert_eq!(catalog.index_of("yellow_crust_ooze"), Some(131));
    }

    #[test]
    fn test_identifiers_are_exact() {
        let catalog = SymptomCatalog::get();
        assert_eq!(catalog.index_of("spotting_ urination"), Some(13));
        assert_eq!(catalog.index_of("spotting_urination"), None);
        assert_eq!(catalog.index_of("Itching"), None);
    }

    #[test]
    fn test_search_matches_readable_form() {
        let catalog = SymptomCatalog::get();
        let hits = catalog.search("Skin Rash");
        assert_eq!(hits, vec!["skin_rash"]);

        let hits = catalog.search("sputum");
        assert_eq!(hits, vec!["mucoid_sputum", "rusty_sputum", "blood_in_sputum"]);

        assert_eq!(catalog.search("").len(), SYMPTOM_COUNT);
    }

    #[test]
    fn test_sorted_is_alphabetical() {
        let sorted = SymptomCatalog::get().sorted();
        assert_eq!(sorted.len(), SYMPTOM_COUNT);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_display_label() {
        assert_eq!(SymptomCatalog::display_label("skin_rash"), "Skin Rash");
        assert_eq!(
            SymptomCatalog::display_label("toxic_look_(typhos)"),
            "Toxic Look (Typhos)"
        );
        assert_eq!(
            SymptomCatalog::display_label("foul_smell_of urine"),
            "Foul Smell Of Urine"
        );
    }
}
