//! Read-only reference tables and their lookup rules.
//!
//! Each of the five tables is loaded independently. A table that cannot be loaded is
//! kept in an unavailable state: lookups against it return that table's sentinel and
//! the other tables are unaffected.
//!
//! Lookups join on the condition name by exact string match. Names are not trimmed or
//! case-folded, because the catalog and the tables share the same (sometimes untidy)
//! spelling.

mod cell;
mod table;

pub use table::{ReferenceTable, TableKind};

use crate::catalog::ConditionCatalog;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone)]
enum TableState {
    Ready(ReferenceTable),
    Unavailable { reason: String },
}

/// The five reference tables, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    tables: HashMap<TableKind, TableState>,
}

impl ReferenceStore {
    /// Loads every table from `data_dir`.
    ///
    /// Never fails as a whole: a table that cannot be read is logged and marked
    /// unavailable.
    pub fn load(data_dir: &Path) -> Self {
        let tables = TableKind::ALL
            .into_iter()
            .map(|kind| {
                let path = data_dir.join(kind.file_name());
                let state = match ReferenceTable::load(kind, &path) {
                    Ok(table) => {
                        tracing::info!(table = %kind, rows = table.len(), "loaded reference table");
                        TableState::Ready(table)
                    }
                    Err(e) => {
                        tracing::warn!(table = %kind, "reference table unavailable: {}", e);
                        TableState::Unavailable {
                            reason: e.to_string(),
                        }
                    }
                };
                (kind, state)
            })
            .collect();

        Self { tables }
    }

    /// Builds a store from already loaded tables; kinds not supplied are unavailable.
    pub fn from_tables(tables: impl IntoIterator<Item = ReferenceTable>) -> Self {
        let mut map: HashMap<TableKind, TableState> = TableKind::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind,
                    TableState::Unavailable {
                        reason: "not loaded".into(),
                    },
                )
            })
            .collect();
        for table in tables {
            map.insert(table.kind(), TableState::Ready(table));
        }
        Self { tables: map }
    }

    pub fn table(&self, kind: TableKind) -> Option<&ReferenceTable> {
        match self.tables.get(&kind) {
            Some(TableState::Ready(table)) => Some(table),
            _ => None,
        }
    }

    pub fn is_available(&self, kind: TableKind) -> bool {
        self.table(kind).is_some()
    }

    /// Entries for `condition_name` in `kind`, never empty.
    ///
    /// Returns the one-element sentinel when the table is unavailable, has no row for
    /// the name, or the matching row has no usable cells.
    pub fn lookup(&self, kind: TableKind, condition_name: &str) -> Vec<String> {
        let entries = match self.tables.get(&kind) {
            Some(TableState::Ready(table)) => table.entries(condition_name),
            Some(TableState::Unavailable { reason }) => {
                tracing::debug!(table = %kind, reason = %reason, "lookup against unavailable table");
                None
            }
            None => None,
        };

        match entries {
            Some(entries) if !entries.is_empty() => entries.to_vec(),
            _ => vec![kind.sentinel().to_string()],
        }
    }

    pub fn description(&self, condition_name: &str) -> String {
        // Description has a single value column, so the first entry is the whole text.
        self.lookup(TableKind::Description, condition_name)
            .into_iter()
            .next()
            .unwrap_or_else(|| TableKind::Description.sentinel().to_string())
    }

    pub fn precautions(&self, condition_name: &str) -> Vec<String> {
        self.lookup(TableKind::Precautions, condition_name)
    }

    pub fn medications(&self, condition_name: &str) -> Vec<String> {
        self.lookup(TableKind::Medications, condition_name)
    }

    pub fn diet(&self, condition_name: &str) -> Vec<String> {
        self.lookup(TableKind::Diet, condition_name)
    }

    pub fn workout(&self, condition_name: &str) -> Vec<String> {
        self.lookup(TableKind::Workout, condition_name)
    }

    /// Cross-checks every catalog condition against every table.
    pub fn consistency_report(&self, catalog: &ConditionCatalog) -> ConsistencyReport {
        let mut report = ConsistencyReport::default();
        for kind in TableKind::ALL {
            match self.tables.get(&kind) {
                Some(TableState::Ready(table)) => {
                    let missing: Vec<String> = catalog
                        .names()
                        .iter()
                        .filter(|name| !table.contains(name))
                        .map(|name| (*name).to_string())
                        .collect();
                    if !missing.is_empty() {
                        report.gaps.push(TableGap {
                            table: kind,
                            missing,
                        });
                    }
                }
                Some(TableState::Unavailable { reason }) => {
                    report.unavailable.push((kind, reason.clone()));
                }
                None => report.unavailable.push((kind, "not loaded".into())),
            }
        }
        report
    }
}

/// Conditions with no exact-match row in a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGap {
    pub table: TableKind,
    pub missing: Vec<String>,
}

/// Result of [`ReferenceStore::consistency_report`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsistencyReport {
    pub gaps: Vec<TableGap>,
    pub unavailable: Vec<(TableKind, String)>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty() && self.unavailable.is_empty()
    }

    /// Emits one warning per problem.
    pub fn log(&self) {
        for (table, reason) in &self.unavailable {
            tracing::warn!(table = %table, "reference table unavailable: {}", reason);
        }
        for gap in &self.gaps {
            for name in &gap.missing {
                tracing::warn!(table = %gap.table, condition = ?name, "no reference row for condition");
            }
        }
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "all reference tables cover every condition");
        }
        for (table, reason) in &self.unavailable {
            writeln!(f, "{table}: unavailable ({reason})")?;
        }
        for gap in &self.gaps {
            writeln!(f, "{}: {} condition(s) without a row", gap.table, gap.missing.len())?;
            for name in &gap.missing {
                writeln!(f, "  {name:?}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn medications_table() -> ReferenceTable {
        let csv = "Disease,Medication\n\
Fungal infection,\"['Antifungal Cream', 'Fluconazole', 'Terbinafine', 'Clotrimazole', 'Ketoconazole']\"\n\
GERD,nan\n";
        ReferenceTable::from_reader(TableKind::Medications, csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_lookup_splices_list_cells() {
        let store = ReferenceStore::from_tables([medications_table()]);
        let meds = store.medications("Fungal infection");
        assert_eq!(meds.len(), 5);
        assert_eq!(meds[0], "Antifungal Cream");
        assert_eq!(meds[4], "Ketoconazole");
    }

    #[test]
    fn test_lookup_missing_row_returns_sentinel() {
        let store = ReferenceStore::from_tables([medications_table()]);
        assert_eq!(
            store.medications("Malaria"),
            vec!["No medication information available."]
        );
    }

    #[test]
    fn test_lookup_blank_row_returns_sentinel() {
        let store = ReferenceStore::from_tables([medications_table()]);
        assert_eq!(
            store.medications("GERD"),
            vec!["No medication information available."]
        );
    }

    #[test]
    fn test_unavailable_table_degrades_only_itself() {
        let store = ReferenceStore::from_tables([medications_table()]);
        assert!(!store.is_available(TableKind::Diet));
        assert_eq!(
            store.diet("Fungal infection"),
            vec!["No diet information available."]
        );
        assert_eq!(store.description("Fungal infection"), "No description available.");
        assert_eq!(store.medications("Fungal infection").len(), 5);
    }

    #[test]
    fn test_load_from_directory_with_missing_and_broken_tables() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(TableKind::Description.file_name()),
            "Disease,Description\nAllergy,An immune response.\n",
        )
        .unwrap();
        // Wrong header: the precautions table is unusable.
        fs::write(
            temp.path().join(TableKind::Precautions.file_name()),
            "Disease,Something\nAllergy,x\n",
        )
        .unwrap();

        let store = ReferenceStore::load(temp.path());
        assert!(store.is_available(TableKind::Description));
        assert!(!store.is_available(TableKind::Precautions));
        assert!(!store.is_available(TableKind::Workout));

        assert_eq!(store.description("Allergy"), "An immune response.");
        assert_eq!(store.precautions("Allergy"), vec!["No precautions available."]);
    }

    #[test]
    fn test_consistency_report_lists_gaps() {
        let store = ReferenceStore::from_tables([medications_table()]);
        let report = store.consistency_report(ConditionCatalog::get());

        assert!(!report.is_clean());
        assert_eq!(report.unavailable.len(), 4);
        assert_eq!(report.gaps.len(), 1);
        let gap = &report.gaps[0];
        assert_eq!(gap.table, TableKind::Medications);
        assert!(gap.missing.contains(&"Diabetes ".to_string()));
        assert!(!gap.missing.contains(&"Fungal infection".to_string()));
        assert!(!gap.missing.contains(&"GERD".to_string()));
    }

    #[test]
    fn test_lookup_is_repeatable() {
        let store = ReferenceStore::from_tables([medications_table()]);
        assert_eq!(
            store.medications("Fungal infection"),
            store.medications("Fungal infection")
        );
    }
}
