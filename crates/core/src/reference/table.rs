//! A single reference table loaded from CSV.

use super::cell::normalise_cell;
use crate::constants::{
    DESCRIPTION_CSV, DIETS_CSV, KEY_COLUMN, KEY_COLUMN_LOWER, MEDICATIONS_CSV, PRECAUTIONS_CSV,
    WORKOUT_CSV,
};
use crate::{LoadError, LoadResult};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// The five reference tables keyed by condition name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Description,
    Precautions,
    Medications,
    Diet,
    Workout,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Description,
        TableKind::Precautions,
        TableKind::Medications,
        TableKind::Diet,
        TableKind::Workout,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::Description => DESCRIPTION_CSV,
            TableKind::Precautions => PRECAUTIONS_CSV,
            TableKind::Medications => MEDICATIONS_CSV,
            TableKind::Diet => DIETS_CSV,
            TableKind::Workout => WORKOUT_CSV,
        }
    }

    /// Value columns, in output order.
    pub fn value_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Description => &["Description"],
            TableKind::Precautions => &["Precaution_1", "Precaution_2", "Precaution_3", "Precaution_4"],
            TableKind::Medications => &["Medication"],
            TableKind::Diet => &["Diet"],
            TableKind::Workout => &["workout"],
        }
    }

    /// Placeholder returned when the table has nothing for a condition.
    pub fn sentinel(self) -> &'static str {
        match self {
            TableKind::Description => "No description available.",
            TableKind::Precautions => "No precautions available.",
            TableKind::Medications => "No medication information available.",
            TableKind::Diet => "No diet information available.",
            TableKind::Workout => "No workout information available.",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TableKind::Description => "description",
            TableKind::Precautions => "precautions",
            TableKind::Medications => "medications",
            TableKind::Diet => "diet",
            TableKind::Workout => "workout",
        };
        f.write_str(s)
    }
}

/// Rows of one table, normalised at load time.
///
/// Only the first row for each condition name is kept; later duplicates are ignored.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    kind: TableKind,
    rows: HashMap<String, Vec<String>>,
}

impl ReferenceTable {
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Normalised entries of the first row keyed by exactly `condition_name`.
    ///
    /// `None` when no row matches. An empty slice means the row exists but all of its
    /// cells were blank.
    pub fn entries(&self, condition_name: &str) -> Option<&[String]> {
        self.rows.get(condition_name).map(Vec::as_slice)
    }

    pub fn contains(&self, condition_name: &str) -> bool {
        self.rows.contains_key(condition_name)
    }

    /// Loads `kind` from a CSV file with a header row.
    pub fn load(kind: TableKind, path: &Path) -> LoadResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(kind, file).map_err(|e| match e {
            LoadError::Csv { source, .. } => LoadError::Csv {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Loads `kind` from any CSV source. Used directly by tests.
    pub fn from_reader(kind: TableKind, reader: impl std::io::Read) -> LoadResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let csv_err = |source: csv::Error| LoadError::Csv {
            path: kind.file_name().into(),
            source,
        };

        let headers = rdr.headers().map_err(csv_err)?.clone();
        let key_idx = headers
            .iter()
            .position(|h| h == KEY_COLUMN)
            .or_else(|| headers.iter().position(|h| h == KEY_COLUMN_LOWER))
            .ok_or(LoadError::MissingKeyColumn { table: kind })?;

        let value_idx = kind
            .value_columns()
            .iter()
            .map(|col| {
                headers
                    .iter()
                    .position(|h| h == *col)
                    .ok_or_else(|| LoadError::MissingColumn {
                        table: kind,
                        column: (*col).to_string(),
                    })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let mut rows = HashMap::new();
        for record in rdr.records() {
            let record = record.map_err(csv_err)?;
            let Some(key) = record.get(key_idx) else {
                continue;
            };
            if rows.contains_key(key) {
                continue;
            }
            let entries: Vec<String> = value_idx
                .iter()
                .flat_map(|i| normalise_cell(record.get(*i).unwrap_or("")))
                .collect();
            rows.insert(key.to_string(), entries);
        }

        Ok(Self { kind, rows })
    }
}
