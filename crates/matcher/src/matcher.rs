//! Name-to-document lookup and fill.

use crate::alias::{AliasTable, LogicalField, TableRole};
use crate::error::{MatchError, MatchResult, MissingField};
use crate::normalize::normalize_text;
use docfill_sheet::{CellValue, Sheet};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do when the reference table lists the same name twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later row overwrites the earlier one
    #[default]
    LastWins,
    /// The first row is kept
    FirstWins,
}

/// How names are compared when looking up documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    /// Names must be identical text
    #[default]
    Exact,
    /// Names are compared after header-style normalization (case, accents,
    /// punctuation and spacing ignored)
    Normalized,
}

impl KeyMode {
    fn key(self, text: &str) -> String {
        match self {
            KeyMode::Exact => text.to_string(),
            KeyMode::Normalized => normalize_text(text),
        }
    }
}

/// Options for [`RecordMatcher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub duplicate_policy: DuplicatePolicy,
    pub key_mode: KeyMode,
}

/// Column indices resolved for the four logical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub entity_name: usize,
    pub document_id: usize,
    pub person_name: usize,
    pub document_target: usize,
}

/// Header names actually used for each logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnNames {
    pub entity_name: String,
    pub document_id: String,
    pub person_name: String,
    pub document_target: String,
}

/// Summary of a fill run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub columns: ColumnNames,
    /// Rows in the reference table
    pub reference_rows: usize,
    /// Distinct lookup keys built from the reference table
    pub distinct_names: usize,
    /// Reference names that appeared more than once
    pub duplicate_names: Vec<String>,
    /// Rows in the target table
    pub target_rows: usize,
    /// Target rows that received a document
    pub matched: usize,
    /// 0-based data-row indices of target rows left without a document
    pub unmatched_rows: Vec<usize>,
}

impl MatchReport {
    /// Number of target rows left empty
    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.unmatched_rows.len()
    }
}

/// The filled target sheet and what happened while filling it.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub sheet: Sheet,
    pub report: MatchReport,
}

/// Lookup table from name key to document text.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    entries: HashMap<String, String>,
    duplicates: IndexSet<String>,
}

impl DocumentIndex {
    /// Look up a document by name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of distinct names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no names were indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names seen more than once, in first-repeat order
    #[must_use]
    pub fn duplicates(&self) -> &IndexSet<String> {
        &self.duplicates
    }
}

/// Fills the target's document column from the reference table.
#[derive(Debug, Clone, Default)]
pub struct RecordMatcher {
    aliases: AliasTable,
    options: MatchOptions,
}

impl RecordMatcher {
    /// Create a matcher with the given aliases and options
    #[must_use]
    pub fn new(aliases: AliasTable, options: MatchOptions) -> Self {
        RecordMatcher { aliases, options }
    }

    /// The options in use
    #[must_use]
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Resolve all four logical fields, reporting every one that is missing.
    pub fn resolve(&self, reference: &Sheet, target: &Sheet) -> MatchResult<ResolvedColumns> {
        let mut missing = Vec::new();
        let mut lookup = |field: LogicalField| {
            let sheet = match field.table() {
                TableRole::Reference => reference,
                TableRole::Target => target,
            };
            let found = self.aliases.resolve(field, sheet.column_names());
            if found.is_none() {
                missing.push(MissingField {
                    table: field.table(),
                    field,
                });
            }
            found.unwrap_or_default()
        };

        let resolved = ResolvedColumns {
            entity_name: lookup(LogicalField::EntityName),
            document_id: lookup(LogicalField::DocumentId),
            person_name: lookup(LogicalField::PersonName),
            document_target: lookup(LogicalField::DocumentTarget),
        };

        if !missing.is_empty() {
            tracing::debug!(?missing, "column resolution failed");
            return Err(MatchError::MissingColumns(missing));
        }

        tracing::debug!(?resolved, "resolved columns");
        Ok(resolved)
    }

    /// Build the name → document index from the reference table.
    ///
    /// Rows with an empty name are skipped. Repeated names follow the
    /// configured [`DuplicatePolicy`].
    #[must_use]
    pub fn build_index(&self, reference: &Sheet, entity_col: usize, document_col: usize) -> DocumentIndex {
        let mut index = DocumentIndex::default();

        for row in reference.rows() {
            let name = row.get(entity_col).map(CellValue::to_text).unwrap_or_default();
            let key = self.options.key_mode.key(&name);
            if key.is_empty() {
                continue;
            }
            let document = row.get(document_col).map(CellValue::to_text).unwrap_or_default();

            if index.entries.contains_key(&key) {
                index.duplicates.insert(name);
                if self.options.duplicate_policy == DuplicatePolicy::FirstWins {
                    continue;
                }
            }
            index.entries.insert(key, document);
        }

        if !index.duplicates.is_empty() {
            tracing::warn!(
                count = index.duplicates.len(),
                policy = ?self.options.duplicate_policy,
                "reference table has repeated names"
            );
        }

        index
    }

    /// Fill the target's document column.
    ///
    /// Every target row keeps its position and every other column is left
    /// untouched. Rows whose name is not in the reference get an empty
    /// document. The reference is only read.
    pub fn fill(&self, reference: &Sheet, mut target: Sheet) -> MatchResult<MatchOutcome> {
        let cols = self.resolve(reference, &target)?;
        let index = self.build_index(reference, cols.entity_name, cols.document_id);

        let mut documents = Vec::with_capacity(target.row_count());
        let mut unmatched_rows = Vec::new();

        for (i, row) in target.rows().enumerate() {
            let name = row.get(cols.person_name).map(CellValue::to_text).unwrap_or_default();
            let key = self.options.key_mode.key(&name);
            let found = if key.is_empty() { None } else { index.get(&key) };

            match found {
                Some(document) => documents.push(CellValue::String(document.to_string())),
                None => {
                    unmatched_rows.push(i);
                    documents.push(CellValue::String(String::new()));
                }
            }
        }

        target.column_update(cols.document_target, documents)?;

        let report = MatchReport {
            columns: ColumnNames {
                entity_name: reference.column_names()[cols.entity_name].clone(),
                document_id: reference.column_names()[cols.document_id].clone(),
                person_name: target.column_names()[cols.person_name].clone(),
                document_target: target.column_names()[cols.document_target].clone(),
            },
            reference_rows: reference.row_count(),
            distinct_names: index.len(),
            duplicate_names: index.duplicates.into_iter().collect(),
            target_rows: target.row_count(),
            matched: target.row_count() - unmatched_rows.len(),
            unmatched_rows,
        };

        tracing::info!(
            target_rows = report.target_rows,
            matched = report.matched,
            unmatched = report.unmatched(),
            "filled document column"
        );

        Ok(MatchOutcome { sheet: target, report })
    }
}

/// Fill with the default aliases and options.
pub fn fill_documents(reference: &Sheet, target: Sheet) -> MatchResult<MatchOutcome> {
    RecordMatcher::default().fill(reference, target)
}
