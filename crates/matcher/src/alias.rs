//! Logical fields and the header spellings accepted for each.

use crate::normalize::normalize_text;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which input a column lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRole {
    /// The lookup source holding names and their document IDs
    Reference,
    /// The sheet whose document column gets filled
    Target,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Reference => f.write_str("reference table"),
            TableRole::Target => f.write_str("target table"),
        }
    }
}

/// A column the matcher needs, independent of how the header is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    /// Company/person name in the reference table
    EntityName,
    /// CPF/CNPJ in the reference table
    DocumentId,
    /// Name to look up in the target table
    PersonName,
    /// Column of the target table that receives the document
    DocumentTarget,
}

impl LogicalField {
    /// All fields, reference fields first
    pub const ALL: [LogicalField; 4] = [
        LogicalField::EntityName,
        LogicalField::DocumentId,
        LogicalField::PersonName,
        LogicalField::DocumentTarget,
    ];

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LogicalField::EntityName => "Entity Name",
            LogicalField::DocumentId => "Document ID",
            LogicalField::PersonName => "Person Name",
            LogicalField::DocumentTarget => "Document Target",
        }
    }

    /// The table this field is resolved against
    #[must_use]
    pub fn table(self) -> TableRole {
        match self {
            LogicalField::EntityName | LogicalField::DocumentId => TableRole::Reference,
            LogicalField::PersonName | LogicalField::DocumentTarget => TableRole::Target,
        }
    }

    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            LogicalField::EntityName => &["Razão Social", "Razao Social", "Nome"],
            LogicalField::DocumentId => &["CPF/CNPJ", "Cpf/Cnpj", "CPF_CNPJ", "Documento"],
            LogicalField::PersonName => &["Nome da Pessoa"],
            LogicalField::DocumentTarget => &["CPF"],
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Find the header matching the first alias that is present.
///
/// Headers and aliases are compared after [`normalize_text`]. When two headers
/// normalize to the same key the later header wins. Headers that normalize to
/// nothing never match.
#[must_use]
pub fn resolve_column<S: AsRef<str>>(headers: &[String], aliases: &[S]) -> Option<usize> {
    let by_key: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_text(h), i))
        .filter(|(key, _)| !key.is_empty())
        .collect();

    aliases
        .iter()
        .find_map(|alias| by_key.get(&normalize_text(alias.as_ref())).copied())
}

/// Accepted header spellings per logical field, tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    aliases: IndexMap<LogicalField, Vec<String>>,
}

impl AliasTable {
    /// A table with no aliases at all; nothing resolves until fields are set
    #[must_use]
    pub fn empty() -> Self {
        AliasTable {
            aliases: LogicalField::ALL.iter().map(|f| (*f, Vec::new())).collect(),
        }
    }

    /// Aliases for a field
    #[must_use]
    pub fn aliases(&self, field: LogicalField) -> &[String] {
        self.aliases.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Append aliases to a field, after the existing ones. Duplicates
    /// (after normalization) are skipped.
    pub fn extend<I, S>(&mut self, field: LogicalField, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.aliases.entry(field).or_default();
        for alias in extra {
            let alias = alias.into();
            let key = normalize_text(&alias);
            if !list.iter().any(|a| normalize_text(a) == key) {
                list.push(alias);
            }
        }
    }

    /// Replace every alias of a field
    pub fn replace<I, S>(&mut self, field: LogicalField, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.insert(field, Vec::new());
        self.extend(field, aliases);
    }

    /// Resolve a field against a header row
    #[must_use]
    pub fn resolve(&self, field: LogicalField, headers: &[String]) -> Option<usize> {
        resolve_column(headers, self.aliases(field))
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        AliasTable {
            aliases: LogicalField::ALL
                .iter()
                .map(|f| {
                    let list = f.default_aliases().iter().map(|a| (*a).to_string()).collect();
                    (*f, list)
                })
                .collect(),
        }
    }
}
