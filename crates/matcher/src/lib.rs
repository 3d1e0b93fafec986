//! # docfill-matcher
//!
//! Fills the CPF/CNPJ column of a target sheet by looking up each row's name
//! in a reference sheet.
//!
//! Header names vary between exports ("Razão Social", "RAZAO SOCIAL",
//! "razao_social"), so columns are found through an [`AliasTable`]: each
//! logical field lists accepted spellings, compared after [`normalize_text`].
//!
//! ```
//! use docfill_matcher::fill_documents;
//! use docfill_sheet::Sheet;
//!
//! let reference = Sheet::from_rows(
//!     vec!["Razão Social", "CPF/CNPJ"],
//!     vec![vec!["Acme Ltda", "12.345.678/0001-99"]],
//! );
//! let target = Sheet::from_rows(
//!     vec!["Nome da Pessoa", "CPF"],
//!     vec![vec!["Acme Ltda", ""], vec!["Unknown Co", ""]],
//! );
//!
//! let outcome = fill_documents(&reference, target).unwrap();
//! assert_eq!(outcome.sheet.get(0, 1).unwrap().to_text(), "12.345.678/0001-99");
//! assert_eq!(outcome.sheet.get(1, 1).unwrap().to_text(), "");
//! assert_eq!(outcome.report.matched, 1);
//! ```

mod alias;
mod cache;
mod config;
mod error;
mod input;
mod matcher;
mod normalize;

pub use alias::{resolve_column, AliasTable, LogicalField, TableRole};
pub use cache::{CacheKey, CacheStats, ParseCache};
pub use config::{DocfillConfig, DEFAULT_CACHE_TTL_SECS};
pub use error::{MatchError, MatchResult, MissingField};
pub use input::load_input;
pub use matcher::{
    fill_documents, ColumnNames, DocumentIndex, DuplicatePolicy, KeyMode, MatchOptions,
    MatchOutcome, MatchReport, RecordMatcher, ResolvedColumns,
};
pub use normalize::normalize_text;
