//! Sheet module for docfill
//!
//! A header-plus-rows table model with readers for the spreadsheet formats a
//! user is likely to upload (xlsx, xls, ods, csv) and writers for the filled
//! result.
//!
//! # Examples
//!
//! ## Creating a sheet from rows
//!
//! ```
//! use docfill_sheet::{Sheet, CellValue};
//!
//! let sheet = Sheet::from_rows(
//!     vec!["Nome da Pessoa", "CPF"],
//!     vec![vec!["Ana", ""], vec!["Bruno", ""]],
//! );
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.col_count(), 2);
//! assert_eq!(sheet.get(0, 1).unwrap(), &CellValue::String(String::new()));
//! ```
//!
//! ## Loading an uploaded file
//!
//! ```no_run
//! use docfill_sheet::{LoadOptions, Sheet, SheetFormat};
//!
//! let bytes = std::fs::read("contas.xlsx").unwrap();
//! let sheet = Sheet::load_bytes(&bytes, SheetFormat::Workbook, &LoadOptions::default()).unwrap();
//! ```
//!
//! Loaded cells are text by default so identifiers such as `007.123.456-00`
//! or `00123` keep their formatting, and xlsx output is written with the
//! Text number format for the same reason.

mod cell;
mod csv;
mod error;
mod load;
mod sheet;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export load options and formats.
pub use load::{LoadOptions, SheetFormat};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export XLSX write options.
pub use xlsx::XlsxWriteOptions;
