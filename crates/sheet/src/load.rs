//! Format detection and one-call loading for uploaded or on-disk files.

use crate::csv::CsvOptions;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    /// Any workbook calamine understands (xlsx, xlsm, xlsb, xls, ods)
    Workbook,
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl SheetFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SheetFormat::Workbook),
            "csv" => Ok(SheetFormat::Csv),
            "tsv" | "tab" => Ok(SheetFormat::Tsv),
            other => Err(SheetError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Pick the format from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| SheetError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }
}

/// Options applied when loading any input file
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Convert every cell to text after loading, so numbers such as
    /// document IDs keep the digits the user sees
    pub text_only: bool,
    /// Worksheet to read from workbooks; defaults to the first one
    pub sheet_name: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            text_only: true,
            sheet_name: None,
        }
    }
}

impl LoadOptions {
    /// Set whether cells are converted to text
    #[must_use]
    pub fn with_text_only(mut self, text_only: bool) -> Self {
        self.text_only = text_only;
        self
    }

    /// Read a specific worksheet
    #[must_use]
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }
}

impl Sheet {
    /// Load a sheet from raw file bytes in the given format
    pub fn load_bytes(bytes: &[u8], format: SheetFormat, options: &LoadOptions) -> Result<Self> {
        let mut sheet = match format {
            SheetFormat::Workbook => match &options.sheet_name {
                Some(name) => Sheet::from_workbook_bytes_sheet(bytes, name)?,
                None => Sheet::from_workbook_bytes(bytes)?,
            },
            SheetFormat::Csv => Sheet::from_csv_reader(bytes, &CsvOptions::default())?,
            SheetFormat::Tsv => Sheet::from_csv_reader(bytes, &CsvOptions::tsv())?,
        };

        if options.text_only {
            sheet.convert_to_text();
        }
        Ok(sheet)
    }

    /// Load a sheet from a file, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let format = SheetFormat::from_path(path.as_ref())?;
        let bytes = std::fs::read(path.as_ref())?;
        Self::load_bytes(&bytes, format, options)
    }

    /// Save a sheet, choosing the format by extension (xlsx or csv/tsv)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match SheetFormat::from_path(path.as_ref())? {
            SheetFormat::Csv => self.save_as_csv(path),
            SheetFormat::Tsv => self.save_as_csv_with_options(path, &CsvOptions::tsv()),
            SheetFormat::Workbook => {
                let is_xlsx = path
                    .as_ref()
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
                if !is_xlsx {
                    return Err(SheetError::UnsupportedFormat(format!(
                        "{} (only .xlsx can be written)",
                        path.as_ref().display()
                    )));
                }
                self.save_as_xlsx(path)
            }
        }
    }
}
