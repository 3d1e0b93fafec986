use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Excel's built-in "Text" number format.
const TEXT_NUM_FORMAT: &str = "@";

/// Options for writing Excel files
#[derive(Debug, Clone)]
pub struct XlsxWriteOptions {
    /// Write every cell as a string with the Text number format, so Excel
    /// never reinterprets identifiers such as `00123` as numbers
    pub text_format: bool,
}

impl Default for XlsxWriteOptions {
    fn default() -> Self {
        XlsxWriteOptions { text_format: true }
    }
}

impl XlsxWriteOptions {
    /// Set whether every cell is written as text
    #[must_use]
    pub fn with_text_format(mut self, text_format: bool) -> Self {
        self.text_format = text_format;
        self
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::String(naive.format("%Y-%m-%d %H:%M:%S").to_string()),
            // Excel stores dates as days since 1899-12-30
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Rows of a worksheet range, anchored at column A.
///
/// calamine's range starts at the first used cell, so empty leading columns
/// are put back as `Null` cells to keep every column in its position.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let col_offset = range.start().map_or(0, |(_, col)| col as usize);
    range
        .rows()
        .map(|row| {
            std::iter::repeat(CellValue::Null)
                .take(col_offset)
                .chain(row.iter().map(data_to_cell_value))
                .collect()
        })
        .collect()
}

fn parse_error(e: impl std::fmt::Display) -> SheetError {
    SheetError::Parse(e.to_string())
}

fn write_error(e: XlsxError) -> SheetError {
    SheetError::Serialize(e.to_string())
}

impl Sheet {
    /// Load the first worksheet of a workbook held in memory.
    ///
    /// The container format (xlsx, xlsm, xlsb, xls, ods) is detected from the
    /// bytes. The first row becomes the header.
    pub fn from_workbook_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_workbook_reader(Cursor::new(bytes.to_vec()), None)
    }

    /// Load a named worksheet of a workbook held in memory.
    pub fn from_workbook_bytes_sheet(bytes: &[u8], sheet_name: &str) -> Result<Self> {
        Self::from_workbook_reader(Cursor::new(bytes.to_vec()), Some(sheet_name))
    }

    fn from_workbook_reader<RS>(reader: RS, sheet_name: Option<&str>) -> Result<Self>
    where
        RS: Read + Seek + Clone,
    {
        let mut workbook = open_workbook_auto_from_rs(reader).map_err(parse_error)?;

        let (name, range) = match sheet_name {
            Some(name) => {
                let range = workbook.worksheet_range(name).map_err(parse_error)?;
                (name.to_string(), range)
            }
            None => {
                let Some(first) = workbook.sheet_names().first().cloned() else {
                    return Ok(Sheet::new());
                };
                let range = workbook.worksheet_range(&first).map_err(parse_error)?;
                (first, range)
            }
        };

        tracing::debug!(sheet = %name, rows = range.height(), "read worksheet");

        let mut sheet = Sheet::from_grid(range_to_grid(&range));
        sheet.set_name(&name);
        Ok(sheet)
    }

    /// Save the sheet to an Excel file as a single worksheet
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_as_xlsx_with_options(path, &XlsxWriteOptions::default())
    }

    /// Save the sheet to an Excel file with options
    pub fn save_as_xlsx_with_options<P: AsRef<Path>>(
        &self,
        path: P,
        options: &XlsxWriteOptions,
    ) -> Result<()> {
        let mut workbook = Workbook::new();
        self.write_to_worksheet(workbook.add_worksheet(), options)?;
        workbook.save(path.as_ref()).map_err(write_error)
    }

    /// Render the sheet as an in-memory xlsx file
    pub fn to_xlsx_bytes(&self, options: &XlsxWriteOptions) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        self.write_to_worksheet(workbook.add_worksheet(), options)?;
        workbook.save_to_buffer().map_err(write_error)
    }

    /// Write header and data to a worksheet
    fn write_to_worksheet(&self, worksheet: &mut Worksheet, options: &XlsxWriteOptions) -> Result<()> {
        worksheet.set_name(self.name()).map_err(write_error)?;
        let text = Format::new().set_num_format(TEXT_NUM_FORMAT);

        for (row_idx, row) in self.grid().enumerate() {
            let row_num = u32::try_from(row_idx)
                .map_err(|_| SheetError::Serialize("Row index overflow".to_string()))?;

            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx)
                    .map_err(|_| SheetError::Serialize("Column index overflow".to_string()))?;

                if options.text_format {
                    if cell.is_blank() {
                        worksheet.write_blank(row_num, col_num, &text).map_err(write_error)?;
                    } else {
                        worksheet
                            .write_string_with_format(row_num, col_num, cell.to_text(), &text)
                            .map_err(write_error)?;
                    }
                    continue;
                }

                match cell {
                    CellValue::Null => {} // Leave empty
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col_num, *b).map_err(write_error)?;
                    }
                    CellValue::Int(i) => {
                        // Note: Excel stores all numbers as f64, so integers > 2^53
                        // may lose precision
                        worksheet.write_number(row_num, col_num, *i as f64).map_err(write_error)?;
                    }
                    CellValue::Float(f) => {
                        worksheet.write_number(row_num, col_num, *f).map_err(write_error)?;
                    }
                    CellValue::String(s) => {
                        worksheet.write_string(row_num, col_num, s).map_err(write_error)?;
                    }
                }
            }
        }

        Ok(())
    }
}
