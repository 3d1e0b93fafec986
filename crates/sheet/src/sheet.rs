use crate::cell::CellValue;
use crate::error::{Result, SheetError};

/// A sheet with a header row and row-major data.
///
/// The header is kept apart from the data: `row_count()` counts data rows
/// only, and row `0` is the first row below the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    column_names: Vec<String>,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Sheet {
            name: "Sheet1".to_string(),
            column_names: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a header and data rows.
    ///
    /// Header names are trimmed. Short rows are padded with `Null` and long
    /// rows widen the header with blank names, so every row ends up with one
    /// cell per column.
    #[must_use]
    pub fn from_rows<H, T>(header: Vec<H>, rows: Vec<Vec<T>>) -> Self
    where
        H: Into<String>,
        T: Into<CellValue>,
    {
        let mut column_names: Vec<String> = header
            .into_iter()
            .map(|h| Into::<String>::into(h).trim().to_string())
            .collect();
        let data: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let width = data
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(column_names.len());
        column_names.resize(width, String::new());

        let mut sheet = Sheet {
            name: "Sheet1".to_string(),
            column_names,
            data,
        };
        sheet.pad_rows();
        sheet
    }

    /// Build a sheet from raw grid rows, using the first row as the header.
    #[must_use]
    pub fn from_grid(mut grid: Vec<Vec<CellValue>>) -> Self {
        if grid.is_empty() {
            return Sheet::new();
        }
        let header: Vec<String> = grid.remove(0).iter().map(CellValue::to_text).collect();
        Sheet::from_rows(header, grid)
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of data rows (the header is not counted)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.column_names.len()
    }

    /// Check if the sheet has no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get column names, in order
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Get the index of the first column with exactly this name
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.column_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| SheetError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    // ===== Cell Access =====

    /// Get a cell value by row and column index (0-based)
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a cell value by row index and column name
    pub fn get_by_name(&self, row: usize, col_name: &str) -> Result<&CellValue> {
        let col = self.column_index(col_name)?;
        self.get(row, col)
    }

    // ===== Rows & Columns =====

    /// Replace every value in a column. `values` must have one entry per row.
    pub fn column_update<T: Into<CellValue>>(&mut self, index: usize, values: Vec<T>) -> Result<()> {
        if index >= self.col_count() {
            return Err(SheetError::ColumnIndexOutOfBounds {
                index,
                count: self.col_count(),
            });
        }
        if values.len() != self.row_count() {
            return Err(SheetError::LengthMismatch {
                expected: self.row_count(),
                actual: values.len(),
            });
        }
        for (row, value) in self.data.iter_mut().zip(values) {
            row[index] = value.into();
        }
        Ok(())
    }

    /// Iterate over data rows
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// A copy of the sheet holding only the first `n` data rows
    #[must_use]
    pub fn head(&self, n: usize) -> Sheet {
        Sheet {
            name: self.name.clone(),
            column_names: self.column_names.clone(),
            data: self.data.iter().take(n).cloned().collect(),
        }
    }

    /// Convert every non-null cell into its text form
    pub fn convert_to_text(&mut self) {
        for row in &mut self.data {
            for cell in row.iter_mut() {
                *cell = std::mem::take(cell).into_text();
            }
        }
    }

    /// Header plus data as one grid of cells, ready for writing
    pub(crate) fn grid(&self) -> impl Iterator<Item = Vec<CellValue>> + '_ {
        let header: Vec<CellValue> = self
            .column_names
            .iter()
            .map(|n| CellValue::String(n.clone()))
            .collect();
        std::iter::once(header).chain(self.data.iter().cloned())
    }

    fn pad_rows(&mut self) {
        let width = self.column_names.len();
        for row in &mut self.data {
            row.resize(width, CellValue::Null);
        }
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Sheet {
        Sheet::from_rows(
            vec![" Nome da Pessoa ", "CPF", "Valor"],
            vec![
                vec!["Ana", "", "10"],
                vec!["Bruno", "", "20"],
            ],
        )
    }

    #[test]
    fn test_from_rows_trims_header() {
        let sheet = people();
        assert_eq!(sheet.column_names()[0], "Nome da Pessoa");
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 3);
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let sheet = Sheet::from_rows(vec!["a", "b", "c"], vec![vec!["1"]]);
        assert_eq!(sheet.get(0, 2).unwrap(), &CellValue::Null);
    }

    #[test]
    fn test_from_rows_widens_header_for_long_rows() {
        let sheet = Sheet::from_rows(vec!["a"], vec![vec!["1", "2"]]);
        assert_eq!(sheet.col_count(), 2);
        assert_eq!(sheet.column_names()[1], "");
    }

    #[test]
    fn test_from_grid_uses_first_row_as_header() {
        let sheet = Sheet::from_grid(vec![
            vec![CellValue::from("Nome"), CellValue::Int(2024)],
            vec![CellValue::from("Ana"), CellValue::Int(1)],
        ]);
        assert_eq!(sheet.column_names(), &["Nome".to_string(), "2024".to_string()]);
        assert_eq!(sheet.row_count(), 1);
    }

    #[test]
    fn test_from_grid_empty() {
        let sheet = Sheet::from_grid(Vec::new());
        assert!(sheet.is_empty());
        assert_eq!(sheet.col_count(), 0);
    }

    #[test]
    fn test_get_and_bounds() {
        let mut sheet = people();
        sheet.column_update(1, vec!["111", "123"]).unwrap();
        assert_eq!(sheet.get_by_name(1, "CPF").unwrap().to_text(), "123");
        assert!(matches!(
            sheet.get(5, 0),
            Err(SheetError::IndexOutOfBounds { row: 5, .. })
        ));
        assert!(matches!(
            sheet.column_index("Missing"),
            Err(SheetError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_column_update_length_mismatch() {
        let mut sheet = people();
        let result = sheet.column_update(1, vec!["only one"]);
        assert!(matches!(result, Err(SheetError::LengthMismatch { expected: 2, actual: 1 })));
    }

    #[test]
    fn test_head_and_convert_to_text() {
        let mut sheet = Sheet::from_rows(vec!["n"], vec![vec![1], vec![2], vec![3]]);
        sheet.convert_to_text();
        let head = sheet.head(2);
        assert_eq!(head.row_count(), 2);
        assert_eq!(head.get(1, 0).unwrap(), &CellValue::String("2".to_string()));
    }

    #[test]
    fn test_column_index_first_match() {
        let sheet = Sheet::from_rows(vec!["x", "x"], Vec::<Vec<CellValue>>::new());
        assert_eq!(sheet.column_index("x").unwrap(), 0);
    }
}
