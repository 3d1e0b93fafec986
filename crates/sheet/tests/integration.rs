use docfill_sheet::{CellValue, LoadOptions, Sheet, SheetError, SheetFormat, XlsxWriteOptions};
use tempfile::tempdir;

// ===== Loading Tests =====

#[test]
fn test_load_xlsx_from_path_trims_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("banco.xlsx");

    Sheet::from_rows(
        vec!["  Razão Social ", "CPF/CNPJ"],
        vec![vec!["Acme Ltda", "12.345.678/0001-99"]],
    )
    .save_as_xlsx(&path)
    .unwrap();

    let sheet = Sheet::load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(sheet.column_names()[0], "Razão Social");
    assert_eq!(
        sheet.get_by_name(0, "CPF/CNPJ").unwrap(),
        &CellValue::String("12.345.678/0001-99".to_string())
    );
}

#[test]
fn test_load_bytes_matches_load_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contas.csv");
    std::fs::write(&path, "Nome da Pessoa,CPF,Valor\nAna,,10\nBruno,,20\n").unwrap();

    let from_path = Sheet::load(&path, &LoadOptions::default()).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    let from_bytes = Sheet::load_bytes(&bytes, SheetFormat::Csv, &LoadOptions::default()).unwrap();

    assert_eq!(from_path, from_bytes);
    assert_eq!(from_path.row_count(), 2);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = Sheet::load(dir.path().join("absent.xlsx"), &LoadOptions::default());
    assert!(matches!(result, Err(SheetError::Io(_))));
}

#[test]
fn test_load_unsupported_extension() {
    let result = Sheet::load("report.pdf", &LoadOptions::default());
    assert!(matches!(result, Err(SheetError::UnsupportedFormat(_))));
}

#[test]
fn test_load_corrupt_workbook_is_parse_error() {
    let result = Sheet::load_bytes(b"PK\x03\x04broken", SheetFormat::Workbook, &LoadOptions::default());
    assert!(matches!(result, Err(ref e) if e.is_parse()));
}

// ===== Writing Tests =====

#[test]
fn test_xlsx_output_preserves_document_formatting() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("resultado.xlsx");

    let sheet = Sheet::from_rows(
        vec!["Nome da Pessoa", "CPF"],
        vec![
            vec!["Ana", "007.123.456-00"],
            vec!["Bruno", "00012345678"],
            vec!["Caio", ""],
        ],
    );
    sheet.save_as_xlsx(&path).unwrap();

    let loaded = Sheet::load(&path, &LoadOptions::default().with_text_only(false)).unwrap();
    assert_eq!(loaded.row_count(), 3);
    assert_eq!(loaded.get(0, 1).unwrap(), &CellValue::String("007.123.456-00".to_string()));
    assert_eq!(loaded.get(1, 1).unwrap(), &CellValue::String("00012345678".to_string()));
    assert!(loaded.get(2, 1).unwrap().is_blank());
}

#[test]
fn test_xlsx_bytes_single_sheet() {
    let mut sheet = Sheet::from_rows(vec!["a", "b"], vec![vec!["1", "2"]]);
    sheet.set_name("Resultado");
    let bytes = sheet.to_xlsx_bytes(&XlsxWriteOptions::default()).unwrap();

    let loaded = Sheet::load_bytes(&bytes, SheetFormat::Workbook, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.name(), "Resultado");
    assert_eq!(loaded.column_names(), sheet.column_names());
    assert!(loaded.rows().eq(sheet.rows()));
}
