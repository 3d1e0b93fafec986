use crate::alias::TableRole;
use crate::cache::ParseCache;
use crate::error::{MatchError, MatchResult};
use docfill_sheet::{LoadOptions, Sheet, SheetFormat};

/// Decode one uploaded input, going through `cache` when one is supplied.
///
/// Any failure to decode is reported as a parse error for `table`.
pub fn load_input(
    table: TableRole,
    bytes: &[u8],
    format: SheetFormat,
    options: &LoadOptions,
    cache: Option<&mut ParseCache>,
) -> MatchResult<Sheet> {
    let loaded = match cache {
        Some(cache) => cache.get_or_parse(bytes, format, options),
        None => Sheet::load_bytes(bytes, format, options),
    };

    let sheet = loaded.map_err(|e| MatchError::from_load(table, e))?;
    tracing::debug!(
        %table,
        rows = sheet.row_count(),
        cols = sheet.col_count(),
        "loaded input"
    );
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn loads_through_cache() {
        let mut cache = ParseCache::new(Duration::from_secs(60));
        let bytes = b"Nome da Pessoa,CPF\nAna,\n";

        for _ in 0..2 {
            let sheet = load_input(
                TableRole::Target,
                bytes,
                SheetFormat::Csv,
                &LoadOptions::default(),
                Some(&mut cache),
            )
            .unwrap();
            assert_eq!(sheet.row_count(), 1);
        }
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn malformed_workbook_is_parse_error_for_its_table() {
        let err = load_input(
            TableRole::Reference,
            b"not a spreadsheet",
            SheetFormat::Workbook,
            &LoadOptions::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::Parse { table: TableRole::Reference, .. }));
    }
}
