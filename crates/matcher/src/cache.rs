//! Caller-owned cache of parsed input files.
//!
//! Entries are keyed by a blake3 hash of the raw bytes together with the load
//! settings, and expire after a fixed time-to-live. Nothing here is global: the
//! caller creates a [`ParseCache`] and passes it to whatever loads input.

use docfill_sheet::{LoadOptions, Sheet, SheetFormat};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Identity of one parse: file content plus the settings used to read it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    content: [u8; 32],
    format: SheetFormat,
    text_only: bool,
    sheet_name: Option<String>,
}

impl CacheKey {
    /// Key for parsing `bytes` as `format` with `options`
    #[must_use]
    pub fn new(bytes: &[u8], format: SheetFormat, options: &LoadOptions) -> Self {
        CacheKey {
            content: *blake3::hash(bytes).as_bytes(),
            format,
            text_only: options.text_only,
            sheet_name: options.sheet_name.clone(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.content[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "/{:?}", self.format)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    sheet: Sheet,
    inserted: Instant,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Time-bounded cache of parsed sheets.
#[derive(Debug, Clone)]
pub struct ParseCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
}

impl ParseCache {
    /// Create a cache whose entries live for `ttl`. A zero TTL never reuses
    /// an entry.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        ParseCache {
            ttl,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Entry lifetime
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live entry
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<&Sheet> {
        self.entries
            .get(key)
            .filter(|entry| self.is_live(entry))
            .map(|entry| &entry.sheet)
    }

    /// Store a parsed sheet, replacing any previous entry
    pub fn insert(&mut self, key: CacheKey, sheet: Sheet) {
        self.entries.insert(
            key,
            CacheEntry {
                sheet,
                inserted: Instant::now(),
            },
        );
    }

    /// Return the cached parse of `bytes`, parsing and storing it on a miss.
    ///
    /// Expired entries are dropped whenever a new parse is stored.
    pub fn get_or_parse(
        &mut self,
        bytes: &[u8],
        format: SheetFormat,
        options: &LoadOptions,
    ) -> docfill_sheet::Result<Sheet> {
        let key = CacheKey::new(bytes, format, options);

        if let Some(sheet) = self.get(&key) {
            let sheet = sheet.clone();
            self.stats.hits += 1;
            tracing::debug!(%key, "parse cache hit");
            return Ok(sheet);
        }

        self.stats.misses += 1;
        tracing::debug!(%key, "parse cache miss");
        let sheet = Sheet::load_bytes(bytes, format, options)?;
        let purged = self.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, "dropped expired parse cache entries");
        }
        self.insert(key, sheet.clone());
        Ok(sheet)
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.inserted.elapsed() < ttl);
        before - self.entries.len()
    }

    /// Number of stored entries, live or expired
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit/miss counters since creation
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn is_live(&self, entry: &CacheEntry) -> bool {
        entry.inserted.elapsed() < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &[u8] = b"Nome,CPF_CNPJ\nAcme,1\n";

    #[test]
    fn identical_bytes_hit_within_ttl() {
        let mut cache = ParseCache::new(Duration::from_secs(3600));
        let options = LoadOptions::default();

        let first = cache.get_or_parse(CSV, SheetFormat::Csv, &options).unwrap();
        let second = cache.get_or_parse(CSV, SheetFormat::Csv, &options).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_content_or_options_miss() {
        let mut cache = ParseCache::new(Duration::from_secs(3600));
        let options = LoadOptions::default();

        cache.get_or_parse(CSV, SheetFormat::Csv, &options).unwrap();
        cache.get_or_parse(b"Nome,CPF_CNPJ\nAcme,2\n", SheetFormat::Csv, &options).unwrap();
        cache
            .get_or_parse(CSV, SheetFormat::Csv, &options.clone().with_text_only(false))
            .unwrap();

        assert_eq!(cache.stats().misses, 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn zero_ttl_always_reparses() {
        let mut cache = ParseCache::new(Duration::ZERO);
        let options = LoadOptions::default();

        cache.get_or_parse(CSV, SheetFormat::Csv, &options).unwrap();
        cache.get_or_parse(CSV, SheetFormat::Csv, &options).unwrap();

        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 2 });
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn expired_entries_are_evicted_on_store() {
        let mut cache = ParseCache::new(Duration::from_millis(20));
        let options = LoadOptions::default();

        cache.get_or_parse(CSV, SheetFormat::Csv, &options).unwrap();
        cache.get_or_parse(b"Nome,CPF_CNPJ\nBeta,2\n", SheetFormat::Csv, &options).unwrap();
        assert_eq!(cache.len(), 2);

        std::thread::sleep(Duration::from_millis(40));
        cache.get_or_parse(b"Nome,CPF_CNPJ\nGama,3\n", SheetFormat::Csv, &options).unwrap();

        assert_eq!(cache.len(), 1);
        assert!(cache.get(&CacheKey::new(CSV, SheetFormat::Csv, &options)).is_none());
    }

    #[test]
    fn invalidate_forces_reparse() {
        let mut cache = ParseCache::new(Duration::from_secs(3600));
        let options = LoadOptions::default();
        let key = CacheKey::new(CSV, SheetFormat::Csv, &options);

        cache.get_or_parse(CSV, SheetFormat::Csv, &options).unwrap();
        assert!(cache.get(&key).is_some());
        assert!(cache.invalidate(&key));
        assert!(!cache.invalidate(&key));

        cache.get_or_parse(CSV, SheetFormat::Csv, &options).unwrap();
        assert_eq!(cache.stats().misses, 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn parse_failures_are_not_cached() {
        let mut cache = ParseCache::new(Duration::from_secs(3600));
        let result = cache.get_or_parse(b"garbage", SheetFormat::Workbook, &LoadOptions::default());
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
