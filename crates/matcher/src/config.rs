//! YAML configuration.

use crate::alias::{AliasTable, LogicalField};
use crate::cache::ParseCache;
use crate::error::{MatchError, MatchResult};
use crate::matcher::{DuplicatePolicy, KeyMode, MatchOptions, RecordMatcher};
use docfill_sheet::LoadOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default parse-cache lifetime, one hour.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Settings for a fill run. Every field is optional in the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocfillConfig {
    /// Extra header spellings per logical field
    pub aliases: IndexMap<LogicalField, Vec<String>>,
    /// Use only the configured aliases for the fields listed in `aliases`
    pub replace_default_aliases: bool,
    pub duplicate_policy: DuplicatePolicy,
    pub key_mode: KeyMode,
    pub cache_ttl_secs: u64,
    /// Read every input cell as text
    pub text_only: bool,
}

impl Default for DocfillConfig {
    fn default() -> Self {
        DocfillConfig {
            aliases: IndexMap::new(),
            replace_default_aliases: false,
            duplicate_policy: DuplicatePolicy::default(),
            key_mode: KeyMode::default(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            text_only: true,
        }
    }
}

impl DocfillConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> MatchResult<Self> {
        let config: DocfillConfig =
            serde_yaml::from_str(yaml).map_err(|e| MatchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> MatchResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| MatchError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&yaml)
    }

    /// Reject settings that would make resolution impossible
    pub fn validate(&self) -> MatchResult<()> {
        for (field, aliases) in &self.aliases {
            if aliases.iter().any(|a| crate::normalize_text(a).is_empty()) {
                return Err(MatchError::Config(format!(
                    "alias for {field} has no letters or digits"
                )));
            }
            if self.replace_default_aliases && aliases.is_empty() {
                return Err(MatchError::Config(format!(
                    "replace_default_aliases leaves {field} with no aliases"
                )));
            }
        }
        Ok(())
    }

    /// Default aliases merged with, or replaced by, the configured ones
    #[must_use]
    pub fn alias_table(&self) -> AliasTable {
        let mut table = AliasTable::default();
        for (field, aliases) in &self.aliases {
            if self.replace_default_aliases {
                table.replace(*field, aliases.iter().cloned());
            } else {
                table.extend(*field, aliases.iter().cloned());
            }
        }
        table
    }

    #[must_use]
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            duplicate_policy: self.duplicate_policy,
            key_mode: self.key_mode,
        }
    }

    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::default().with_text_only(self.text_only)
    }

    /// A matcher built from these settings
    #[must_use]
    pub fn matcher(&self) -> RecordMatcher {
        RecordMatcher::new(self.alias_table(), self.match_options())
    }

    /// An empty parse cache with the configured lifetime
    #[must_use]
    pub fn parse_cache(&self) -> ParseCache {
        ParseCache::new(Duration::from_secs(self.cache_ttl_secs))
    }
}
