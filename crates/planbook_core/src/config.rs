//! Runtime configuration for core callers.
//!
//! # Responsibility
//! - Resolve database path, logging settings and the active user id.
//!
//! # Invariants
//! - Blank or missing variables fall back to defaults; resolution never fails.
//! - Lookup is injectable so tests never touch process environment.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "PLANBOOK_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "PLANBOOK_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "PLANBOOK_LOG_DIR";
pub const USER_ID_VAR: &str = "PLANBOOK_USER_ID";

const DEFAULT_DB_FILE_NAME: &str = "planbook.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "planbook-logs";
const DEFAULT_USER_ID: &str = "local";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    /// Owner of every record read or written.
    pub user_id: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl CoreConfig {
    /// Resolves settings from `PLANBOOK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        Self {
            db_path: value(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: value(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: value(LOG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
            user_id: value(USER_ID_VAR).unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_VAR, LOG_LEVEL_VAR, USER_ID_VAR};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CoreConfig::default();
        assert_eq!(config.user_id, "local");
        assert_eq!(config.log_level, default_log_level());
        assert!(config.db_path.ends_with("planbook.sqlite3"));
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn values_are_trimmed_and_blank_values_ignored() {
        let vars = HashMap::from([
            (DB_PATH_VAR, " /data/planbook.db ".to_string()),
            (USER_ID_VAR, "   ".to_string()),
            (LOG_LEVEL_VAR, "warn".to_string()),
        ]);
        let config = CoreConfig::from_lookup(|name| vars.get(name).cloned());

        assert_eq!(config.db_path, PathBuf::from("/data/planbook.db"));
        assert_eq!(config.user_id, "local");
        assert_eq!(config.log_level, "warn");
    }
}
