//! Runtime settings read from the environment.
//!
//! | Variable               | Default          | Meaning                          |
//! |------------------------|------------------|----------------------------------|
//! | `VITALRANK_LOG_MODE`   | `auto`           | `auto`, `file` or `stdout`       |
//! | `VITALRANK_LOG_FILE`   | `vitalrank.log`  | Log file used in file mode       |
//! | `VITALRANK_EXPORT_DIR` | `exports`        | Directory for cohort JSON reports|
//!
//! Log filtering itself follows `RUST_LOG` (default `info`).
//! Model parameters are deliberately not configurable.

use std::path::PathBuf;

use crate::VitalrankError;

pub const LOG_MODE_ENV: &str = "VITALRANK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "VITALRANK_LOG_FILE";
pub const EXPORT_DIR_ENV: &str = "VITALRANK_EXPORT_DIR";

const DEFAULT_LOG_FILE: &str = "vitalrank.log";
const DEFAULT_EXPORT_DIR: &str = "exports";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

impl std::str::FromStr for LogMode {
    type Err = VitalrankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(VitalrankError::Config(format!(
                "{LOG_MODE_ENV}: unknown log mode '{other}' (expected auto, file or stdout)"
            ))),
        }
    }
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Process settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub export_dir: PathBuf,
    /// Problems found while reading the environment, reported once logging is up
    pub warnings: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            warnings: Vec::new(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Never fails: invalid values fall back to defaults and are recorded in
    /// `warnings`, since logging is not initialized yet at this point.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(mode) = lookup(LOG_MODE_ENV) {
            match mode.parse() {
                Ok(mode) => settings.log_mode = mode,
                Err(e) => settings.warnings.push(e.to_string()),
            }
        }

        if let Some(path) = lookup(LOG_FILE_ENV).filter(|p| !p.trim().is_empty()) {
            settings.log_file = PathBuf::from(path.trim());
        }

        if let Some(dir) = lookup(EXPORT_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            settings.export_dir = PathBuf::from(dir.trim());
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings.log_mode, LogMode::Auto);
        assert_eq!(settings.log_file, PathBuf::from("vitalrank.log"));
        assert_eq!(settings.export_dir, PathBuf::from("exports"));
        assert!(settings.warnings.is_empty());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (LOG_MODE_ENV, "Stdout"),
            (LOG_FILE_ENV, "/tmp/vr.log"),
            (EXPORT_DIR_ENV, " /tmp/out "),
        ]));
        assert_eq!(settings.log_mode, LogMode::Stdout);
        assert_eq!(settings.log_file, PathBuf::from("/tmp/vr.log"));
        assert_eq!(settings.export_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_invalid_log_mode_falls_back() {
        let settings = Settings::from_lookup(lookup(&[(LOG_MODE_ENV, "syslog")]));
        assert_eq!(settings.log_mode, LogMode::Auto);
        assert_eq!(settings.warnings.len(), 1);
        assert!(settings.warnings[0].contains("syslog"));
    }

    #[test]
    fn test_auto_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
