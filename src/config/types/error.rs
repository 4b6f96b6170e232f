//! Configuration errors and collected diagnostics.

use super::FieldPath;
use crate::logger::paint;
use crate::utils::plural_count;
use owo_colors::Style;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a usable `slugreg.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in config")]
    Toml(#[from] toml::de::Error),

    #[error("config file `{0}` not found")]
    NotFound(PathBuf),

    /// Rendered by itself; no `source` so the problems print once.
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// Severity of a config problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Makes the config unusable.
    Error,
    /// Suspicious but loadable.
    Warning,
}

/// One problem found in a config field.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub level: Level,
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            Level::Error => paint("error", Style::new().red().bold()),
            Level::Warning => paint("warning", Style::new().yellow().bold()),
        };
        write!(f, "{} {} {}", marker, self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {}", paint("hint:", Style::new().cyan()), hint)?;
        }
        Ok(())
    }
}

/// Problems collected while validating every config section.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    items: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, level: Level, field: FieldPath, message: String, hint: Option<String>) {
        self.items.push(ConfigDiagnostic {
            level,
            field,
            message,
            hint,
        });
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Level::Error, field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(Level::Error, field, message.into(), Some(hint.into()));
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Level::Warning, field, message.into(), None);
    }

    fn of_level(&self, level: Level) -> Vec<&ConfigDiagnostic> {
        self.items.iter().filter(|d| d.level == level).collect()
    }

    pub fn errors(&self) -> Vec<&ConfigDiagnostic> {
        self.of_level(Level::Error)
    }

    pub fn warnings(&self) -> Vec<&ConfigDiagnostic> {
        self.of_level(Level::Warning)
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.items.iter().filter(|d| d.level == Level::Error).count()
    }

    /// True when no errors were found. Warnings do not count.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Print warnings to stderr; errors are reported through the result.
    pub fn print_warnings(&self) {
        for warning in self.warnings() {
            eprintln!("{warning}");
        }
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors();
        let heading = format!("config has {}:", plural_count(errors.len(), "error"));
        f.write_str(&paint(&heading, Style::new().red().bold()))?;
        for error in errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("slugreg.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("slugreg.toml"));
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FieldPath::new("store.path"), "odd extension");

        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
        assert!(diag.into_result().is_ok());
    }

    #[test]
    fn test_diagnostics_display() {
        owo_colors::set_override(false);
        let mut diag = ConfigDiagnostics::new();
        diag.error_with_hint(FieldPath::new("store.path"), "store path is empty", "set it");
        diag.warn(FieldPath::new("sites"), "unused site");
        diag.error(FieldPath::new("sites"), "site `x` is not a number");

        assert_eq!(diag.len(), 2);
        let display = diag.to_string();
        assert!(display.starts_with("config has 2 errors:"));
        assert!(display.contains("error `store.path` store path is empty"));
        assert!(display.contains("hint: set it"));
        assert!(!display.contains("unused site"));
    }
}
