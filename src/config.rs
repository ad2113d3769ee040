use crate::core::db::TemplateMode;
use crate::core::{DbSetError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration structure parsed from a TOML file.
///
/// Every section is optional; missing keys fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub templates: TemplateConfig,
    pub logging: LoggingConfig,
}

/// Connection settings applied every time a connection is opened.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub busy_timeout_ms: Option<u64>,
    pub read_only: bool,
    /// Statements run right after opening, e.g. `PRAGMA foreign_keys = ON`
    pub pragmas: Vec<String>,
}

/// Placeholder expansion settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub mode: TemplateMode,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(DbSetError::Config(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        if let Some(pragma) = self
            .database
            .pragmas
            .iter()
            .find(|p| !p.trim_start().to_uppercase().starts_with("PRAGMA"))
        {
            return Err(DbSetError::Config(format!(
                "'{}' is not a PRAGMA statement",
                pragma
            )));
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = dbset::config::load_config("dbset.toml")?;
/// println!("{:?}", config);
/// # Ok::<(), dbset::DbSetError>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CONFIG: &str = r#"
[database]
busy_timeout_ms = 500
read_only = false
pragmas = ["PRAGMA foreign_keys = ON", "PRAGMA journal_mode = WAL"]

[templates]
mode = "quoted"

[logging]
level = "debug"
"#;

    #[test]
    fn test_load_config_from_str() {
        let config = Config::from_toml_str(SAMPLE_CONFIG).expect("Failed to parse sample config");
        assert_eq!(config.database.busy_timeout_ms, Some(500));
        assert!(!config.database.read_only);
        assert_eq!(config.database.pragmas.len(), 2);
        assert_eq!(config.templates.mode, TemplateMode::Quoted);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.database.busy_timeout_ms, None);
        assert!(config.database.pragmas.is_empty());
        assert_eq!(config.templates.mode, TemplateMode::Literal);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_config_values() {
        assert!(matches!(
            Config::from_toml_str("[logging]\nlevel = \"loud\""),
            Err(DbSetError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[database]\npragmas = [\"DROP TABLE users\"]"),
            Err(DbSetError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[templates]\nmode = \"shouting\""),
            Err(DbSetError::Toml(_))
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CONFIG.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.templates.mode, TemplateMode::Quoted);

        assert!(matches!(load_config("/nonexistent/dbset.toml"), Err(DbSetError::Io(_))));
    }
}
