/// Logging setup
///
/// The crate itself only emits `tracing` events; applications that want
/// them on stderr can install the fmt subscriber configured here.
use crate::config::LoggingConfig;
use crate::core::{DbSetError, Result};
use tracing::Level;

/// Installs a global fmt subscriber at the configured level.
///
/// Calling this again after a subscriber is installed is a no-op.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| DbSetError::Config(format!("unknown log level '{}'", config.level)))?;

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig {
            level: "trace".to_string(),
        };
        assert!(init(&config).is_ok());
        assert!(init(&config).is_ok());
    }

    #[test]
    fn test_init_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "chatty".to_string(),
        };
        assert!(matches!(init(&config), Err(DbSetError::Config(_))));
    }
}
