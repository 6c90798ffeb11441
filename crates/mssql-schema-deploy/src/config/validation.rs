//! Configuration validation.

use super::DeployConfig;
use crate::error::{DeployError, Result};

/// Validate the configuration, collecting every missing required setting
/// into a single error before any connection is attempted.
pub fn validate(config: &DeployConfig) -> Result<()> {
    let mut missing = Vec::new();

    if config.server.is_empty() {
        missing.push("server".to_string());
    }
    if config.database.is_empty() {
        missing.push("database".to_string());
    }
    if config.user.is_empty() {
        missing.push("user".to_string());
    }
    if config.password.is_empty() {
        missing.push("password".to_string());
    }
    if config.project_id.is_empty() {
        missing.push("project_id".to_string());
    }

    if !missing.is_empty() {
        return Err(DeployError::MissingSettings(missing));
    }

    if config.port == 0 {
        return Err(DeployError::Config("port must be non-zero".into()));
    }

    // The project id is spliced into identifiers and string literals when
    // building DDL, so restrict it to characters that cannot break out.
    if !config
        .project_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(DeployError::Config(format!(
            "project_id may only contain ASCII letters, digits and '_', got '{}'",
            config.project_id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> DeployConfig {
        DeployConfig {
            server: "localhost".to_string(),
            port: 1433,
            database: "stockbox".to_string(),
            user: "sa".to_string(),
            password: "password".to_string(),
            encrypt: false,
            trust_server_cert: true,
            project_id: "42".to_string(),
            migrations_dir: "./migrations".to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_password_named() {
        let mut config = valid_config();
        config.password = "".to_string();
        match validate(&config) {
            Err(DeployError::MissingSettings(missing)) => {
                assert_eq!(missing, vec!["password".to_string()]);
            }
            other => panic!("expected MissingSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_all_missing_settings_listed_at_once() {
        let config = DeployConfig::default();
        match validate(&config) {
            Err(DeployError::MissingSettings(missing)) => {
                assert_eq!(
                    missing,
                    vec!["server", "database", "user", "password", "project_id"]
                );
            }
            other => panic!("expected MissingSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_project_id_rejects_quote_breakout() {
        let mut config = valid_config();
        config.project_id = "42'; DROP SCHEMA x; --".to_string();
        assert!(matches!(validate(&config), Err(DeployError::Config(_))));
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = valid_config();
        config.port = 0;
        assert!(matches!(validate(&config), Err(DeployError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut config = valid_config();
        config.password = "super_secret_password_123".to_string();
        let debug_output = format!("{:?}", config);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_password_123"),
            "Debug output should not contain actual password value"
        );
    }
}
