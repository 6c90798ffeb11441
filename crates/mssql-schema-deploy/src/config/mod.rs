//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::env;
use std::path::Path;

/// Environment variable names, matching the deployment convention of the
/// surrounding platform.
const ENV_SERVER: &str = "DB_SERVER";
const ENV_PORT: &str = "DB_PORT";
const ENV_DATABASE: &str = "DB_NAME";
const ENV_USER: &str = "DB_USER";
const ENV_PASSWORD: &str = "DB_PASSWORD";
const ENV_ENCRYPT: &str = "DB_ENCRYPT";
const ENV_PROJECT_ID: &str = "PROJECT_ID";
const ENV_MIGRATIONS_DIR: &str = "MIGRATIONS_PATH";

impl DeployConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: DeployConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from environment variables
    /// (`DB_SERVER`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`,
    /// `DB_ENCRYPT`, `PROJECT_ID`, `MIGRATIONS_PATH`).
    pub fn from_env() -> Result<Self> {
        let get = |name: &str| env::var(name).unwrap_or_default();

        let mut config = DeployConfig {
            server: get(ENV_SERVER),
            database: get(ENV_DATABASE),
            user: get(ENV_USER),
            password: get(ENV_PASSWORD),
            project_id: get(ENV_PROJECT_ID),
            encrypt: matches!(
                get(ENV_ENCRYPT).to_lowercase().as_str(),
                "true" | "yes" | "1"
            ),
            ..Default::default()
        };

        let port = get(ENV_PORT);
        if !port.is_empty() {
            config.port = port.parse().map_err(|_| {
                crate::error::DeployError::Config(format!("invalid {}: '{}'", ENV_PORT, port))
            })?;
        }

        let dir = get(ENV_MIGRATIONS_DIR);
        if !dir.is_empty() {
            config.migrations_dir = dir;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Name of the isolated schema: `project_<id>`.
    ///
    /// Plain concatenation so that distinct identifiers can never collide.
    pub fn schema_name(&self) -> String {
        format!("project_{}", self.project_id)
    }
}
