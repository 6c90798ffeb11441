//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Connection and deployment settings for one run.
///
/// All `String` fields default to empty so that a partially filled YAML file
/// deserializes and `validate()` can report every missing setting in one
/// error rather than failing on the first.
#[derive(Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Database host.
    #[serde(default)]
    pub server: String,

    /// Database port (default: 1433).
    #[serde(default = "default_mssql_port")]
    pub port: u16,

    /// Database name.
    #[serde(default)]
    pub database: String,

    /// Username.
    #[serde(default)]
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Encrypt the connection (default: false).
    #[serde(default)]
    pub encrypt: bool,

    /// Trust the server certificate when encrypting (default: true).
    #[serde(default = "default_true")]
    pub trust_server_cert: bool,

    /// Project identifier; names the isolated schema as `project_<id>`.
    #[serde(default)]
    pub project_id: String,

    /// Directory of `.sql` migration scripts (default: "./migrations").
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

impl std::fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("encrypt", &self.encrypt)
            .field("trust_server_cert", &self.trust_server_cert)
            .field("project_id", &self.project_id)
            .field("migrations_dir", &self.migrations_dir)
            .finish()
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            port: default_mssql_port(),
            database: String::new(),
            user: String::new(),
            password: String::new(),
            encrypt: false,
            trust_server_cert: default_true(),
            project_id: String::new(),
            migrations_dir: default_migrations_dir(),
        }
    }
}

// Default value functions for serde
fn default_mssql_port() -> u16 {
    1433
}

fn default_true() -> bool {
    true
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}
