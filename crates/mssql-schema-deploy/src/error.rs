//! Error types for the deploy library.

use thiserror::Error;

/// Main error type for deploy operations.
#[derive(Error, Debug)]
pub enum DeployError {
    /// One or more required settings are absent. Raised before any
    /// connection attempt; names every missing setting at once.
    #[error("Missing required settings: {}", .0.join(", "))]
    MissingSettings(Vec<String>),

    /// Configuration is present but invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The database session could not be established.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement failed on an established session.
    #[error("Database error: {0}")]
    Database(String),

    /// Schema or ledger table creation failed.
    #[error("Schema setup failed: {0}")]
    SchemaSetup(String),

    /// A fatal drop failure (foreign key or table tier).
    #[error("Failed to drop {kind} {object}: {message}")]
    Drop {
        kind: &'static str,
        object: String,
        message: String,
    },

    /// A batch of a migration file failed. `batch` is 1-based.
    #[error("Migration {file} failed at batch {batch}: {message}")]
    BatchExecution {
        file: String,
        batch: usize,
        message: String,
    },

    /// IO error (reading the migrations directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeployError {
    /// Wrap a driver error as a Database error.
    pub fn db(err: impl std::fmt::Display) -> Self {
        DeployError::Database(err.to_string())
    }

    /// Exit code for the CLI: 2 for configuration problems, 3 for
    /// connection failures, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            DeployError::MissingSettings(_) | DeployError::Config(_) => 2,
            DeployError::Connection(_) => 3,
            _ => 1,
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for deploy operations.
pub type Result<T> = std::result::Result<T, DeployError>;
