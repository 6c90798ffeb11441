//! # mssql-schema-deploy
//!
//! Replace-mode SQL Server migration runner with per-project schema isolation.
//!
//! Deploys a versioned directory of `.sql` scripts into a dedicated schema
//! (`project_<id>`) inside a shared multi-tenant database:
//!
//! - **Schema isolation** - only the project's own schema is ever touched
//! - **Replace mode** - every run wipes the schema and rebuilds it from scratch
//! - **Dependency-ordered teardown** - procedures, views, functions, triggers,
//!   foreign keys, then tables
//! - **Batch execution** - scripts are split on `GO` separators and executed
//!   sequentially on a single session
//! - **Checksum ledger** - each applied file is recorded with a SHA-256
//!   fingerprint in a `migrations` table inside the isolated schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use mssql_schema_deploy::{Deployer, DeployConfig};
//!
//! #[tokio::main]
//! async fn main() -> mssql_schema_deploy::Result<()> {
//!     let config = DeployConfig::from_env()?;
//!     let result = Deployer::new(config).run().await?;
//!     println!("Applied {} files", result.files_applied);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod files;
pub mod ident;
pub mod ledger;
pub mod orchestrator;
pub mod rewrite;
pub mod schema;
pub mod session;
pub mod wipe;

// Re-exports for convenient access
pub use config::DeployConfig;
pub use error::{DeployError, Result};
pub use files::MigrationFile;
pub use orchestrator::{Deployer, DeployResult};
pub use session::{SqlSession, TiberiusSession};
pub use wipe::{DependentObject, ObjectKind};
