//! Deploy orchestrator - main workflow coordinator.
//!
//! Drives one replace-mode run: connect, ensure schema and ledger, wipe the
//! isolated schema, clear the ledger, then apply every file in order. The
//! session is owned here and released on every exit path. Concurrent runs
//! against the same schema are unsupported; run at most one deploy per
//! schema at a time.

use crate::batch;
use crate::config::DeployConfig;
use crate::error::Result;
use crate::files::{self, MigrationFile};
use crate::ledger;
use crate::rewrite;
use crate::schema;
use crate::session::{SqlSession, TiberiusSession};
use crate::wipe;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Replace-mode deploy runner.
pub struct Deployer {
    config: DeployConfig,
}

/// Result of a deploy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployResult {
    /// The isolated schema that was rebuilt.
    pub schema: String,

    /// Final status (always "completed"; failures surface as errors).
    pub status: String,

    /// Migration files found in the directory.
    pub files_total: usize,

    /// Files successfully applied (equals `files_total` on success).
    pub files_applied: usize,

    /// Total batches executed across all files.
    pub batches_executed: usize,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,
}

impl Deployer {
    /// Create a new deployer. The configuration is assumed validated.
    pub fn new(config: DeployConfig) -> Self {
        Self { config }
    }

    /// Run the full replace-mode deploy.
    pub async fn run(&self) -> Result<DeployResult> {
        let started_at = Utc::now();
        let schema = self.config.schema_name();
        let files = files::load_migration_files(Path::new(&self.config.migrations_dir))?;

        info!(
            "Starting deploy into schema [{}] ({} migration files)",
            schema,
            files.len()
        );

        let mut session = TiberiusSession::connect(&self.config).await?;
        let outcome = run_with_session(&mut session, &schema, &files).await;
        // Release the session on every exit path.
        session.close().await;

        let batches_executed = outcome?;
        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        let result = DeployResult {
            schema,
            status: "completed".to_string(),
            files_total: files.len(),
            files_applied: files.len(),
            batches_executed,
            duration_seconds: duration,
            started_at,
            completed_at,
        };

        info!(
            "Deploy completed: {} files, {} batches in {:.1}s",
            result.files_applied, result.batches_executed, result.duration_seconds
        );
        Ok(result)
    }

    /// Connectivity check: establish a session, run a probe, release it.
    pub async fn health_check(&self) -> Result<()> {
        let mut session = TiberiusSession::connect(&self.config).await?;
        let outcome = session.execute("SELECT 1").await;
        session.close().await;
        outcome
    }
}

/// The run body, separated from connection management so it can execute
/// against any session.
async fn run_with_session(
    session: &mut dyn SqlSession,
    schema: &str,
    files: &[MigrationFile],
) -> Result<usize> {
    schema::ensure_schema(session, schema).await?;
    schema::ensure_ledger(session, schema).await?;

    if files.is_empty() {
        info!("No migration files found - nothing to deploy");
        return Ok(0);
    }

    wipe::wipe_schema(session, schema).await?;
    ledger::clear(session, schema).await?;

    let mut batches_executed = 0;
    for file in files {
        info!("Applying migration: {}", file.filename);
        let rewritten = rewrite::rewrite_schema_refs(&file.raw_content, schema);
        let batches = batch::split_batches(&rewritten);
        info!("{}: {} batch(es)", file.filename, batches.len());

        batch::execute_batches(session, &file.filename, &batches).await?;
        ledger::record(
            session,
            schema,
            &file.filename,
            &ledger::checksum(&file.raw_content),
        )
        .await?;

        batches_executed += batches.len();
        info!("Migration {} completed", file.filename);
    }

    Ok(batches_executed)
}

impl DeployResult {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
