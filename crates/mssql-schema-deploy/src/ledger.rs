//! Checksum ledger.
//!
//! One row per successfully applied file, written only after the file's last
//! batch succeeds. The ledger is cleared at the start of every replace-mode
//! run: it is an audit trail of the latest full rebuild, not an
//! incremental-apply ledger.

use crate::error::Result;
use crate::ident::{quote_ident, quote_str};
use crate::session::SqlSession;
use sha2::{Digest, Sha256};
use tracing::info;

/// Name of the ledger table inside each isolated schema.
pub const LEDGER_TABLE: &str = "migrations";

/// SHA-256 hex digest of a file's raw, pre-rewrite content.
pub fn checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Delete all ledger rows for the schema.
pub async fn clear(session: &mut dyn SqlSession, schema: &str) -> Result<()> {
    let sql = format!(
        "DELETE FROM {}.{}",
        quote_ident(schema),
        quote_ident(LEDGER_TABLE)
    );
    session.execute(&sql).await?;
    info!("Migration history cleared for [{}]", schema);
    Ok(())
}

/// Record one applied file. `executed_at` is server-generated.
pub async fn record(
    session: &mut dyn SqlSession,
    schema: &str,
    filename: &str,
    checksum: &str,
) -> Result<()> {
    let sql = format!(
        "INSERT INTO {schema}.{table} (filename, checksum) VALUES (N'{filename}', '{checksum}')",
        schema = quote_ident(schema),
        table = quote_ident(LEDGER_TABLE),
        filename = quote_str(filename),
        checksum = quote_str(checksum),
    );
    session.execute(&sql).await?;
    Ok(())
}
