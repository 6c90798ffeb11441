//! Batch splitting and sequential execution.
//!
//! A script is divided wherever a line, after trimming, is the `GO` separator
//! (case-insensitive). The separator is a client-side convention, not SQL, so
//! it must never reach the server.

use crate::error::{DeployError, Result};
use crate::session::SqlSession;
use tracing::debug;

/// Split a rewritten script into trimmed, non-empty batches.
pub fn split_batches(script: &str) -> Vec<String> {
    let mut batches = Vec::new();
    let mut current = String::new();

    for line in script.lines() {
        if line.trim().eq_ignore_ascii_case("GO") {
            flush(&mut batches, &mut current);
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    flush(&mut batches, &mut current);

    batches
}

fn flush(batches: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        batches.push(trimmed.to_string());
    }
    current.clear();
}

/// Execute the batches of one file strictly in order on a single session.
/// Stops at the first failure; the error names the file and the 1-based
/// batch index.
pub async fn execute_batches(
    session: &mut dyn SqlSession,
    filename: &str,
    batches: &[String],
) -> Result<()> {
    for (idx, batch) in batches.iter().enumerate() {
        session
            .execute(batch)
            .await
            .map_err(|e| DeployError::BatchExecution {
                file: filename.to_string(),
                batch: idx + 1,
                message: e.to_string(),
            })?;
        debug!("{}: batch {}/{} executed", filename, idx + 1, batches.len());
    }
    Ok(())
}
