//! Isolated schema and ledger table setup.
//!
//! Both operations are idempotent `IF NOT EXISTS` guards and are safe to run
//! on every deploy. An existing conforming schema or table is never altered.

use crate::error::{DeployError, Result};
use crate::ident::{quote_ident, quote_str};
use crate::ledger::LEDGER_TABLE;
use crate::session::SqlSession;
use tracing::info;

/// Create the isolated schema if it does not exist yet.
pub async fn ensure_schema(session: &mut dyn SqlSession, schema: &str) -> Result<()> {
    let sql = format!(
        "IF NOT EXISTS (SELECT * FROM sys.schemas WHERE name = '{lit}')
         BEGIN
             EXEC('CREATE SCHEMA {ident}')
         END",
        lit = quote_str(schema),
        ident = quote_str(&quote_ident(schema)),
    );

    session
        .execute(&sql)
        .await
        .map_err(|e| DeployError::SchemaSetup(format!("creating schema {}: {}", schema, e)))?;

    info!("Schema [{}] ready", schema);
    Ok(())
}

/// Create the `migrations` ledger table inside the schema if absent.
pub async fn ensure_ledger(session: &mut dyn SqlSession, schema: &str) -> Result<()> {
    let sql = format!(
        "IF NOT EXISTS (SELECT * FROM sys.tables WHERE name = '{table}' AND schema_id = SCHEMA_ID('{lit}'))
         BEGIN
             CREATE TABLE {ident}.{table_ident} (
                 [id] INT IDENTITY(1,1) PRIMARY KEY,
                 [filename] NVARCHAR(255) NOT NULL UNIQUE,
                 [executed_at] DATETIME2 NOT NULL DEFAULT GETUTCDATE(),
                 [checksum] NVARCHAR(64) NOT NULL
             )
         END",
        table = LEDGER_TABLE,
        lit = quote_str(schema),
        ident = quote_ident(schema),
        table_ident = quote_ident(LEDGER_TABLE),
    );

    session
        .execute(&sql)
        .await
        .map_err(|e| DeployError::SchemaSetup(format!("creating ledger table: {}", e)))?;

    info!("Migration ledger table ready in [{}]", schema);
    Ok(())
}
