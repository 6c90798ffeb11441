//! Dependency-ordered teardown of the isolated schema.
//!
//! Objects are dropped in tiers, least-depended-upon first: stored
//! procedures, views, functions, triggers, foreign-key constraints, then
//! tables (minus the ledger table). Failures in the first four tiers leave
//! nothing behind that blocks table recreation, so they only log a warning;
//! a failed constraint or table drop leaves the schema half-wiped and aborts
//! the run. Failed non-fatal drops are not retried.

use crate::error::{DeployError, Result};
use crate::ident::{quote_ident, quote_str};
use crate::ledger::LEDGER_TABLE;
use crate::session::SqlSession;
use tracing::{info, warn};

/// Kind of schema object, in drop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    StoredProcedure,
    View,
    Function,
    Trigger,
    ForeignKey,
    Table,
}

impl ObjectKind {
    /// Human-readable label used in logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::StoredProcedure => "stored procedure",
            ObjectKind::View => "view",
            ObjectKind::Function => "function",
            ObjectKind::Trigger => "trigger",
            ObjectKind::ForeignKey => "foreign key",
            ObjectKind::Table => "table",
        }
    }

    /// Whether a failed drop of this kind aborts the run. Leftover
    /// procedures or views only make a later CREATE fail loudly; leftover
    /// constraints or tables silently collide with recreation.
    pub fn fatal(&self) -> bool {
        matches!(self, ObjectKind::ForeignKey | ObjectKind::Table)
    }
}

/// Drop tiers in dependency order.
const DROP_ORDER: [ObjectKind; 6] = [
    ObjectKind::StoredProcedure,
    ObjectKind::View,
    ObjectKind::Function,
    ObjectKind::Trigger,
    ObjectKind::ForeignKey,
    ObjectKind::Table,
];

/// A droppable object discovered from catalog metadata. Recomputed on every
/// run, never persisted.
#[derive(Debug, Clone)]
pub struct DependentObject {
    pub schema: String,
    pub name: String,
    pub kind: ObjectKind,
    /// Parent table, set for foreign keys (needed for `ALTER TABLE`).
    pub parent_table: Option<String>,
}

impl DependentObject {
    /// The DROP statement for this object.
    fn drop_sql(&self) -> String {
        let schema = quote_ident(&self.schema);
        let name = quote_ident(&self.name);
        match self.kind {
            ObjectKind::StoredProcedure => format!("DROP PROCEDURE {}.{}", schema, name),
            ObjectKind::View => format!("DROP VIEW {}.{}", schema, name),
            ObjectKind::Function => format!("DROP FUNCTION {}.{}", schema, name),
            ObjectKind::Trigger => format!("DROP TRIGGER {}.{}", schema, name),
            ObjectKind::ForeignKey => {
                let table = quote_ident(self.parent_table.as_deref().unwrap_or_default());
                format!("ALTER TABLE {}.{} DROP CONSTRAINT {}", schema, table, name)
            }
            ObjectKind::Table => format!("DROP TABLE {}.{}", schema, name),
        }
    }
}

/// Catalog query listing all objects of one kind inside the schema. Every
/// query filters on the schema name, so no other tenant's objects are ever
/// enumerated.
fn discovery_sql(kind: ObjectKind, schema: &str) -> String {
    let lit = quote_str(schema);
    match kind {
        ObjectKind::StoredProcedure => format!(
            "SELECT SCHEMA_NAME(schema_id), name
             FROM sys.procedures
             WHERE is_ms_shipped = 0
               AND SCHEMA_NAME(schema_id) = '{lit}'"
        ),
        ObjectKind::View => format!(
            "SELECT TABLE_SCHEMA, TABLE_NAME
             FROM INFORMATION_SCHEMA.VIEWS
             WHERE TABLE_SCHEMA = '{lit}'"
        ),
        ObjectKind::Function => format!(
            "SELECT SCHEMA_NAME(schema_id), name
             FROM sys.objects
             WHERE type IN ('FN', 'IF', 'TF')
               AND is_ms_shipped = 0
               AND SCHEMA_NAME(schema_id) = '{lit}'"
        ),
        ObjectKind::Trigger => format!(
            "SELECT OBJECT_SCHEMA_NAME(parent_id), name
             FROM sys.triggers
             WHERE is_ms_shipped = 0
               AND parent_id != 0
               AND OBJECT_SCHEMA_NAME(parent_id) = '{lit}'"
        ),
        ObjectKind::ForeignKey => format!(
            "SELECT OBJECT_SCHEMA_NAME(fk.parent_object_id),
                    fk.name,
                    OBJECT_NAME(fk.parent_object_id)
             FROM sys.foreign_keys fk
             WHERE OBJECT_SCHEMA_NAME(fk.parent_object_id) = '{lit}'"
        ),
        ObjectKind::Table => format!(
            "SELECT TABLE_SCHEMA, TABLE_NAME
             FROM INFORMATION_SCHEMA.TABLES
             WHERE TABLE_TYPE = 'BASE TABLE'
               AND TABLE_SCHEMA = '{lit}'
               AND TABLE_NAME != '{ledger}'",
            ledger = LEDGER_TABLE,
        ),
    }
}

/// Decode catalog rows into typed objects. Row shape is `[schema, name]`,
/// plus a trailing parent table column for foreign keys.
fn decode(kind: ObjectKind, rows: Vec<Vec<String>>) -> Vec<DependentObject> {
    rows.into_iter()
        .filter(|row| row.len() >= 2)
        .map(|mut row| {
            let parent_table = if kind == ObjectKind::ForeignKey && row.len() >= 3 {
                Some(row.remove(2))
            } else {
                None
            };
            let name = row.remove(1);
            let schema = row.remove(0);
            DependentObject {
                schema,
                name,
                kind,
                parent_table,
            }
        })
        .collect()
}

/// Discover and drop all objects of one tier.
async fn drop_tier(session: &mut dyn SqlSession, schema: &str, kind: ObjectKind) -> Result<()> {
    let objects = decode(kind, session.query_rows(&discovery_sql(kind, schema)).await?);

    if objects.is_empty() {
        info!("No {}s to drop", kind.label());
        return Ok(());
    }

    info!("Dropping {} {}(s)", objects.len(), kind.label());
    for obj in objects {
        match session.execute(&obj.drop_sql()).await {
            Ok(()) => info!("Dropped {}: {}", kind.label(), obj.name),
            Err(e) if kind.fatal() => {
                return Err(DeployError::Drop {
                    kind: kind.label(),
                    object: obj.name,
                    message: e.to_string(),
                });
            }
            Err(e) => {
                warn!("Failed to drop {} {}: {}", kind.label(), obj.name, e);
            }
        }
    }
    Ok(())
}

/// Bring the isolated schema to an empty state, save for the ledger table.
/// Other schemas are never touched.
pub async fn wipe_schema(session: &mut dyn SqlSession, schema: &str) -> Result<()> {
    info!("Wiping all objects from schema [{}]", schema);
    for kind in DROP_ORDER {
        drop_tier(session, schema, kind).await?;
    }
    info!("Schema [{}] wiped", schema);
    Ok(())
}
