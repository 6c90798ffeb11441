//! Schema-qualifier rewriting.
//!
//! Migration scripts are authored against the default `dbo` schema; before
//! execution every `dbo.` qualifier is rewritten to the isolated schema and
//! embedded `CREATE SCHEMA` statements are neutralized (schema lifecycle is
//! owned by [`crate::schema`]).
//!
//! This is a textual transform, not a SQL parser: qualifiers inside string
//! literals or comments are rewritten too. Known limitation, kept on purpose.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static BRACKETED_DBO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[dbo\]\.").unwrap());
static BARE_DBO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bdbo\.").unwrap());
static CREATE_SCHEMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CREATE\s+SCHEMA\s+\[?\w+\]?\s*;?").unwrap());

const SCHEMA_REMOVED_COMMENT: &str =
    "-- Schema creation removed (managed by the deploy runner)";

/// Rewrite all `dbo` qualifiers in `content` to the isolated schema and strip
/// explicit schema-creation statements.
pub fn rewrite_schema_refs(content: &str, schema: &str) -> String {
    let replacement = format!("[{}].", schema);
    let rewritten = BRACKETED_DBO.replace_all(content, NoExpand(&replacement));
    let rewritten = BARE_DBO.replace_all(&rewritten, NoExpand(&replacement));
    CREATE_SCHEMA
        .replace_all(&rewritten, SCHEMA_REMOVED_COMMENT)
        .into_owned()
}
