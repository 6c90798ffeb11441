//! SQL identifier and literal quoting helpers.

/// Quote an MSSQL identifier with brackets.
pub fn quote_ident(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Escape a string for use inside a single-quoted SQL literal.
pub fn quote_str(value: &str) -> String {
    value.replace('\'', "''")
}
