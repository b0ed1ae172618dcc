//! SQL text rendering for catalog objects.
//!
//! Rendering flags are opaque to the rest of the catalog: callers always
//! ask for [`SqlFlags::DEFAULT`] unless they render for a trace.

bitflags::bitflags! {
    /// Flags that affect how identifiers are rendered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SqlFlags: u32 {
        /// Quote every identifier, even ones that would parse unquoted
        const QUOTE_ALL_IDENTIFIERS = 1;
    }
}

impl SqlFlags {
    /// The engine's default flag set
    pub const DEFAULT: SqlFlags = SqlFlags::QUOTE_ALL_IDENTIFIERS;
}

impl Default for SqlFlags {
    fn default() -> Self {
        SqlFlags::DEFAULT
    }
}

// Reserved words of the authorization surface; these always need quotes.
const KEYWORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "ANY", "CREATE", "DROP", "EXISTS", "FROM", "GRANT", "IF", "NOT", "ON",
    "OR", "REVOKE", "ROLE", "SCHEMA", "SELECT", "TABLE", "TO", "USER",
];

/// Render `name` as an SQL identifier.
pub fn quote_identifier(name: &str, flags: SqlFlags) -> String {
    if !flags.contains(SqlFlags::QUOTE_ALL_IDENTIFIERS) && is_simple_identifier(name) {
        return name.to_string();
    }
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render `value` as an SQL string literal.
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn is_simple_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !KEYWORDS.contains(&name)
}
