//! Renderable SQL expression fragments.
//!
//! [`SqlExpr`] is the small polymorphic set of fragments the builders
//! interpolate into clauses: raw text, table-scoped columns, aliases,
//! aggregates, parameter placeholders, and comma-joined lists (the last is
//! what makes `IN (...)` work for any sequence of expressions).

use std::fmt;

use crate::table::Table;

/// A renderable SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    /// Raw passthrough text
    Raw(String),
    /// A column scoped to a table, rendered `alias.name`
    Column { table_alias: String, name: String },
    /// `inner AS alias`
    Aliased(Box<SqlExpr>, String),
    /// `COUNT(inner)`
    Count(Box<SqlExpr>),
    /// A named placeholder, rendered `@name`
    Param(String),
    /// Comma-joined sequence of expressions
    List(Vec<SqlExpr>),
}

impl fmt::Display for SqlExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlExpr::Raw(sql) => f.write_str(sql),
            SqlExpr::Column { table_alias, name } => write!(f, "{}.{}", table_alias, name),
            SqlExpr::Aliased(inner, alias) => write!(f, "{} AS {}", inner, alias),
            SqlExpr::Count(inner) => write!(f, "COUNT({})", inner),
            SqlExpr::Param(name) => write!(f, "@{}", name),
            SqlExpr::List(items) => {
                let parts: Vec<String> = items.iter().map(|e| e.to_string()).collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

/// Raw passthrough expression.
pub fn raw(sql: impl Into<String>) -> SqlExpr {
    SqlExpr::Raw(sql.into())
}

/// A column qualified by `table`'s alias.
pub fn col(table: &Table, name: impl Into<String>) -> SqlExpr {
    SqlExpr::Column {
        table_alias: table.alias().to_string(),
        name: name.into(),
    }
}

/// `inner AS alias`.
pub fn aliased(inner: SqlExpr, alias: impl Into<String>) -> SqlExpr {
    SqlExpr::Aliased(Box::new(inner), alias.into())
}

/// `COUNT(inner)`.
pub fn count(inner: SqlExpr) -> SqlExpr {
    SqlExpr::Count(Box::new(inner))
}

/// A named placeholder; a leading `@` in `name` is accepted and stripped.
pub fn param(name: impl Into<String>) -> SqlExpr {
    let name = name.into();
    let name = name.strip_prefix('@').unwrap_or(&name).to_string();
    SqlExpr::Param(name)
}
