//! Table references and column path parsing.

use std::fmt;

use crate::error::{BuildError, BuildResult};

/// A table reference: name plus alias.
///
/// The alias defaults to the last dot-segment of the name, so `dbo.users`
/// aliases to `users` unless an explicit alias is given. Immutable after
/// construction; two references are the same table when name and alias both
/// match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    alias: String,
}

impl Table {
    /// Create a table reference with the default alias.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let alias = name.rsplit('.').next().unwrap_or(&name).to_string();
        Self { name, alias }
    }

    /// Create a table reference with an explicit alias.
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
        }
    }

    /// The full table name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alias columns are qualified with.
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.alias)
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Table::new(name)
    }
}

impl From<String> for Table {
    fn from(name: String) -> Self {
        Table::new(name)
    }
}

impl From<(&str, &str)> for Table {
    fn from((name, alias): (&str, &str)) -> Self {
        Table::aliased(name, alias)
    }
}

/// A column reference as written by the caller: optional alias qualifier plus
/// the column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnPath {
    pub alias: Option<String>,
    pub name: String,
}

/// Split `"name"` or `"alias.name"`; more than one `.` is rejected before any
/// builder state is touched.
pub(crate) fn parse_column_path(input: &str) -> BuildResult<ColumnPath> {
    if input.is_empty() {
        return Err(BuildError::identifier(input, "column name cannot be empty"));
    }

    let mut parts = input.split('.');
    let first = parts.next().unwrap_or_default();
    let second = parts.next();
    if parts.next().is_some() {
        return Err(BuildError::identifier(
            input,
            "column reference may contain at most one '.'",
        ));
    }

    match second {
        None => Ok(ColumnPath {
            alias: None,
            name: first.to_string(),
        }),
        Some(name) => {
            if first.is_empty() || name.is_empty() {
                return Err(BuildError::identifier(
                    input,
                    "alias and column name must both be non-empty",
                ));
            }
            Ok(ColumnPath {
                alias: Some(first.to_string()),
                name: name.to_string(),
            })
        }
    }
}
