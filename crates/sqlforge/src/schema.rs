//! Declared column schemas and row value sets for INSERT and UPDATE targets.

use serde::Serialize;

use crate::value::{DbType, SqlValue};

/// Declared column: type hint plus optional maximum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Type hint; `None` when inferred from a `Null` row value
    pub ty: Option<DbType>,
    /// Maximum length, if declared
    pub max_len: Option<usize>,
}

/// Ordered mapping of column name to declared type/size.
///
/// Defines the legal columns for an insert or update target. Once rows are
/// validated against it the column list is fixed, either declared up front
/// or inferred from the first row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    columns: Vec<(String, ColumnSpec)>,
}

impl ColumnSet {
    /// Create an empty set (columns will be inferred from the first row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a column with a type hint.
    pub fn column(mut self, name: impl Into<String>, ty: DbType) -> Self {
        self.columns.push((
            name.into(),
            ColumnSpec {
                ty: Some(ty),
                max_len: None,
            },
        ));
        self
    }

    /// Declare a column with a type hint and maximum length.
    pub fn column_sized(mut self, name: impl Into<String>, ty: DbType, max_len: usize) -> Self {
        self.columns.push((
            name.into(),
            ColumnSpec {
                ty: Some(ty),
                max_len: Some(max_len),
            },
        ));
        self
    }

    pub(crate) fn push_inferred(&mut self, name: &str, ty: Option<DbType>) {
        self.columns.push((
            name.to_string(),
            ColumnSpec { ty, max_len: None },
        ));
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(c, _)| c == name)
    }

    /// Look up a declared column.
    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|(c, _)| c == name).map(|(_, s)| s)
    }

    /// Declared column names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(c, _)| c.as_str())
    }

    /// Number of declared columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One row of column-to-value assignments.
///
/// Setting the same column twice overwrites in place (map semantics with
/// insertion order preserved).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<(String, SqlValue)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        let column = column.into();
        let value = value.into();
        if let Some(entry) = self.values.iter_mut().find(|(c, _)| *c == column) {
            entry.1 = value;
        } else {
            self.values.push((column, value));
        }
        self
    }

    /// Set a column to a JSON-serialized value.
    pub fn set_json<T: Serialize>(self, column: &str, value: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_value(value)?;
        Ok(self.set(column, json))
    }

    /// Get a column's value, if set.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(c, _)| c.as_str())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(String, SqlValue)> {
        self.values.iter()
    }

    /// Number of set columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no columns are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_set_preserves_order() {
        let set = ColumnSet::new()
            .column("id", DbType::BigInt)
            .column_sized("name", DbType::Text, 64);
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(set.get("name").unwrap().max_len, Some(64));
    }

    #[test]
    fn test_row_set_overwrites() {
        let row = Row::new().set("a", 1i32).set("b", 2i32).set("a", 3i32);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("a"), Some(&SqlValue::I32(3)));
        let cols: Vec<&str> = row.columns().collect();
        assert_eq!(cols, vec!["a", "b"]);
    }

    #[test]
    fn test_row_set_json() {
        #[derive(Serialize)]
        struct Payload {
            kind: &'static str,
        }

        let row = Row::new()
            .set_json("meta", &Payload { kind: "audit" })
            .unwrap();
        match row.get("meta") {
            Some(SqlValue::Json(v)) => assert_eq!(v["kind"], "audit"),
            other => panic!("expected json value, got {:?}", other),
        }
    }
}
