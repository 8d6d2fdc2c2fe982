//! INSERT statement builder.
//!
//! Batches rows against a fixed column schema and renders multi-row VALUES
//! text. Each row's placeholders are suffixed with the row's zero-based index
//! so names stay unique across the batch: `(@a_0, @b_0), (@a_1, @b_1)`.

use crate::command::Statement;
use crate::error::{BuildError, BuildResult};
use crate::param::{DbParameter, ParamExpr};
use crate::schema::{ColumnSet, Row};
use crate::value::SqlValue;

/// Fluent builder for multi-row INSERT statements.
///
/// # Example
/// ```
/// use sqlforge::{ColumnSet, DbType, InsertBuilder, Row};
///
/// let columns = ColumnSet::new()
///     .column("name", DbType::Text)
///     .column("age", DbType::Int);
/// let mut ib = InsertBuilder::new("dbo.users", columns);
/// ib.add_row(Row::new().set("name", "alice").set("age", 30i32)).unwrap();
/// assert_eq!(
///     ib.sql_string().unwrap(),
///     "INSERT INTO dbo.users (name, age) VALUES (@name_0, @age_0)"
/// );
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct InsertBuilder {
    table: String,
    columns: ColumnSet,
    ignore_missing: bool,
    rows: Vec<Row>,
}

impl InsertBuilder {
    /// Create a builder for `table`.
    ///
    /// An empty `columns` set means the first added row fixes the column
    /// list and order from its keys.
    pub fn new(table: impl Into<String>, columns: ColumnSet) -> Self {
        Self {
            table: table.into(),
            columns,
            ignore_missing: false,
            rows: Vec::new(),
        }
    }

    /// Allow later rows to omit declared columns; the omitted values render
    /// as null-sentinel parameters. Unknown columns are never accepted.
    pub fn ignore_missing(&mut self, ignore: bool) -> &mut Self {
        self.ignore_missing = ignore;
        self
    }

    /// Append one row to the batch.
    ///
    /// The first row fixes the column order when no set was declared.
    /// Every row is rejected if it carries a column outside the declared
    /// set; rows after the first are also rejected when they omit a declared
    /// column, unless [`ignore_missing`](Self::ignore_missing) is set.
    pub fn add_row(&mut self, row: Row) -> BuildResult<&mut Self> {
        if self.columns.is_empty() {
            for (name, value) in row.iter() {
                self.columns.push_inferred(name, value.db_type());
            }
        } else {
            for (name, _) in row.iter() {
                if !self.columns.contains(name) {
                    return Err(BuildError::UnknownColumn(name.clone()));
                }
            }
            // only rows after the first are checked for completeness
            let first_row = self.rows.is_empty();
            if !first_row && !self.ignore_missing {
                for name in self.columns.names() {
                    if row.get(name).is_none() {
                        return Err(BuildError::MissingColumn(name.to_string()));
                    }
                }
            }
        }
        self.rows.push(row);
        Ok(self)
    }

    /// Number of batched rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render the statement. Fails when no rows were added.
    pub fn sql_string(&self) -> BuildResult<String> {
        self.render()
    }

    /// Driver-native parameter records in row-major order, missing and null
    /// row values defaulting to the null sentinel.
    pub fn parameters(&self) -> BuildResult<Vec<DbParameter>> {
        Ok(self
            .collect_params()?
            .iter()
            .map(ParamExpr::to_db_parameter)
            .collect())
    }

    fn render(&self) -> BuildResult<String> {
        if self.rows.is_empty() {
            return Err(BuildError::EmptyInsert);
        }
        let cols: Vec<&str> = self.columns.names().collect();
        let mut row_parts = Vec::with_capacity(self.rows.len());
        for idx in 0..self.rows.len() {
            let placeholders: Vec<String> =
                cols.iter().map(|c| format!("@{}_{}", c, idx)).collect();
            row_parts.push(format!("({})", placeholders.join(", ")));
        }
        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.table,
            cols.join(", "),
            row_parts.join(", ")
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, rows = self.rows.len(), "rendered INSERT");
        Ok(sql)
    }

    fn collect_params(&self) -> BuildResult<Vec<ParamExpr>> {
        if self.rows.is_empty() {
            return Err(BuildError::EmptyInsert);
        }
        let mut out = Vec::with_capacity(self.rows.len() * self.columns.len());
        for (idx, row) in self.rows.iter().enumerate() {
            for name in self.columns.names() {
                let spec = self.columns.get(name);
                let value = row.get(name).cloned().unwrap_or(SqlValue::Null);
                let mut p = ParamExpr::new(format!("{}_{}", name, idx));
                match spec.and_then(|s| s.ty) {
                    Some(ty) => p.bind_typed(ty, value),
                    None => p.bind(value),
                }
                if let Some(len) = spec.and_then(|s| s.max_len) {
                    p = p.sized(len);
                }
                out.push(p);
            }
        }
        Ok(out)
    }
}

impl Statement for InsertBuilder {
    fn sql_string(&self) -> BuildResult<String> {
        self.render()
    }

    fn parameter_exprs(&self) -> BuildResult<Vec<ParamExpr>> {
        self.collect_params()
    }
}
