//! UPDATE statement builder.
//!
//! Renders `UPDATE table SET table.col = @<table>_col, ...` from a single
//! row validated against a declared column set. The parameter name embeds
//! the table name with separators stripped (`dbo.Test` → `dboTest`) so names
//! stay unique when several update statements coexist in one command batch.

use crate::command::Statement;
use crate::condition::{Condition, ConditionSet};
use crate::error::{BuildError, BuildResult};
use crate::param::{DbParameter, ParamExpr, strip_separators};
use crate::schema::{ColumnSet, Row};

/// Fluent builder for single-row UPDATE statements.
///
/// # Example
/// ```
/// use sqlforge::{ColumnSet, DbType, Row, UpdateBuilder};
///
/// let columns = ColumnSet::new().column("Content", DbType::Text);
/// let ub = UpdateBuilder::new("dbo.Test", columns, Row::new().set("Content", "foo"));
/// assert_eq!(
///     ub.sql_string().unwrap(),
///     "UPDATE dbo.Test SET dbo.Test.Content = @dboTest_Content"
/// );
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateBuilder {
    table: String,
    columns: ColumnSet,
    row: Row,
    where_set: ConditionSet,
}

impl UpdateBuilder {
    /// Create a builder updating `table` with `row`'s values.
    pub fn new(table: impl Into<String>, columns: ColumnSet, row: Row) -> Self {
        Self {
            table: table.into(),
            columns,
            row,
            where_set: ConditionSet::new(),
        }
    }

    /// Append raw WHERE text; `@identifier` placeholders are
    /// auto-discovered.
    pub fn where_raw(&mut self, sql: &str) -> &mut Self {
        self.where_set.push(Condition::raw(sql));
        self
    }

    /// Append raw WHERE text with explicitly supplied parameters.
    pub fn where_raw_with(&mut self, sql: &str, params: Vec<ParamExpr>) -> &mut Self {
        self.where_set.push(Condition::raw_with(sql, params));
        self
    }

    /// Append a pre-built condition subset.
    pub fn where_set(&mut self, set: ConditionSet) -> &mut Self {
        self.where_set.push(Condition::Nested(set));
        self
    }

    /// Render the statement.
    pub fn sql_string(&self) -> BuildResult<String> {
        self.render()
    }

    /// Driver-native parameter records: SET parameters in row order, then
    /// WHERE parameters.
    pub fn parameters(&self) -> BuildResult<Vec<DbParameter>> {
        Ok(self
            .collect_params()?
            .iter()
            .map(ParamExpr::to_db_parameter)
            .collect())
    }

    fn validate(&self) -> BuildResult<()> {
        if self.row.is_empty() {
            return Err(BuildError::EmptyUpdate);
        }
        for (name, _) in self.row.iter() {
            if !self.columns.contains(name) {
                return Err(BuildError::UnknownColumn(name.clone()));
            }
        }
        Ok(())
    }

    fn param_name(&self, column: &str) -> String {
        format!("{}_{}", strip_separators(&self.table), column)
    }

    fn render(&self) -> BuildResult<String> {
        self.validate()?;
        let set_parts: Vec<String> = self
            .row
            .columns()
            .map(|c| format!("{}.{} = @{}", self.table, c, self.param_name(c)))
            .collect();
        let mut sql = format!("UPDATE {} SET {}", self.table, set_parts.join(", "));
        if !self.where_set.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_set.to_string());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, "rendered UPDATE");
        Ok(sql)
    }

    fn collect_params(&self) -> BuildResult<Vec<ParamExpr>> {
        self.validate()?;
        let mut out = Vec::with_capacity(self.row.len());
        for (name, value) in self.row.iter() {
            let spec = self.columns.get(name);
            let mut p = ParamExpr::new(self.param_name(name));
            match spec.and_then(|s| s.ty) {
                Some(ty) => p.bind_typed(ty, value.clone()),
                None => p.bind(value.clone()),
            }
            if let Some(len) = spec.and_then(|s| s.max_len) {
                p = p.sized(len);
            }
            out.push(p);
        }
        out.extend(self.where_set.param_exprs().into_iter().cloned());
        Ok(out)
    }
}

impl Statement for UpdateBuilder {
    fn sql_string(&self) -> BuildResult<String> {
        self.render()
    }

    fn parameter_exprs(&self) -> BuildResult<Vec<ParamExpr>> {
        self.collect_params()
    }
}
