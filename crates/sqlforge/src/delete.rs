//! DELETE statement builder.

use crate::command::Statement;
use crate::condition::{Condition, ConditionSet};
use crate::error::BuildResult;
use crate::param::{DbParameter, ParamExpr};

/// Fluent builder for DELETE statements.
///
/// Parameters come solely from the WHERE condition set.
///
/// # Example
/// ```
/// use sqlforge::DeleteBuilder;
///
/// let mut db = DeleteBuilder::new("dbo.users");
/// db.where_raw("id = @id");
/// assert_eq!(db.sql_string().unwrap(), "DELETE FROM dbo.users WHERE (id = @id)");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct DeleteBuilder {
    table: String,
    where_set: ConditionSet,
}

impl DeleteBuilder {
    /// Create a builder deleting from `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
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

    /// Render the statement; WHERE is omitted while the set is empty.
    pub fn sql_string(&self) -> BuildResult<String> {
        self.render()
    }

    /// Driver-native parameter records from the WHERE condition set.
    pub fn parameters(&self) -> Vec<DbParameter> {
        self.where_set
            .param_exprs()
            .iter()
            .map(|p| p.to_db_parameter())
            .collect()
    }

    fn render(&self) -> BuildResult<String> {
        let mut sql = format!("DELETE FROM {}", self.table);
        if !self.where_set.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_set.to_string());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, "rendered DELETE");
        Ok(sql)
    }
}

impl Statement for DeleteBuilder {
    fn sql_string(&self) -> BuildResult<String> {
        self.render()
    }

    fn parameter_exprs(&self) -> BuildResult<Vec<ParamExpr>> {
        Ok(self.where_set.param_exprs().into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    #[test]
    fn test_delete_without_where() {
        let db = DeleteBuilder::new("dbo.users");
        assert_eq!(db.sql_string().unwrap(), "DELETE FROM dbo.users");
        assert!(db.parameters().is_empty());
    }

    #[test]
    fn test_delete_with_where_parameters() {
        let mut db = DeleteBuilder::new("dbo.users");
        db.where_raw_with(
            "id = @id",
            vec![ParamExpr::with_value("id", 9i64)],
        );
        assert_eq!(
            db.sql_string().unwrap(),
            "DELETE FROM dbo.users WHERE (id = @id)"
        );
        let params = db.parameters();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].value, SqlValue::I64(9));
    }
}
