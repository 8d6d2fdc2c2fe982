//! SELECT statement assembly engine.
//!
//! [`SelectBuilder`] accumulates FROM/JOIN/WHERE/GROUP/ORDER/SELECT clauses
//! through chainable calls, resolves column references against known table
//! aliases, enforces that joins form a left-to-right referential chain, and
//! renders the final query deterministically while tracking every parameter
//! placeholder the clauses mention.
//!
//! Rendering is a pure projection of current state and can be repeated; the
//! one exception is [`single_select_sql`](SelectBuilder::single_select_sql),
//! which swaps the SELECT clause in and out around the render.

use crate::clause::{
    FromClause, GroupClause, JoinClause, JoinKind, OrderClause, OrderDir, SelectClause, SetMode,
    WhereClause,
};
use crate::command::Statement;
use crate::compare::CompareOp;
use crate::condition::{Condition, ConditionSet};
use crate::error::{BuildError, BuildResult};
use crate::expr::{SqlExpr, col};
use crate::param::{DbParameter, ParamExpr, strip_separators};
use crate::table::{Table, parse_column_path};
use crate::value::{DbType, SqlValue};

/// Fluent builder for SELECT statements.
///
/// Mutating calls return `&mut Self` (or `BuildResult<&mut Self>` where the
/// call validates state) so chains read naturally; a failing call leaves the
/// builder as it was.
///
/// # Example
/// ```
/// use sqlforge::{SelectBuilder, Table};
///
/// let mut qb = SelectBuilder::new();
/// qb.from(Table::aliased("dbo.users", "u"));
/// qb.select("name").unwrap();
/// qb.where_raw("u.age > @min_age");
/// assert_eq!(
///     qb.sql_string().unwrap(),
///     "SELECT u.name FROM dbo.users u WHERE (u.age > @min_age)"
/// );
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SelectBuilder {
    select: SelectClause,
    from: FromClause,
    joins: Vec<JoinClause>,
    where_clause: WhereClause,
    group: GroupClause,
    order: OrderClause,
    /// Parameters registered outside any clause via `bind_or_register`
    extra_params: Vec<ParamExpr>,
}

impl SelectBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== FROM ====================

    /// Append a table to the FROM list.
    pub fn from(&mut self, table: impl Into<Table>) -> &mut Self {
        self.from.push(table.into());
        self
    }

    /// Append a table to the FROM list and select `columns` qualified by it.
    pub fn from_cols(&mut self, table: impl Into<Table>, columns: &[&str]) -> &mut Self {
        let table = table.into();
        for c in columns {
            self.select.add(col(&table, *c));
        }
        self.from.push(table);
        self
    }

    // ==================== SELECT ====================

    /// Add one column to the SELECT list.
    ///
    /// Bare names resolve against the first FROM table; `"alias.name"`
    /// resolves against any table known from FROM or a JOIN. More than one
    /// `.` is rejected before any state changes.
    pub fn select(&mut self, column: &str) -> BuildResult<&mut Self> {
        self.select_with(&[column], SetMode::Add)
    }

    /// Add several columns to the SELECT list.
    pub fn select_cols(&mut self, columns: &[&str]) -> BuildResult<&mut Self> {
        self.select_with(columns, SetMode::Add)
    }

    /// Add or overwrite the SELECT list.
    pub fn select_with(&mut self, columns: &[&str], mode: SetMode) -> BuildResult<&mut Self> {
        // resolve everything up front so a failure mutates nothing
        let exprs = columns
            .iter()
            .map(|c| self.resolve_column(c))
            .collect::<BuildResult<Vec<_>>>()?;
        if mode == SetMode::Overwrite {
            self.select.clear();
        }
        for e in exprs {
            self.select.add(e);
        }
        Ok(self)
    }

    /// Add an arbitrary expression to the SELECT list.
    pub fn select_expr(&mut self, expr: SqlExpr) -> &mut Self {
        self.select.add(expr);
        self
    }

    /// Render `SELECT DISTINCT`.
    pub fn distinct(&mut self) -> &mut Self {
        self.select.distinct = true;
        self
    }

    // ==================== JOIN ====================

    /// Add a join with a raw ON clause.
    ///
    /// The clause text is scanned for `@identifier` placeholders exactly like
    /// WHERE text.
    pub fn join(&mut self, kind: JoinKind, table: impl Into<Table>, on: &str) -> &mut Self {
        let mut set = ConditionSet::new();
        set.push(Condition::raw(on));
        self.joins.push(JoinClause {
            kind,
            table: table.into(),
            on: set,
        });
        self
    }

    /// Add a join with a raw ON clause and explicitly supplied parameters
    /// (no scanning).
    pub fn join_with_params(
        &mut self,
        kind: JoinKind,
        table: impl Into<Table>,
        on: &str,
        params: Vec<ParamExpr>,
    ) -> &mut Self {
        let mut set = ConditionSet::new();
        set.push(Condition::raw_with(on, params));
        self.joins.push(JoinClause {
            kind,
            table: table.into(),
            on: set,
        });
        self
    }

    /// Add a join with a pre-built ON condition set.
    pub fn join_set(&mut self, kind: JoinKind, table: impl Into<Table>, on: ConditionSet) -> &mut Self {
        self.joins.push(JoinClause {
            kind,
            table: table.into(),
            on,
        });
        self
    }

    /// Add a join with a raw ON clause and select `columns` qualified by the
    /// join target.
    pub fn join_select(
        &mut self,
        kind: JoinKind,
        table: impl Into<Table>,
        on: &str,
        columns: &[&str],
    ) -> &mut Self {
        let target = table.into();
        for c in columns {
            self.select.add(col(&target, *c));
        }
        self.join(kind, target, on)
    }

    /// Add a join on a column equality pair.
    ///
    /// `left` must reference a table already present in FROM or an earlier
    /// JOIN, so joins form a connected, left-to-right referential chain.
    /// `right` is resolved against the join target (bare, or qualified with
    /// the target's alias).
    pub fn join_cols(
        &mut self,
        kind: JoinKind,
        table: impl Into<Table>,
        left: &str,
        right: &str,
    ) -> BuildResult<&mut Self> {
        let target = table.into();

        let lp = parse_column_path(left)?;
        let left_expr = match lp.alias {
            Some(alias) => {
                let t = self
                    .table_by_alias(&alias)
                    .ok_or_else(|| BuildError::JoinOrder(alias.clone()))?;
                col(t, lp.name)
            }
            None => {
                let t = self.from.first().ok_or(BuildError::MissingFrom)?;
                col(t, lp.name)
            }
        };

        let rp = parse_column_path(right)?;
        if let Some(alias) = rp.alias {
            if alias != target.alias() {
                return Err(BuildError::UnknownAlias(alias));
            }
        }
        let right_expr = col(&target, rp.name);

        let mut on = ConditionSet::new();
        on.push(Condition::compare(left_expr, CompareOp::Equals, right_expr));
        self.joins.push(JoinClause {
            kind,
            table: target,
            on,
        });
        Ok(self)
    }

    /// `INNER JOIN` with a raw ON clause.
    pub fn inner_join(&mut self, table: impl Into<Table>, on: &str) -> &mut Self {
        self.join(JoinKind::Inner, table, on)
    }

    /// `LEFT JOIN` with a raw ON clause.
    pub fn left_join(&mut self, table: impl Into<Table>, on: &str) -> &mut Self {
        self.join(JoinKind::Left, table, on)
    }

    /// `RIGHT JOIN` with a raw ON clause.
    pub fn right_join(&mut self, table: impl Into<Table>, on: &str) -> &mut Self {
        self.join(JoinKind::Right, table, on)
    }

    /// `OUTER JOIN` with a raw ON clause.
    pub fn outer_join(&mut self, table: impl Into<Table>, on: &str) -> &mut Self {
        self.join(JoinKind::Outer, table, on)
    }

    // ==================== WHERE ====================

    /// Append raw WHERE text; `@identifier` placeholders are auto-discovered.
    pub fn where_raw(&mut self, sql: &str) -> &mut Self {
        self.where_clause.set.push(Condition::raw(sql));
        self
    }

    /// Append raw WHERE text with explicitly supplied parameters.
    pub fn where_raw_with(&mut self, sql: &str, params: Vec<ParamExpr>) -> &mut Self {
        self.where_clause.set.push(Condition::raw_with(sql, params));
        self
    }

    /// Append `column = value`, creating and binding an implicit parameter.
    pub fn where_value(
        &mut self,
        column: &str,
        value: impl Into<SqlValue>,
    ) -> BuildResult<&mut Self> {
        self.where_value_op(column, CompareOp::Equals, value)
    }

    /// Append `column <op> value`, creating and binding an implicit
    /// parameter named `<alias>_<column>` (separator-stripped, de-duplicated
    /// with a numeric suffix on collision).
    pub fn where_value_op(
        &mut self,
        column: &str,
        op: CompareOp,
        value: impl Into<SqlValue>,
    ) -> BuildResult<&mut Self> {
        let (alias, name) = self.resolve_path(column)?;
        let pname = self.implicit_param_name(&alias, &name);
        let left = SqlExpr::Column {
            table_alias: alias,
            name,
        };
        let param = ParamExpr::with_value(pname, value);
        self.where_clause
            .set
            .push(Condition::compare_param(left, op, param));
        Ok(self)
    }

    /// Append `left = right` over two column references.
    pub fn where_columns(&mut self, left: &str, right: &str) -> BuildResult<&mut Self> {
        self.where_columns_op(left, CompareOp::Equals, right)
    }

    /// Append `left <op> right` over two column references.
    pub fn where_columns_op(
        &mut self,
        left: &str,
        op: CompareOp,
        right: &str,
    ) -> BuildResult<&mut Self> {
        let (la, ln) = self.resolve_path(left)?;
        let (ra, rn) = self.resolve_path(right)?;
        self.where_clause.set.push(Condition::compare(
            SqlExpr::Column {
                table_alias: la,
                name: ln,
            },
            op,
            SqlExpr::Column {
                table_alias: ra,
                name: rn,
            },
        ));
        Ok(self)
    }

    /// Append a nested condition subset (AND-connected to the previous
    /// entry).
    pub fn where_set(&mut self, set: ConditionSet) -> &mut Self {
        self.where_clause.set.push(Condition::Nested(set));
        self
    }

    // ==================== GROUP / ORDER ====================

    /// Append GROUP BY column names (rendered in order, duplicates removed;
    /// names are not validated against FROM tables).
    pub fn group_by(&mut self, columns: &[&str]) -> &mut Self {
        for c in columns {
            self.group.push(*c);
        }
        self
    }

    /// Append an ascending ORDER BY column.
    pub fn order_by(&mut self, column: &str) -> BuildResult<&mut Self> {
        self.order_by_with(column, OrderDir::Asc, SetMode::Add)
    }

    /// Append a descending ORDER BY column.
    pub fn order_by_desc(&mut self, column: &str) -> BuildResult<&mut Self> {
        self.order_by_with(column, OrderDir::Desc, SetMode::Add)
    }

    /// Add or overwrite ORDER BY entries.
    ///
    /// Re-adding an already-ordered column updates its direction in place;
    /// `Overwrite` clears all prior entries first.
    pub fn order_by_with(
        &mut self,
        column: &str,
        dir: OrderDir,
        mode: SetMode,
    ) -> BuildResult<&mut Self> {
        let (alias, name) = self.resolve_path(column)?;
        if mode == SetMode::Overwrite {
            self.order.clear();
        }
        self.order.set(format!("{}.{}", alias, name), dir);
        Ok(self)
    }

    /// Add or overwrite an ORDER BY entry from an explicit column
    /// expression; the column's table must be present in FROM or a JOIN.
    pub fn order_by_expr(
        &mut self,
        expr: SqlExpr,
        dir: OrderDir,
        mode: SetMode,
    ) -> BuildResult<&mut Self> {
        let (table_alias, name) = match expr {
            SqlExpr::Column { table_alias, name } => (table_alias, name),
            other => {
                return Err(BuildError::identifier(
                    other.to_string(),
                    "ORDER BY requires a column expression",
                ));
            }
        };
        if self.table_by_alias(&table_alias).is_none() {
            return Err(BuildError::UnknownAlias(table_alias));
        }
        if mode == SetMode::Overwrite {
            self.order.clear();
        }
        self.order.set(format!("{}.{}", table_alias, name), dir);
        Ok(self)
    }

    // ==================== Parameter binding ====================

    /// Bind a value to a registered parameter by name.
    ///
    /// Fails with [`BuildError::UnknownParameter`] if no parameter of that
    /// name was registered.
    pub fn bind(&mut self, name: &str, value: impl Into<SqlValue>) -> BuildResult<&mut Self> {
        let mut p = ParamExpr::new(name);
        p.bind(value.into());
        self.bind_param(p)
    }

    /// Bind a value with an explicit type hint.
    pub fn bind_typed(
        &mut self,
        name: &str,
        ty: DbType,
        value: impl Into<SqlValue>,
    ) -> BuildResult<&mut Self> {
        self.bind_param(ParamExpr::typed(name, ty, value))
    }

    /// Overwrite a registered parameter's value, type and size from `param`.
    pub fn bind_param(&mut self, param: ParamExpr) -> BuildResult<&mut Self> {
        if self.bind_existing(&param) {
            Ok(self)
        } else {
            Err(BuildError::UnknownParameter(param.name().to_string()))
        }
    }

    /// Like [`bind_param`](Self::bind_param), but silently registers `param`
    /// as a new entry when the name is unknown instead of failing.
    pub fn bind_or_register(&mut self, param: ParamExpr) -> &mut Self {
        if !self.bind_existing(&param) {
            self.extra_params.push(param);
        }
        self
    }

    fn bind_existing(&mut self, incoming: &ParamExpr) -> bool {
        let mut found = false;
        for p in self.params_mut() {
            if p.name() == incoming.name() {
                p.rebind_from(incoming);
                found = true;
            }
        }
        found
    }

    // ==================== Rendering ====================

    /// Render the full query.
    ///
    /// Clause order is fixed: SELECT, FROM, JOINs in addition order, then
    /// WHERE, GROUP BY and ORDER BY when non-empty. Fails with
    /// [`BuildError::MissingFrom`] if no FROM table was added.
    pub fn sql_string(&self) -> BuildResult<String> {
        self.render()
    }

    /// Render the query with the SELECT list temporarily replaced by a
    /// single expression, restoring the configured list afterwards.
    ///
    /// Useful for ad hoc scalar/aggregate projections such as
    /// `COUNT(u.id)`. Not reentrant on the same instance.
    pub fn single_select_sql(&mut self, expr: SqlExpr) -> BuildResult<String> {
        let saved = std::mem::take(&mut self.select);
        self.select.add(expr);
        let result = self.render();
        self.select = saved;
        result
    }

    /// Driver-native parameter records: WHERE parameters first, then each
    /// JOIN's in addition order, de-duplicated by name, unbound values
    /// defaulting to the null sentinel.
    pub fn parameters(&self) -> Vec<DbParameter> {
        self.collect_params()
            .iter()
            .map(|p| p.to_db_parameter())
            .collect()
    }

    fn render(&self) -> BuildResult<String> {
        if self.from.is_empty() {
            return Err(BuildError::MissingFrom);
        }
        let mut parts = Vec::with_capacity(4 + self.joins.len());
        parts.push(self.select.render());
        parts.push(self.from.render());
        for join in &self.joins {
            parts.push(join.render());
        }
        if !self.where_clause.is_empty() {
            parts.push(self.where_clause.render());
        }
        if !self.group.is_empty() {
            parts.push(self.group.render());
        }
        if !self.order.is_empty() {
            parts.push(self.order.render());
        }
        let sql = parts.join(" ");
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, "rendered SELECT");
        Ok(sql)
    }

    // ==================== Resolution helpers ====================

    fn table_by_alias(&self, alias: &str) -> Option<&Table> {
        self.from
            .tables()
            .iter()
            .find(|t| t.alias() == alias)
            .or_else(|| self.joins.iter().map(|j| &j.table).find(|t| t.alias() == alias))
    }

    fn resolve_path(&self, input: &str) -> BuildResult<(String, String)> {
        let path = parse_column_path(input)?;
        match path.alias {
            Some(alias) => {
                let table = self
                    .table_by_alias(&alias)
                    .ok_or(BuildError::UnknownAlias(alias))?;
                Ok((table.alias().to_string(), path.name))
            }
            None => {
                let table = self.from.first().ok_or(BuildError::MissingFrom)?;
                Ok((table.alias().to_string(), path.name))
            }
        }
    }

    fn resolve_column(&self, input: &str) -> BuildResult<SqlExpr> {
        let (table_alias, name) = self.resolve_path(input)?;
        Ok(SqlExpr::Column { table_alias, name })
    }

    fn implicit_param_name(&self, alias: &str, column: &str) -> String {
        let base = format!("{}_{}", strip_separators(alias), strip_separators(column));
        if !self.has_param(&base) {
            return base;
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{}_{}", base, n);
            if !self.has_param(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn has_param(&self, name: &str) -> bool {
        self.params_ref().iter().any(|p| p.name() == name)
    }

    fn params_ref(&self) -> Vec<&ParamExpr> {
        let mut out = self.where_clause.set.param_exprs();
        for join in &self.joins {
            out.extend(join.on.param_exprs());
        }
        out.extend(self.extra_params.iter());
        out
    }

    fn params_mut(&mut self) -> Vec<&mut ParamExpr> {
        let mut out = self.where_clause.set.param_exprs_mut();
        for join in &mut self.joins {
            out.extend(join.on.param_exprs_mut());
        }
        out.extend(self.extra_params.iter_mut());
        out
    }

    fn collect_params(&self) -> Vec<&ParamExpr> {
        let mut out: Vec<&ParamExpr> = Vec::new();
        for p in self.params_ref() {
            if !out.iter().any(|q| q.name() == p.name()) {
                out.push(p);
            }
        }
        out
    }
}

impl Statement for SelectBuilder {
    fn sql_string(&self) -> BuildResult<String> {
        self.render()
    }

    fn parameter_exprs(&self) -> BuildResult<Vec<ParamExpr>> {
        Ok(self.collect_params().into_iter().cloned().collect())
    }
}
