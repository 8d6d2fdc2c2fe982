//! # sqlforge
//!
//! A fluent, in-memory builder for SQL SELECT / INSERT / UPDATE / DELETE
//! statements, producing parameterized query text plus an ordered list of
//! named bind parameters for an external database driver.
//!
//! ## Features
//!
//! - **No string concatenation at call sites**: queries are composed from
//!   tables, joins, conditions, ordering and grouping
//! - **Parameter tracking**: `@identifier` placeholders are discovered by
//!   scanning raw clause text or created explicitly, then bound by name
//! - **Alias resolution**: bare column names resolve against the first FROM
//!   table, `"alias.column"` against any table known from FROM or a JOIN
//! - **Referential join chains**: a join's left-hand column must reference a
//!   table that is already part of the statement
//! - **No execution**: rendering fills a [`DbCommand`] you implement for your
//!   driver; nothing here opens a connection
//!
//! ## Building a SELECT
//!
//! ```
//! use sqlforge::{SelectBuilder, Table};
//!
//! let mut qb = SelectBuilder::new();
//! qb.from(Table::aliased("dbo.orders", "o"));
//! qb.select_cols(&["id", "total"]).unwrap();
//! qb.inner_join(Table::aliased("dbo.users", "u"), "o.user_id = u.id");
//! qb.where_raw("u.status = @status");
//! qb.bind("status", "active").unwrap();
//!
//! assert_eq!(
//!     qb.sql_string().unwrap(),
//!     "SELECT o.id, o.total FROM dbo.orders o \
//!      INNER JOIN dbo.users u ON (o.user_id = u.id) \
//!      WHERE (u.status = @status)"
//! );
//! assert_eq!(qb.parameters().len(), 1);
//! ```
//!
//! ## Mutations
//!
//! ```
//! use sqlforge::{ColumnSet, DbType, Row, insert_into};
//!
//! let columns = ColumnSet::new()
//!     .column("name", DbType::Text)
//!     .column("age", DbType::Int);
//! let mut ib = insert_into("dbo.users", columns);
//! ib.add_row(Row::new().set("name", "alice").set("age", 30i32)).unwrap();
//! ib.add_row(Row::new().set("name", "bob").set("age", 41i32)).unwrap();
//!
//! assert_eq!(
//!     ib.sql_string().unwrap(),
//!     "INSERT INTO dbo.users (name, age) VALUES (@name_0, @age_0), (@name_1, @age_1)"
//! );
//! ```

pub mod clause;
pub mod command;
pub mod compare;
pub mod condition;
pub mod delete;
pub mod error;
pub mod expr;
pub mod insert;
pub mod param;
pub mod schema;
pub mod select;
pub mod table;
pub mod update;
pub mod value;

pub use clause::{JoinKind, OrderDir, SetMode};
pub use command::{DbCommand, Statement};
pub use compare::CompareOp;
pub use condition::{Condition, ConditionSet, Connector};
pub use delete::DeleteBuilder;
pub use error::{BuildError, BuildResult};
pub use expr::{SqlExpr, aliased, col, count, param, raw};
pub use insert::InsertBuilder;
pub use param::{DbParameter, ParamExpr};
pub use schema::{ColumnSet, ColumnSpec, Row};
pub use select::SelectBuilder;
pub use table::Table;
pub use update::UpdateBuilder;
pub use value::{DbType, SqlValue};

/// Create a SELECT builder with `table` already in the FROM list.
///
/// # Example
/// ```
/// let mut qb = sqlforge::select_from(("dbo.users", "u"));
/// assert_eq!(qb.sql_string().unwrap(), "SELECT * FROM dbo.users u");
/// ```
pub fn select_from(table: impl Into<Table>) -> SelectBuilder {
    let mut qb = SelectBuilder::new();
    qb.from(table);
    qb
}

/// Create an INSERT builder for `table` against `columns`.
///
/// Pass an empty [`ColumnSet`] to infer the column list from the first row.
pub fn insert_into(table: impl Into<String>, columns: ColumnSet) -> InsertBuilder {
    InsertBuilder::new(table, columns)
}

/// Create an UPDATE builder for `table` setting `row`'s values.
pub fn update(table: impl Into<String>, columns: ColumnSet, row: Row) -> UpdateBuilder {
    UpdateBuilder::new(table, columns, row)
}

/// Create a DELETE builder for `table`.
pub fn delete_from(table: impl Into<String>) -> DeleteBuilder {
    DeleteBuilder::new(table)
}
