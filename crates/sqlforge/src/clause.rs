//! Clause statements: each owns its small collection and renders its own SQL
//! fragment. A clause belongs to exactly one builder instance.

use std::fmt;

use crate::condition::ConditionSet;
use crate::expr::SqlExpr;
use crate::table::Table;

/// Add/overwrite behavior for SELECT and ORDER BY entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetMode {
    /// Append to existing entries
    #[default]
    Add,
    /// Clear prior entries first
    Overwrite,
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDir {
    #[default]
    Asc,
    Desc,
}

impl OrderDir {
    /// The SQL keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }
}

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Outer,
}

impl JoinKind {
    /// The SQL keyword pair, e.g. `INNER JOIN`.
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Outer => "OUTER JOIN",
        }
    }
}

/// SELECT list. Renders `SELECT *` while empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectClause {
    pub(crate) distinct: bool,
    pub(crate) items: Vec<SqlExpr>,
}

impl SelectClause {
    pub(crate) fn add(&mut self, expr: SqlExpr) {
        self.items.push(expr);
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    pub(crate) fn render(&self) -> String {
        let head = if self.distinct {
            "SELECT DISTINCT"
        } else {
            "SELECT"
        };
        if self.items.is_empty() {
            return format!("{} *", head);
        }
        let parts: Vec<String> = self.items.iter().map(|e| e.to_string()).collect();
        format!("{} {}", head, parts.join(", "))
    }
}

/// FROM table list; multiple tables render comma-joined (cross join).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FromClause {
    tables: Vec<Table>,
}

impl FromClause {
    pub(crate) fn push(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub(crate) fn first(&self) -> Option<&Table> {
        self.tables.first()
    }

    pub(crate) fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub(crate) fn render(&self) -> String {
        let parts: Vec<String> = self.tables.iter().map(|t| t.to_string()).collect();
        format!("FROM {}", parts.join(", "))
    }
}

/// One JOIN: kind, target table, ON condition set.
///
/// The target table is also the join's identity for alias lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub(crate) kind: JoinKind,
    pub(crate) table: Table,
    pub(crate) on: ConditionSet,
}

impl JoinClause {
    pub(crate) fn render(&self) -> String {
        format!("{} {} ON {}", self.kind.keyword(), self.table, self.on)
    }
}

/// WHERE wrapper around a condition set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub(crate) set: ConditionSet,
}

impl WhereClause {
    pub(crate) fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub(crate) fn render(&self) -> String {
        format!("WHERE {}", self.set)
    }
}

/// GROUP BY names; insertion order preserved, duplicates dropped on render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupClause {
    columns: Vec<String>,
}

impl GroupClause {
    pub(crate) fn push(&mut self, column: impl Into<String>) {
        self.columns.push(column.into());
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(crate) fn render(&self) -> String {
        let mut seen: Vec<&str> = Vec::with_capacity(self.columns.len());
        for c in &self.columns {
            if !seen.contains(&c.as_str()) {
                seen.push(c);
            }
        }
        format!("GROUP BY {}", seen.join(", "))
    }
}

/// ORDER BY entries: insertion order preserved for first-time keys, last
/// write wins for the direction of an already-ordered column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderClause {
    entries: Vec<(String, OrderDir)>,
}

impl OrderClause {
    pub(crate) fn set(&mut self, column: String, dir: OrderDir) {
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == column) {
            entry.1 = dir;
        } else {
            self.entries.push((column, dir));
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn render(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(c, d)| format!("{} {}", c, d.keyword()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
