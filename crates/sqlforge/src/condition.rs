//! Boolean condition sets for WHERE and JOIN ... ON clauses.
//!
//! A [`ConditionSet`] is an ordered sequence of sub-conditions, each tagged
//! with the logical connector joining it to the *previous* entry. It renders
//! as one parenthesized boolean expression and can recursively hand out every
//! parameter placeholder it contains.

use std::fmt;

use crate::compare::CompareOp;
use crate::expr::SqlExpr;
use crate::param::{self, ParamExpr};

/// Logical connector between a sub-condition and its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    /// The SQL keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// One element of a condition set.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Raw clause text plus the parameters it references
    Raw {
        sql: String,
        params: Vec<ParamExpr>,
    },
    /// `left <op> right`, both plain expressions, no parameters
    Compare {
        left: SqlExpr,
        op: CompareOp,
        right: SqlExpr,
    },
    /// `left <op> @param`, exactly one parameter on the right
    CompareParam {
        left: SqlExpr,
        op: CompareOp,
        param: ParamExpr,
    },
    /// A nested set, rendered parenthesized as a unit
    Nested(ConditionSet),
}

impl Condition {
    /// Raw clause text; `@identifier` placeholders are auto-discovered by
    /// scanning (single-quoted literals are ignored).
    pub fn raw(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        let params = param::scan_parameters(&sql);
        Condition::Raw { sql, params }
    }

    /// Raw clause text with explicitly supplied parameters; no scanning.
    pub fn raw_with(sql: impl Into<String>, params: Vec<ParamExpr>) -> Self {
        Condition::Raw {
            sql: sql.into(),
            params,
        }
    }

    /// Expression-vs-expression comparison.
    pub fn compare(left: SqlExpr, op: CompareOp, right: SqlExpr) -> Self {
        Condition::Compare { left, op, right }
    }

    /// Expression-vs-parameter comparison.
    pub fn compare_param(left: SqlExpr, op: CompareOp, param: ParamExpr) -> Self {
        Condition::CompareParam { left, op, param }
    }

    fn render(&self) -> String {
        match self {
            Condition::Raw { sql, .. } => sql.clone(),
            Condition::Compare { left, op, right } => {
                op.render(&left.to_string(), &right.to_string())
            }
            Condition::CompareParam { left, op, param } => {
                op.render(&left.to_string(), &param.placeholder())
            }
            Condition::Nested(set) => set.to_string(),
        }
    }
}

/// Ordered, connector-tagged sequence of sub-conditions.
///
/// Element 0's connector is never rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionSet {
    entries: Vec<(Connector, Condition)>,
}

impl ConditionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of direct entries (nested sets count as one).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Append a condition with the default AND connector.
    pub fn push(&mut self, condition: Condition) {
        self.entries.push((Connector::And, condition));
    }

    /// Append a condition with an explicit connector.
    pub fn push_with(&mut self, connector: Connector, condition: Condition) {
        self.entries.push((connector, condition));
    }

    /// Chain-style append with AND.
    pub fn and(mut self, condition: Condition) -> Self {
        self.push(condition);
        self
    }

    /// Chain-style append with OR.
    pub fn or(mut self, condition: Condition) -> Self {
        self.push_with(Connector::Or, condition);
        self
    }

    /// All parameter placeholders in set order, depth-first.
    ///
    /// Nested subsets are expanded in place of their entry; each set's direct
    /// entries are visited exactly once.
    pub fn param_exprs(&self) -> Vec<&ParamExpr> {
        let mut out = Vec::new();
        for (_, condition) in &self.entries {
            match condition {
                Condition::Raw { params, .. } => out.extend(params.iter()),
                Condition::CompareParam { param, .. } => out.push(param),
                Condition::Compare { .. } => {}
                Condition::Nested(set) => out.extend(set.param_exprs()),
            }
        }
        out
    }

    /// Mutable variant of [`param_exprs`](Self::param_exprs), used for
    /// rebinding by name.
    pub(crate) fn param_exprs_mut(&mut self) -> Vec<&mut ParamExpr> {
        let mut out = Vec::new();
        for (_, condition) in &mut self.entries {
            match condition {
                Condition::Raw { params, .. } => out.extend(params.iter_mut()),
                Condition::CompareParam { param, .. } => out.push(param),
                Condition::Compare { .. } => {}
                Condition::Nested(set) => out.extend(set.param_exprs_mut()),
            }
        }
        out
    }
}

impl fmt::Display for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (connector, condition)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", connector.keyword())?;
            }
            f.write_str(&condition.render())?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, raw};
    use crate::table::Table;

    #[test]
    fn test_render_with_connectors() {
        let set = ConditionSet::new()
            .and(Condition::raw("a = 1"))
            .and(Condition::raw("b = 2"))
            .or(Condition::raw("c = 3"));
        assert_eq!(set.to_string(), "(a = 1 AND b = 2 OR c = 3)");
    }

    #[test]
    fn test_render_compare() {
        let t = Table::aliased("dbo.users", "u");
        let set = ConditionSet::new().and(Condition::compare(
            col(&t, "id"),
            CompareOp::Equals,
            raw("1"),
        ));
        assert_eq!(set.to_string(), "(u.id = 1)");
    }

    #[test]
    fn test_render_nested() {
        let inner = ConditionSet::new()
            .and(Condition::raw("x = 1"))
            .or(Condition::raw("y = 2"));
        let set = ConditionSet::new()
            .and(Condition::raw("a = @a"))
            .and(Condition::Nested(inner));
        assert_eq!(set.to_string(), "(a = @a AND (x = 1 OR y = 2))");
    }

    #[test]
    fn test_params_scanned_once_per_name() {
        let set = ConditionSet::new().and(Condition::raw("bla = @bla OR blubb = @bla"));
        assert_eq!(set.param_exprs().len(), 1);
        assert_eq!(set.param_exprs()[0].name(), "bla");
    }

    #[test]
    fn test_params_from_nested_expanded_in_place() {
        let t = Table::new("t");
        let inner = ConditionSet::new().and(Condition::compare_param(
            col(&t, "b"),
            CompareOp::Equals,
            ParamExpr::new("inner_p"),
        ));
        let set = ConditionSet::new()
            .and(Condition::raw("a = @first"))
            .and(Condition::Nested(inner))
            .and(Condition::raw("c = @last"));

        let names: Vec<&str> = set.param_exprs().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["first", "inner_p", "last"]);
    }

    #[test]
    fn test_rebind_through_mut_walk() {
        let mut set = ConditionSet::new().and(Condition::raw("a = @a"));
        for p in set.param_exprs_mut() {
            if p.name() == "a" {
                p.bind(crate::value::SqlValue::I32(5));
            }
        }
        assert!(set.param_exprs()[0].is_bound());
    }
}
