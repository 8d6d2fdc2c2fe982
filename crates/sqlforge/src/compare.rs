//! Comparison operators and their render templates.

/// Comparison operator between two rendered expressions.
///
/// The `render` match is the single source of truth for operator formatting;
/// every condition variant goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareOp {
    /// `left = right`
    #[default]
    Equals,
    /// `left <> right`
    NotEquals,
    /// `left > right`
    Greater,
    /// `left >= right`
    GreaterOrEquals,
    /// `left < right`
    Less,
    /// `left <= right`
    LessOrEquals,
    /// `left LIKE right`
    Like,
    /// `left IS right`
    Is,
    /// `left IS NOT right`
    IsNot,
    /// `left IN (right)`
    In,
    /// `left NOT IN (right)`
    NotIn,
    /// `left IN right`, for right-hand sides that carry their own braces,
    /// e.g. a raw subquery fragment
    InNoBraces,
    /// `left NOT IN right`
    NotInNoBraces,
}

impl CompareOp {
    /// Render `left <op> right` using this operator's template.
    pub fn render(self, left: &str, right: &str) -> String {
        match self {
            CompareOp::Equals => format!("{} = {}", left, right),
            CompareOp::NotEquals => format!("{} <> {}", left, right),
            CompareOp::Greater => format!("{} > {}", left, right),
            CompareOp::GreaterOrEquals => format!("{} >= {}", left, right),
            CompareOp::Less => format!("{} < {}", left, right),
            CompareOp::LessOrEquals => format!("{} <= {}", left, right),
            CompareOp::Like => format!("{} LIKE {}", left, right),
            CompareOp::Is => format!("{} IS {}", left, right),
            CompareOp::IsNot => format!("{} IS NOT {}", left, right),
            CompareOp::In => format!("{} IN ({})", left, right),
            CompareOp::NotIn => format!("{} NOT IN ({})", left, right),
            CompareOp::InNoBraces => format!("{} IN {}", left, right),
            CompareOp::NotInNoBraces => format!("{} NOT IN {}", left, right),
        }
    }
}
