//! Parameter placeholders and driver-facing parameter records.
//!
//! A [`ParamExpr`] is a named `@identifier` slot tracked by a builder. It is
//! created explicitly by the caller or discovered by scanning raw clause text,
//! and stays unbound (`value: None`) until a value is assigned. Binding an
//! existing name overwrites in place; it never appends a duplicate.

use std::fmt;

use crate::value::{DbType, SqlValue};

/// A named parameter placeholder tracked by a builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamExpr {
    /// Bare name, without the `@` prefix
    name: String,
    ty: Option<DbType>,
    size: Option<usize>,
    value: Option<SqlValue>,
}

impl ParamExpr {
    /// Create an unbound placeholder.
    ///
    /// `name` is the bare identifier; a leading `@` is accepted and stripped.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.strip_prefix('@').unwrap_or(&name).to_string();
        Self {
            name,
            ty: None,
            size: None,
            value: None,
        }
    }

    /// Create a placeholder with a value already bound.
    pub fn with_value(name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        let mut p = Self::new(name);
        let value = value.into();
        p.ty = value.db_type();
        p.value = Some(value);
        p
    }

    /// Create a placeholder with an explicit type hint and a bound value.
    pub fn typed(name: impl Into<String>, ty: DbType, value: impl Into<SqlValue>) -> Self {
        let mut p = Self::new(name);
        p.ty = Some(ty);
        p.value = Some(value.into());
        p
    }

    /// Attach a size hint (e.g. a maximum character length).
    pub fn sized(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// The bare parameter name, without the `@` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type hint, if any.
    pub fn ty(&self) -> Option<DbType> {
        self.ty
    }

    /// The size hint, if any.
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// The bound value, or `None` while unbound.
    pub fn value(&self) -> Option<&SqlValue> {
        self.value.as_ref()
    }

    /// Whether a value has been bound. A bound `Null` counts as bound.
    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    /// Bind (or rebind) a value, inferring the type hint when absent.
    pub fn bind(&mut self, value: SqlValue) {
        if self.ty.is_none() {
            self.ty = value.db_type();
        }
        self.value = Some(value);
    }

    /// Bind (or rebind) a value with an explicit type hint.
    pub fn bind_typed(&mut self, ty: DbType, value: SqlValue) {
        self.ty = Some(ty);
        self.value = Some(value);
    }

    /// Overwrite value, type and size from another placeholder of the same
    /// name.
    pub(crate) fn rebind_from(&mut self, other: &ParamExpr) {
        if other.ty.is_some() {
            self.ty = other.ty;
        }
        if other.size.is_some() {
            self.size = other.size;
        }
        self.value = other.value.clone();
    }

    /// The placeholder as it appears in SQL text: `@name`.
    pub fn placeholder(&self) -> String {
        format!("@{}", self.name)
    }

    /// Convert to the driver-native record, defaulting an unbound value to
    /// the null sentinel.
    pub fn to_db_parameter(&self) -> DbParameter {
        DbParameter {
            name: self.placeholder(),
            ty: self.ty,
            size: self.size,
            value: self.value.clone().unwrap_or(SqlValue::Null),
        }
    }
}

impl fmt::Display for ParamExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

/// Driver-native parameter record handed to a [`DbCommand`].
///
/// [`DbCommand`]: crate::command::DbCommand
#[derive(Debug, Clone, PartialEq)]
pub struct DbParameter {
    /// Parameter name, including the `@` prefix
    pub name: String,
    /// Optional vendor-neutral type hint
    pub ty: Option<DbType>,
    /// Optional size hint
    pub size: Option<usize>,
    /// Bound value; the null sentinel when nothing was bound
    pub value: SqlValue,
}

/// Scan a raw SQL fragment for `@identifier` placeholders.
///
/// Single-quoted string literals are stripped first so `'@not_a_param'` does
/// not register. Duplicate names yield one entry, in first-occurrence order.
pub(crate) fn scan_parameters(sql: &str) -> Vec<ParamExpr> {
    let stripped = strip_quoted(sql);
    let mut names: Vec<String> = Vec::new();
    let mut chars = stripped.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '@' {
            continue;
        }
        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    names.into_iter().map(ParamExpr::new).collect()
}

/// Drop everything inside single-quoted literals, quotes included.
fn strip_quoted(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut in_quote = false;
    for ch in sql.chars() {
        match ch {
            '\'' => in_quote = !in_quote,
            c if !in_quote => out.push(c),
            _ => {}
        }
    }
    out
}

/// Keep only ASCII alphanumerics, dropping separators like `.` and `_`.
///
/// Used for parameter names derived from table or column identifiers,
/// e.g. `dbo.Test` becomes `dboTest`.
pub(crate) fn strip_separators(ident: &str) -> String {
    ident.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_parameters() {
        let params = scan_parameters("bla = @bla AND foo = @foo");
        let names: Vec<&str> = params.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["bla", "foo"]);
    }

    #[test]
    fn test_scan_deduplicates() {
        let params = scan_parameters("bla = @bla OR blubb = @bla");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name(), "bla");
    }

    #[test]
    fn test_scan_ignores_quoted_literals() {
        let params = scan_parameters("a = '@literal' AND b = @real");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name(), "real");
    }

    #[test]
    fn test_new_strips_at_prefix() {
        let p = ParamExpr::new("@foo");
        assert_eq!(p.name(), "foo");
        assert_eq!(p.placeholder(), "@foo");
    }

    #[test]
    fn test_bind_overwrites_in_place() {
        let mut p = ParamExpr::new("foo");
        assert!(!p.is_bound());

        p.bind(SqlValue::I32(1));
        assert_eq!(p.value(), Some(&SqlValue::I32(1)));
        assert_eq!(p.ty(), Some(crate::value::DbType::Int));

        p.bind(SqlValue::I32(2));
        assert_eq!(p.value(), Some(&SqlValue::I32(2)));
    }

    #[test]
    fn test_db_parameter_defaults_to_null() {
        let p = ParamExpr::new("foo");
        let db = p.to_db_parameter();
        assert_eq!(db.name, "@foo");
        assert_eq!(db.value, SqlValue::Null);
    }

    #[test]
    fn test_strip_separators() {
        assert_eq!(strip_separators("dbo.Test"), "dboTest");
        assert_eq!(strip_separators("plain"), "plain");
        assert_eq!(strip_separators("a_b.c"), "abc");
    }
}
