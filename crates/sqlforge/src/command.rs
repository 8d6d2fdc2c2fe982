//! The narrow contract between rendered statements and an external executor.

use crate::error::{BuildError, BuildResult};
use crate::param::{DbParameter, ParamExpr};

/// A generic database command: text plus an ordered parameter collection.
///
/// Implement this for a concrete driver's command type. The builders never
/// open connections or execute anything; they only set text and append
/// parameters.
pub trait DbCommand {
    /// Set the command text.
    fn set_text(&mut self, sql: &str);

    /// Append one parameter to the command's collection.
    fn push_parameter(&mut self, parameter: DbParameter);
}

/// Behavior shared by the four statement builders.
pub trait Statement {
    /// Render the statement's SQL text.
    fn sql_string(&self) -> BuildResult<String>;

    /// All parameter placeholders, in statement order.
    fn parameter_exprs(&self) -> BuildResult<Vec<ParamExpr>>;

    /// Driver-native parameter records, unbound values defaulting to the
    /// null sentinel.
    fn parameters(&self) -> BuildResult<Vec<DbParameter>> {
        Ok(self
            .parameter_exprs()?
            .iter()
            .map(ParamExpr::to_db_parameter)
            .collect())
    }

    /// Render into `command`: set its text and append every parameter.
    ///
    /// Fails with [`BuildError::UnboundParameter`] if any placeholder still
    /// has no value.
    fn fill_command<C: DbCommand>(&self, command: &mut C) -> BuildResult<()> {
        let exprs = self.parameter_exprs()?;
        if let Some(unbound) = exprs.iter().find(|p| !p.is_bound()) {
            return Err(BuildError::UnboundParameter(unbound.name().to_string()));
        }
        let sql = self.sql_string()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, params = exprs.len(), "filling command");
        command.set_text(&sql);
        for p in &exprs {
            command.push_parameter(p.to_db_parameter());
        }
        Ok(())
    }
}
