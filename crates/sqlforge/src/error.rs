//! Error types for sqlforge

use thiserror::Error;

/// Result type alias for builder operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Error types raised while assembling or rendering a statement
#[derive(Debug, Error)]
pub enum BuildError {
    /// Malformed identifier supplied by the caller
    #[error("Invalid identifier '{name}': {message}")]
    Identifier { name: String, message: String },

    /// Rendering or column resolution attempted before any FROM table exists
    #[error("No FROM table specified")]
    MissingFrom,

    /// A column referenced a table alias not present in FROM or any JOIN
    #[error("Unknown table alias '{0}'")]
    UnknownAlias(String),

    /// A join's left-hand column references a table that has not been added yet
    #[error("Join references table '{0}' before it was added")]
    JoinOrder(String),

    /// Binding was requested for a parameter name that was never registered
    #[error("No parameter named '@{0}' is registered")]
    UnknownParameter(String),

    /// A command was filled while a registered parameter still had no value
    #[error("Parameter '@{0}' has no value bound")]
    UnboundParameter(String),

    /// INSERT was rendered without any rows
    #[error("INSERT requires at least one row")]
    EmptyInsert,

    /// UPDATE was rendered without any SET columns
    #[error("UPDATE requires at least one SET column")]
    EmptyUpdate,

    /// A row carried a column that is not declared in the column set
    #[error("Column '{0}' is not declared in the column set")]
    UnknownColumn(String),

    /// A row was missing a column declared in the column set
    #[error("Row is missing declared column '{0}'")]
    MissingColumn(String),
}

impl BuildError {
    /// Create an identifier error
    pub fn identifier(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Identifier {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check if this is an argument-validity error, as opposed to an
    /// invalid-operation-given-current-state error
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::Identifier { .. })
    }

    /// Check if this is an unbound-parameter error
    pub fn is_unbound_parameter(&self) -> bool {
        matches!(self, Self::UnboundParameter(_))
    }
}
