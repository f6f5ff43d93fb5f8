// viewsmith-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("SQL script '{view}.sql' not found in any configured path ({searched})")]
    #[diagnostic(
        code(viewsmith::domain::script_not_found),
        help("Add the CREATE VIEW script to one of the 'script-paths' directories.")
    )]
    ScriptNotFound { view: String, searched: String },

    #[error("SQL script for '{view}' could not be read: {reason}")]
    #[diagnostic(code(viewsmith::domain::script_unreadable))]
    ScriptUnreadable { view: String, reason: String },

    #[error("Invalid SQL identifier: '{0}'")]
    #[diagnostic(
        code(viewsmith::domain::identifier),
        help("Only [schema.]name identifiers made of letters, digits, '_' and '$' are allowed.")
    )]
    InvalidIdentifier(String),
}
