use crate::domain::error::DomainError;
use crate::domain::identifier::ViewName;

/// Resolves a view to the CREATE VIEW script it is rebuilt from.
pub trait ScriptSource: Send + Sync {
    fn load(&self, view: &ViewName) -> Result<String, DomainError>;
}
