pub mod error;
pub mod graph;
pub mod identifier;
pub mod ports;
pub mod project;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use identifier::ViewName;
