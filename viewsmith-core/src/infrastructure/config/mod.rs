pub mod connection;
pub mod project;

pub use crate::domain::project::ProjectConfig;
pub use connection::{ConnectionOutput, ConnectionProfile, load_connections, resolve_output};
pub use project::load_project_config;
