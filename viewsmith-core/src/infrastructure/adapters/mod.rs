// viewsmith-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod postgres;

pub use self::duckdb::DuckDBConnector;
pub use self::postgres::{PostgresConnector, PostgresSettings};
