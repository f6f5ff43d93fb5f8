// viewsmith-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports: the database session contract
pub mod ports;

// 2. Domain: identifiers, dependency graph, configuration types.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure: Postgres/DuckDB adapters, config files, SQL script lookup
pub mod infrastructure;

// 4. Application: planning and the drop/recreate passes
pub mod application;

pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::ViewsmithError;
