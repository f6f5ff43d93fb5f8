// viewsmith-core/src/domain/graph/mod.rs

pub mod dag;

pub use dag::{DependencyEdge, DependencyGraph, GraphSolver, ViewOrdering};
