// viewsmith/src/commands/mod.rs

pub mod plan;
pub mod recreate;
mod session;
