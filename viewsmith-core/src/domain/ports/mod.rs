// src/domain/ports/mod.rs

pub mod script;

pub use script::ScriptSource;
