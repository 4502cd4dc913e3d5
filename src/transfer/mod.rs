//! Transfer input and execution: the raw form, its submitted snapshot, and
//! the engine that validates and applies it.

pub mod engine;
pub mod form;
