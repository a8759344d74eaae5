//! Example games built on the engine.

pub mod draft;
