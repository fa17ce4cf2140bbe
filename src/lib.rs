//! tabclip host
//!
//! Wires the core, use cases and adapters into the three execution contexts
//! and exposes them through a small command-line host.

pub mod bootstrap;
pub mod commands;
pub mod contexts;
