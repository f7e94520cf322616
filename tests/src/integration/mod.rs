//! Integration tests across the core engine, registry, and field layers.

pub mod core_lifecycle;
pub mod payloads;
pub mod registry_flow;
