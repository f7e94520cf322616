//! # Domain Layer for the Router Core
//!
//! Pure routing-state structures with no I/O. Everything here is mutated by
//! exactly one thread: the core worker that owns the [`AddressRegistry`].
//! The one exception is the [`BufferPool`], which is shared across threads
//! so that producers can build [`Field`] payloads before enqueuing actions.
//!
//! ## Contents
//!
//! - **address**: `Address` entity, `AddressSemantics`, scope-prefixed keys
//! - **registry**: hash-indexed, insertion-ordered address registry
//! - **refs**: intrusive reference lists over arena-allocated entries
//! - **field**: chunked buffer-chain payloads and the shared buffer pool
//! - **value_objects**: `CoreConfig`
//! - **errors**: `CoreError`, `RegistryError`
//! - **invariants**: structural consistency checks

mod address;
mod errors;
mod field;
pub mod invariants;
pub mod refs;
pub mod registry;
mod value_objects;

pub use address::{local_key, scoped_key, Address, AddressScope, AddressSemantics};
pub use errors::{CoreError, RegistryError};
pub use field::{Buffer, BufferPool, Field, FieldCursor};
pub use registry::{AddressRegistry, LinkRecord, NodeRecord};
pub use value_objects::CoreConfig;
