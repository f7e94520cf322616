//! # Router Core - Serialized Routing-State Mutation
//!
//! The mutation core of a message-routing engine. All structural changes to
//! routing state flow through a FIFO action queue drained by a single worker
//! task, so concurrent I/O threads never race on shared routing tables.
//!
//! ```text
//! producer threads                       core worker (sole mutator)
//! ┌──────────────┐   enqueue(Action)   ┌──────────────────────────┐
//! │ connection / │ ──────────────────▶ │ while recv(): apply()    │
//! │ I/O handlers │    (unbounded       │   ┌───────────────────┐  │
//! └──────────────┘     mpsc, FIFO)     │   │  AddressRegistry  │  │
//!                                      │   └───────────────────┘  │
//!                                      └──────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - Actions execute exactly once, in FIFO order per producer.
//! - The registry is owned by the worker task; a second writer cannot exist.
//! - Shutdown drains every action enqueued before it.
//!
//! ## Layout
//!
//! - [`domain`]: registry, addresses, reference lists, buffer-chain fields
//! - [`ports`]: boundary traits (`ActionSink`, `Forwarder`, `ForwarderResolver`)
//! - [`actions`]: the queued unit of work
//! - [`service`]: the `RouterCore` engine and its worker

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod actions;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export main types
pub use actions::{Action, InspectFn};
pub use domain::registry::{AddressId, LinkId, NodeId};
pub use domain::{
    local_key, scoped_key, Address, AddressRegistry, AddressScope, AddressSemantics, BufferPool,
    CoreConfig, CoreError, Field, FieldCursor, RegistryError,
};
pub use ports::inbound::ActionSink;
pub use ports::outbound::{Forwarder, ForwarderResolver, NullForwarder, NullResolver};
pub use service::{CoreHandle, RouterCore};

/// Default fixed capacity of pooled buffers, in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 512;
