//! Boundary traits for the router core.
//!
//! - **inbound**: how the rest of the router drives the core (`ActionSink`)
//! - **outbound**: what the core consumes from collaborators
//!   (`Forwarder`, `ForwarderResolver`)

pub mod inbound;
pub mod outbound;
