//! # Router Core Test Suite
//!
//! Unified test crate for cross-module behavior.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── core_lifecycle.rs   # Multi-producer FIFO, drain-on-shutdown
//!     ├── registry_flow.rs    # End-to-end address/link/node scenarios
//!     └── payloads.rs         # Field chunking through the core's pool
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p router-tests
//!
//! # By category
//! cargo test -p router-tests integration::
//! ```

pub mod integration;

/// Install a log subscriber for debugging test runs (`RUST_LOG=debug`).
/// Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
