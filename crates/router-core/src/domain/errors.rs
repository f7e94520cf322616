//! Error types for the router core.
//!
//! The taxonomy is narrow on purpose: structural operations prefer defensive
//! no-ops (detaching an absent link, dropping an absent field), and the only
//! reported failures are queue teardown and refused deletions.

use thiserror::Error;

/// Errors from the core engine lifecycle and action queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The action queue is closed: the core is shutting down or gone.
    #[error("Core is shut down: action rejected")]
    ShutDown,
}

/// Errors from registry mutation primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Address removal refused while the deletion-block flag is set.
    #[error("Address {key} cannot be deleted: deletion is blocked")]
    DeletionBlocked { key: String },

    /// Address removal refused while reference lists are non-empty.
    #[error("Address {key} cannot be deleted: {links} link ref(s), {nodes} node ref(s) present")]
    ReferencesPresent { key: String, links: usize, nodes: usize },
}
