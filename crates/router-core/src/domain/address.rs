//! Address entities and scope-prefixed keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::refs::{LinkRefId, NodeRefId, RefList};
use crate::ports::outbound::Forwarder;

/// Forwarding-policy tag bound to an address at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressSemantics {
    /// Deliver to every interested consumer.
    Multicast,
    /// Deliver to the single consumer closest by topology cost.
    Closest,
    /// Spread deliveries across consumers by load.
    Balanced,
}

/// Scope-class marker prefixed onto address keys.
///
/// The registry performs no scope inference: callers pick the scope and
/// build the prefixed key before lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressScope {
    /// Addresses local to this router.
    Local,
    /// Addresses scoped to the local area.
    Area,
    /// Router-level control addresses.
    Router,
    /// Mobile endpoint addresses.
    Mobile,
}

impl AddressScope {
    /// The leading marker character for this scope class.
    pub fn marker(self) -> char {
        match self {
            AddressScope::Local => 'L',
            AddressScope::Area => 'A',
            AddressScope::Router => 'R',
            AddressScope::Mobile => 'M',
        }
    }
}

/// Build a scope-prefixed registry key.
pub fn scoped_key(scope: AddressScope, name: &str) -> String {
    format!("{}{}", scope.marker(), name)
}

/// Build a locally-scoped registry key (`L` prefix).
pub fn local_key(name: &str) -> String {
    scoped_key(AddressScope::Local, name)
}

/// One routable address: its semantics, the forwarder binding resolved from
/// them at creation, a deletion-block flag, and the reference lists of
/// interested links and remote nodes.
///
/// Owned exclusively by the registry arena; everything else holds an
/// `AddressId` handle.
pub struct Address {
    key: String,
    semantics: AddressSemantics,
    forwarder: Arc<dyn Forwarder>,
    block_deletion: bool,
    pub(crate) link_refs: RefList<LinkRefId>,
    pub(crate) node_refs: RefList<NodeRefId>,
}

impl Address {
    pub(crate) fn new(key: String, semantics: AddressSemantics, forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            key,
            semantics,
            forwarder,
            block_deletion: false,
            link_refs: RefList::new(),
            node_refs: RefList::new(),
        }
    }

    /// The full, scope-prefixed key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn semantics(&self) -> AddressSemantics {
        self.semantics
    }

    /// The forwarder binding resolved when this address was created.
    pub fn forwarder(&self) -> &Arc<dyn Forwarder> {
        &self.forwarder
    }

    /// Whether deletion is administratively blocked.
    pub fn deletion_blocked(&self) -> bool {
        self.block_deletion
    }

    pub(crate) fn set_block_deletion(&mut self, blocked: bool) {
        self.block_deletion = blocked;
    }

    /// Number of interested links.
    pub fn link_ref_count(&self) -> usize {
        self.link_refs.len()
    }

    /// Number of interested remote nodes.
    pub fn node_ref_count(&self) -> usize {
        self.node_refs.len()
    }

    /// True only when deletion is unblocked and no references remain.
    pub fn is_deletable(&self) -> bool {
        !self.block_deletion && self.link_refs.is_empty() && self.node_refs.is_empty()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Address")
            .field("key", &self.key)
            .field("semantics", &self.semantics)
            .field("block_deletion", &self.block_deletion)
            .field("link_refs", &self.link_refs.len())
            .field("node_refs", &self.node_refs.len())
            .finish()
    }
}
