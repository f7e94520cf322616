//! Actions: the tagged units of work executed by the core worker.
//!
//! An action is executed exactly once, in FIFO order relative to successful
//! enqueue completion, on the single worker that owns the registry. Actions
//! are not cancelable; a caller needing cancellation enqueues a compensating
//! action. Replies travel over `oneshot` channels so producers never poll
//! shared state.

use std::fmt;

use tokio::sync::oneshot;

use crate::domain::registry::{AddressId, LinkId, NodeId};
use crate::domain::{AddressRegistry, AddressSemantics, Field};

/// Closure run against the registry on the worker thread. Diagnostic and
/// test window; must not block.
pub type InspectFn = Box<dyn FnOnce(&AddressRegistry) + Send>;

/// A queued unit of work.
pub enum Action {
    /// Look up or create an address. The key travels as a [`Field`] payload
    /// and is materialized on the worker.
    EnsureAddress {
        key: Field,
        semantics: AddressSemantics,
        reply: Option<oneshot::Sender<AddressId>>,
    },

    /// Register a link endpoint with the core.
    CreateLink {
        name: String,
        reply: oneshot::Sender<LinkId>,
    },

    /// Register a remote router node with the core.
    CreateNode {
        name: String,
        reply: oneshot::Sender<NodeId>,
    },

    /// Attach a link to an address's interested-link list.
    AttachLink { address: AddressId, link: LinkId },

    /// Detach a link from whatever address it is attached to. No-op if
    /// unattached.
    DetachLink { link: LinkId },

    /// Attach a remote node to an address's interested-node list.
    AttachNode { address: AddressId, node: NodeId },

    /// Detach a remote node. No-op if unattached.
    DetachNode { node: NodeId },

    /// Run a closure against the registry (read-only view).
    Inspect(InspectFn),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::EnsureAddress { key, semantics, .. } => f
                .debug_struct("EnsureAddress")
                .field("key_len", &key.len())
                .field("semantics", semantics)
                .finish(),
            Action::CreateLink { name, .. } => {
                f.debug_struct("CreateLink").field("name", name).finish()
            }
            Action::CreateNode { name, .. } => {
                f.debug_struct("CreateNode").field("name", name).finish()
            }
            Action::AttachLink { address, link } => f
                .debug_struct("AttachLink")
                .field("address", address)
                .field("link", link)
                .finish(),
            Action::DetachLink { link } => {
                f.debug_struct("DetachLink").field("link", link).finish()
            }
            Action::AttachNode { address, node } => f
                .debug_struct("AttachNode")
                .field("address", address)
                .field("node", node)
                .finish(),
            Action::DetachNode { node } => {
                f.debug_struct("DetachNode").field("node", node).finish()
            }
            Action::Inspect(_) => f.write_str("Inspect"),
        }
    }
}
