//! Hash-indexed, insertion-ordered address registry.
//!
//! The registry is the single source of truth for routing state. It is owned
//! by the core worker and mutated by no one else, so nothing in here takes a
//! lock. Addresses, links, remote nodes, and reference entries all live in
//! slotmap arenas; every external holder uses a generation-checked handle.
//!
//! Reference lists use a back-handle scheme: attaching a link stores the new
//! entry's handle on the link record, so detaching is O(1) and detaching an
//! unattached record is a silent no-op.

use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::address::{Address, AddressSemantics};
use super::errors::RegistryError;
use super::refs::{LinkRefId, NodeRefId, RefArena};
use crate::ports::outbound::ForwarderResolver;

new_key_type! {
    /// Handle to a registry address.
    pub struct AddressId;

    /// Handle to a link record.
    pub struct LinkId;

    /// Handle to a remote-node record.
    pub struct NodeId;
}

/// Core-side anchor for an attachable link endpoint.
///
/// The registry never owns the link's connection machinery; this record
/// holds the back-handle to the link's current reference entry so that
/// detach is O(1).
#[derive(Debug)]
pub struct LinkRecord {
    name: String,
    attached: Option<(AddressId, LinkRefId)>,
}

impl LinkRecord {
    /// Identifying name, for diagnostics only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The address this link is currently attached to, if any.
    pub fn attached_address(&self) -> Option<AddressId> {
        self.attached.map(|(addr, _)| addr)
    }
}

/// Core-side anchor for a remote router node. Same back-handle scheme as
/// [`LinkRecord`].
#[derive(Debug)]
pub struct NodeRecord {
    name: String,
    attached: Option<(AddressId, NodeRefId)>,
}

impl NodeRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attached_address(&self) -> Option<AddressId> {
        self.attached.map(|(addr, _)| addr)
    }
}

/// The hash-indexed, insertion-ordered collection of addresses, plus the
/// arenas for links, remote nodes, and their reference entries.
pub struct AddressRegistry {
    pub(crate) addresses: SlotMap<AddressId, Address>,
    pub(crate) index: HashMap<String, AddressId>,
    pub(crate) order: Vec<AddressId>,
    pub(crate) links: SlotMap<LinkId, LinkRecord>,
    pub(crate) nodes: SlotMap<NodeId, NodeRecord>,
    pub(crate) link_refs: RefArena<LinkRefId, LinkId>,
    pub(crate) node_refs: RefArena<NodeRefId, NodeId>,
    resolver: Arc<dyn ForwarderResolver>,
}

impl AddressRegistry {
    /// Create an empty registry. The resolver maps a semantics tag to a
    /// forwarder binding at address-creation time.
    pub fn new(resolver: Arc<dyn ForwarderResolver>) -> Self {
        Self {
            addresses: SlotMap::with_key(),
            index: HashMap::new(),
            order: Vec::new(),
            links: SlotMap::with_key(),
            nodes: SlotMap::with_key(),
            link_refs: SlotMap::with_key(),
            node_refs: SlotMap::with_key(),
            resolver,
        }
    }

    /// Number of registered addresses.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Hash lookup by full, scope-prefixed key.
    pub fn lookup(&self, key: &str) -> Option<AddressId> {
        self.index.get(key).copied()
    }

    /// Resolve an address handle.
    pub fn address(&self, id: AddressId) -> Option<&Address> {
        self.addresses.get(id)
    }

    /// Look up `key`, creating the address on a miss.
    ///
    /// On a hit the existing address is returned unchanged; the `semantics`
    /// argument has no effect (first-writer-wins). On a miss the new address
    /// is bound to `resolver.resolve(semantics)`, appended to the tail of
    /// the insertion-order list, and marked deletion-blocked.
    pub fn get_or_create(&mut self, key: &str, semantics: AddressSemantics) -> AddressId {
        if let Some(id) = self.lookup(key) {
            return id;
        }

        let forwarder = self.resolver.resolve(semantics);
        let mut address = Address::new(key.to_string(), semantics, forwarder);
        address.set_block_deletion(true);
        let id = self.addresses.insert(address);
        self.index.insert(key.to_string(), id);
        self.order.push(id);
        debug!(target: "router_core", key, ?semantics, "address created");
        id
    }

    /// Iterate addresses in insertion order. Stable under reference-list
    /// mutation; the per-address lists are independent of this ordering.
    pub fn iter(&self) -> impl Iterator<Item = (AddressId, &Address)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.addresses.get(id).map(|addr| (id, addr)))
    }

    /// Set or clear the administrative deletion block.
    pub fn set_block_deletion(&mut self, id: AddressId, blocked: bool) {
        if let Some(addr) = self.addresses.get_mut(id) {
            addr.set_block_deletion(blocked);
        }
    }

    /// Remove an address by key. Absent keys are a no-op; removal is refused
    /// while the deletion block is set or any reference list is non-empty.
    /// Deletion policy itself lives outside the core; this is the primitive.
    pub fn remove(&mut self, key: &str) -> Result<(), RegistryError> {
        let Some(id) = self.lookup(key) else {
            return Ok(());
        };
        let addr = &self.addresses[id];
        if addr.deletion_blocked() {
            return Err(RegistryError::DeletionBlocked {
                key: key.to_string(),
            });
        }
        if !addr.link_refs.is_empty() || !addr.node_refs.is_empty() {
            return Err(RegistryError::ReferencesPresent {
                key: key.to_string(),
                links: addr.link_refs.len(),
                nodes: addr.node_refs.len(),
            });
        }

        self.index.remove(key);
        self.order.retain(|&o| o != id);
        self.addresses.remove(id);
        debug!(target: "router_core", key, "address removed");
        Ok(())
    }

    /// Register a link endpoint with the core.
    pub fn create_link(&mut self, name: impl Into<String>) -> LinkId {
        self.links.insert(LinkRecord {
            name: name.into(),
            attached: None,
        })
    }

    /// Register a remote router node with the core.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(NodeRecord {
            name: name.into(),
            attached: None,
        })
    }

    pub fn link(&self, id: LinkId) -> Option<&LinkRecord> {
        self.links.get(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    /// Attach `link` to the tail of `address`'s interested-link list.
    ///
    /// A link is interested in at most one address; attaching an attached
    /// link moves it. Stale handles are a no-op.
    pub fn add_link_ref(&mut self, address: AddressId, link: LinkId) {
        self.del_link_ref(link);
        if !self.links.contains_key(link) {
            return;
        }
        let Some(addr) = self.addresses.get_mut(address) else {
            return;
        };
        let entry = addr.link_refs.push_back(&mut self.link_refs, link);
        self.links[link].attached = Some((address, entry));
    }

    /// Detach `link` from whatever address it is attached to. Detaching an
    /// unattached or stale link is a silent no-op.
    pub fn del_link_ref(&mut self, link: LinkId) {
        let Some(record) = self.links.get_mut(link) else {
            return;
        };
        let Some((address, entry)) = record.attached.take() else {
            return;
        };
        if let Some(addr) = self.addresses.get_mut(address) {
            addr.link_refs.remove(&mut self.link_refs, entry);
        }
    }

    /// Attach `node` to the tail of `address`'s interested-node list.
    pub fn add_node_ref(&mut self, address: AddressId, node: NodeId) {
        self.del_node_ref(node);
        if !self.nodes.contains_key(node) {
            return;
        }
        let Some(addr) = self.addresses.get_mut(address) else {
            return;
        };
        let entry = addr.node_refs.push_back(&mut self.node_refs, node);
        self.nodes[node].attached = Some((address, entry));
    }

    /// Detach `node`; unattached or stale handles are a silent no-op.
    pub fn del_node_ref(&mut self, node: NodeId) {
        let Some(record) = self.nodes.get_mut(node) else {
            return;
        };
        let Some((address, entry)) = record.attached.take() else {
            return;
        };
        if let Some(addr) = self.addresses.get_mut(address) {
            addr.node_refs.remove(&mut self.node_refs, entry);
        }
    }

    /// Links interested in `address`, in attach order.
    pub fn address_links(&self, address: AddressId) -> impl Iterator<Item = LinkId> + '_ {
        self.addresses
            .get(address)
            .into_iter()
            .flat_map(|addr| addr.link_refs.iter(&self.link_refs).copied())
    }

    /// Remote nodes interested in `address`, in attach order.
    pub fn address_nodes(&self, address: AddressId) -> impl Iterator<Item = NodeId> + '_ {
        self.addresses
            .get(address)
            .into_iter()
            .flat_map(|addr| addr.node_refs.iter(&self.node_refs).copied())
    }
}
