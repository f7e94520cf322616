//! Structural invariants for the registry.
//!
//! These checks are exercised by tests and available to debug paths. They
//! never run on the hot path; the single-writer discipline is what makes
//! them hold, these functions only verify it did.

use super::registry::AddressRegistry;

/// INVARIANT-1: Index consistency.
/// Every hash-index entry resolves to a live arena slot whose key matches,
/// and the insertion-order list contains exactly the indexed ids.
pub fn invariant_index_consistent(registry: &AddressRegistry) -> bool {
    if registry.index.len() != registry.order.len() || registry.index.len() != registry.addresses.len() {
        return false;
    }
    registry.index.iter().all(|(key, &id)| {
        registry
            .addresses
            .get(id)
            .is_some_and(|addr| addr.key() == key)
            && registry.order.contains(&id)
    })
}

/// INVARIANT-2: Back-handle consistency.
/// Every attached link/node record points at a reference entry that is
/// present in the list of the address it claims, and list lengths equal the
/// number of records claiming membership.
pub fn invariant_backrefs_consistent(registry: &AddressRegistry) -> bool {
    let links_ok = registry.addresses.iter().all(|(id, addr)| {
        let claiming = registry
            .links
            .values()
            .filter(|rec| rec.attached_address() == Some(id))
            .count();
        addr.link_refs.len() == claiming
            && addr
                .link_refs
                .iter(&registry.link_refs)
                .all(|&link| registry.links.contains_key(link))
    });
    let nodes_ok = registry.addresses.iter().all(|(id, addr)| {
        let claiming = registry
            .nodes
            .values()
            .filter(|rec| rec.attached_address() == Some(id))
            .count();
        addr.node_refs.len() == claiming
            && addr
                .node_refs
                .iter(&registry.node_refs)
                .all(|&node| registry.nodes.contains_key(node))
    });
    links_ok && nodes_ok
}

/// Invariant check result.
#[derive(Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    IndexInconsistent,
    BackrefsInconsistent,
}

/// Check all structural invariants.
pub fn check_all_invariants(registry: &AddressRegistry) -> Result<(), InvariantViolation> {
    if !invariant_index_consistent(registry) {
        return Err(InvariantViolation::IndexInconsistent);
    }
    if !invariant_backrefs_consistent(registry) {
        return Err(InvariantViolation::BackrefsInconsistent);
    }
    Ok(())
}
