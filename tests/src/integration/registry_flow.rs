//! # Registry Flows
//!
//! End-to-end address/link/node scenarios driven through the action queue,
//! observed only via `Inspect` (the worker is the sole reader of the
//! registry, so tests observe it the way collaborators must).

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use router_core::domain::invariants::check_all_invariants;
    use router_core::{
        local_key, Action, AddressSemantics, CoreConfig, Field, NullResolver, RouterCore,
    };
    use tokio::sync::oneshot;

    fn start_core() -> RouterCore {
        RouterCore::start(CoreConfig::default(), Arc::new(NullResolver))
    }

    #[tokio::test]
    async fn test_lnews_scenario() {
        let core = start_core();
        let pool = core.buffer_pool();

        core.enqueue(Action::EnsureAddress {
            key: Field::from_bytes(&pool, local_key("news").as_bytes()).unwrap(),
            semantics: AddressSemantics::Multicast,
            reply: None,
        })
        .unwrap();

        let (probe_tx, probe_rx) = oneshot::channel();
        core.enqueue(Action::Inspect(Box::new(move |registry| {
            let id = registry.lookup("Lnews").expect("Lnews not registered");
            let addr = registry.address(id).unwrap();
            let _ = probe_tx.send((
                addr.deletion_blocked(),
                addr.link_ref_count(),
                addr.node_ref_count(),
            ));
        })))
        .unwrap();

        let (blocked, links, nodes) = probe_rx.await.unwrap();
        assert!(blocked);
        assert_eq!(links, 0);
        assert_eq!(nodes, 0);

        core.shutdown().await;
    }

    #[tokio::test]
    async fn test_first_writer_wins_through_the_queue() {
        let core = start_core();
        let pool = core.buffer_pool();

        let (first_tx, first_rx) = oneshot::channel();
        core.enqueue(Action::EnsureAddress {
            key: Field::from_bytes(&pool, b"Lnews").unwrap(),
            semantics: AddressSemantics::Multicast,
            reply: Some(first_tx),
        })
        .unwrap();
        let (second_tx, second_rx) = oneshot::channel();
        core.enqueue(Action::EnsureAddress {
            key: Field::from_bytes(&pool, b"Lnews").unwrap(),
            semantics: AddressSemantics::Balanced,
            reply: Some(second_tx),
        })
        .unwrap();

        let first = first_rx.await.unwrap();
        let second = second_rx.await.unwrap();
        assert_eq!(first, second);

        let (probe_tx, probe_rx) = oneshot::channel();
        core.enqueue(Action::Inspect(Box::new(move |registry| {
            let addr = registry.address(first).unwrap();
            let _ = probe_tx.send(addr.semantics());
        })))
        .unwrap();
        assert_eq!(probe_rx.await.unwrap(), AddressSemantics::Multicast);

        core.shutdown().await;
    }

    #[tokio::test]
    async fn test_link_and_node_attachment_flow() {
        let core = start_core();
        let pool = core.buffer_pool();

        let (addr_tx, addr_rx) = oneshot::channel();
        core.enqueue(Action::EnsureAddress {
            key: Field::from_bytes(&pool, b"Msubscriber-queue").unwrap(),
            semantics: AddressSemantics::Balanced,
            reply: Some(addr_tx),
        })
        .unwrap();
        let address = addr_rx.await.unwrap();

        let (l1_tx, l1_rx) = oneshot::channel();
        core.enqueue(Action::CreateLink {
            name: "conn-1/in".to_string(),
            reply: l1_tx,
        })
        .unwrap();
        let (l2_tx, l2_rx) = oneshot::channel();
        core.enqueue(Action::CreateLink {
            name: "conn-2/in".to_string(),
            reply: l2_tx,
        })
        .unwrap();
        let (n1_tx, n1_rx) = oneshot::channel();
        core.enqueue(Action::CreateNode {
            name: "router-b".to_string(),
            reply: n1_tx,
        })
        .unwrap();
        let (n2_tx, n2_rx) = oneshot::channel();
        core.enqueue(Action::CreateNode {
            name: "router-c".to_string(),
            reply: n2_tx,
        })
        .unwrap();
        let (l1, l2) = (l1_rx.await.unwrap(), l2_rx.await.unwrap());
        let (n1, n2) = (n1_rx.await.unwrap(), n2_rx.await.unwrap());

        core.enqueue(Action::AttachLink { address, link: l1 }).unwrap();
        core.enqueue(Action::AttachLink { address, link: l2 }).unwrap();
        core.enqueue(Action::AttachNode { address, node: n1 }).unwrap();
        core.enqueue(Action::DetachLink { link: l1 }).unwrap();
        core.enqueue(Action::DetachNode { node: n1 }).unwrap();
        // Already detached: must be a no-op.
        core.enqueue(Action::DetachNode { node: n1 }).unwrap();
        // Never attached at all: also a no-op.
        core.enqueue(Action::DetachNode { node: n2 }).unwrap();

        let (probe_tx, probe_rx) = oneshot::channel();
        core.enqueue(Action::Inspect(Box::new(move |registry| {
            let links: Vec<_> = registry.address_links(address).collect();
            let nodes: Vec<_> = registry.address_nodes(address).collect();
            let never_attached = registry.node(n2).unwrap().attached_address();
            let invariants = check_all_invariants(registry).is_ok();
            let _ = probe_tx.send((links, nodes, never_attached, invariants));
        })))
        .unwrap();

        let (links, nodes, never_attached, invariants_hold) = probe_rx.await.unwrap();
        assert_eq!(links, vec![l2]);
        assert!(nodes.is_empty());
        assert_eq!(never_attached, None);
        assert!(invariants_hold);

        core.shutdown().await;
    }
}
