//! # Core Lifecycle and Ordering
//!
//! Verifies the engine's serialization guarantees:
//!
//! 1. **Exactly-once**: N actions from any number of producers execute N
//!    times, no loss, no duplication.
//! 2. **Per-producer FIFO**: no reordering within a single producer's
//!    sequence; cross-producer order is whatever the queue saw.
//! 3. **Drain-on-shutdown**: every action enqueued before `shutdown` runs
//!    before the worker exits.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use router_core::{
        Action, AddressSemantics, CoreConfig, Field, NullResolver, RouterCore,
    };
    use tokio::sync::oneshot;

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn start_core() -> RouterCore {
        RouterCore::start(CoreConfig::default(), Arc::new(NullResolver))
    }

    /// Key for action `seq` of producer `producer`: scope-prefixed so the
    /// registry accepts it as a distinct local address.
    fn producer_key(producer: usize, seq: usize) -> String {
        format!("Lproducer-{producer}/seq-{seq}")
    }

    // =========================================================================
    // TESTS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_multi_producer_fifo_exactly_once() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 250;

        crate::init_tracing();
        let core = start_core();
        let mut producers = Vec::new();
        for p in 0..PRODUCERS {
            let handle = core.handle();
            producers.push(tokio::spawn(async move {
                let pool = handle.buffer_pool();
                for seq in 0..PER_PRODUCER {
                    let key = producer_key(p, seq);
                    let field = Field::from_bytes(&pool, key.as_bytes()).unwrap();
                    handle
                        .enqueue(Action::EnsureAddress {
                            key: field,
                            semantics: AddressSemantics::Multicast,
                            reply: None,
                        })
                        .unwrap();
                }
            }));
        }
        for producer in producers {
            producer.await.unwrap();
        }

        // The registry's insertion-order list is the execution transcript:
        // one entry per action, in the order the worker applied them.
        let (probe_tx, probe_rx) = oneshot::channel();
        core.enqueue(Action::Inspect(Box::new(move |registry| {
            let keys: Vec<String> = registry
                .iter()
                .map(|(_, addr)| addr.key().to_string())
                .collect();
            let _ = probe_tx.send(keys);
        })))
        .unwrap();
        let transcript = probe_rx.await.unwrap();
        core.shutdown().await;

        // Exactly once: every key present, none twice.
        assert_eq!(transcript.len(), PRODUCERS * PER_PRODUCER);

        // Per-producer FIFO: each producer's sequence numbers appear in
        // strictly increasing order within the transcript.
        for p in 0..PRODUCERS {
            let prefix = format!("Lproducer-{p}/seq-");
            let seqs: Vec<usize> = transcript
                .iter()
                .filter_map(|key| key.strip_prefix(&prefix))
                .map(|seq| seq.parse().unwrap())
                .collect();
            assert_eq!(seqs.len(), PER_PRODUCER);
            assert!(seqs.windows(2).all(|w| w[0] < w[1]), "producer {p} reordered");
        }
    }

    #[tokio::test]
    async fn test_shutdown_drains_every_enqueued_action() {
        const PENDING: usize = 500;

        let core = start_core();
        let pool = core.buffer_pool();
        for seq in 0..PENDING {
            let key = producer_key(0, seq);
            core.enqueue(Action::EnsureAddress {
                key: Field::from_bytes(&pool, key.as_bytes()).unwrap(),
                semantics: AddressSemantics::Closest,
                reply: None,
            })
            .unwrap();
        }
        let (probe_tx, probe_rx) = oneshot::channel();
        core.enqueue(Action::Inspect(Box::new(move |registry| {
            let _ = probe_tx.send(registry.len());
        })))
        .unwrap();

        // Shutdown immediately: the worker must still apply all 500 ensures
        // plus the probe before exiting.
        core.shutdown().await;
        assert_eq!(probe_rx.await.unwrap(), PENDING);
    }

    #[tokio::test]
    async fn test_handles_reject_enqueue_after_shutdown() {
        let core = start_core();
        let handle = core.handle();
        let pool = handle.buffer_pool();
        core.shutdown().await;

        let key = Field::from_bytes(&pool, b"Llate").unwrap();
        let result = handle.enqueue(Action::EnsureAddress {
            key,
            semantics: AddressSemantics::Multicast,
            reply: None,
        });
        assert!(result.is_err());
    }
}
