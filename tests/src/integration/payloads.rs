//! # Field Payloads Through the Core's Pool
//!
//! The buffer pool handed out by the core is the one producers use to build
//! payloads, so chunking behavior is pinned here against a configured
//! capacity rather than the pool default.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use router_core::{CoreConfig, Field, NullResolver, RouterCore};

    #[tokio::test]
    async fn test_ten_thousand_bytes_across_4096_byte_buffers() {
        let core = RouterCore::start(
            CoreConfig {
                buffer_capacity: 4096,
            },
            Arc::new(NullResolver),
        );
        let pool = core.buffer_pool();

        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let field = Field::from_bytes(&pool, &payload).unwrap();

        assert_eq!(field.buffer_count(), 3);
        assert_eq!(field.buffers()[0].fill(), 4096);
        assert_eq!(field.buffers()[1].fill(), 4096);
        assert_eq!(field.buffers()[2].fill(), 1808);

        // End-to-end iteration reproduces the original bytes exactly.
        let replay: Vec<u8> = field.cursor().collect();
        assert_eq!(replay, payload);

        // Freeing the field releases exactly the buffers it allocated.
        drop(field);
        assert_eq!(pool.free_count(), 3);

        core.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_payload_builds_no_field() {
        let core = RouterCore::start(CoreConfig::default(), Arc::new(NullResolver));
        let pool = core.buffer_pool();
        assert!(Field::from_bytes(&pool, b"").is_none());
        assert_eq!(pool.free_count(), 0);
        core.shutdown().await;
    }
}
