//! Value objects for router core configuration.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_BUFFER_CAPACITY;

/// Router core configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Fixed capacity of each pooled buffer, in bytes. Every buffer handed
    /// out by the core's pool has exactly this capacity.
    pub buffer_capacity: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}
