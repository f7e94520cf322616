//! Inbound port (API) for the router core.

use crate::actions::Action;
use crate::domain::CoreError;

/// The only externally safe mutation path into routing state.
///
/// Implementations append to a serialized FIFO queue drained by a single
/// worker; `enqueue` never blocks and is safe from any thread. Effects are
/// observable only through subsequently enqueued actions.
pub trait ActionSink: Send + Sync {
    /// Append an action to the queue.
    ///
    /// # Errors
    ///
    /// `CoreError::ShutDown` once teardown has begun.
    fn enqueue(&self, action: Action) -> Result<(), CoreError>;
}
