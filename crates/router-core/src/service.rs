//! # Router Core Engine
//!
//! The serialized action-processing engine. [`RouterCore::start`] spawns the
//! single worker task that exclusively owns the [`AddressRegistry`]; every
//! structural change to routing state arrives as an [`Action`] through an
//! unbounded MPSC queue and is applied in FIFO order.
//!
//! ## Concurrency
//!
//! - `enqueue` is non-blocking and safe from any thread; order across racing
//!   producers is the channel's send order, with per-producer FIFO preserved.
//! - The worker parks in `recv().await` when the queue is empty; nothing in
//!   the registry takes a lock because nothing else can reach it.
//! - [`RouterCore::shutdown`] closes the queue and joins the worker. The
//!   worker drains every action already enqueued before exiting, so no
//!   pre-shutdown action is dropped. Enqueues racing with shutdown are
//!   rejected with [`CoreError::ShutDown`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::actions::Action;
use crate::domain::{AddressRegistry, BufferPool, CoreConfig, CoreError};
use crate::ports::inbound::ActionSink;
use crate::ports::outbound::ForwarderResolver;

/// Handle to a running core. One per router instance.
///
/// Dropping the handle also shuts the worker down (the queue closes), but
/// [`RouterCore::shutdown`] is the deliberate teardown path: it waits for
/// the drain to finish.
pub struct RouterCore {
    actions: mpsc::UnboundedSender<Action>,
    worker: JoinHandle<()>,
    pool: BufferPool,
}

impl RouterCore {
    /// Start the core: build the registry, hand it to the worker task, and
    /// return the enqueue handle. Must be called within a Tokio runtime.
    pub fn start(config: CoreConfig, resolver: Arc<dyn ForwarderResolver>) -> Self {
        let (actions, queue) = mpsc::unbounded_channel();
        let pool = BufferPool::new(config.buffer_capacity);
        let worker = CoreWorker {
            registry: AddressRegistry::new(resolver),
        };
        let handle = tokio::spawn(worker.run(queue));
        info!(
            target: "router_core",
            buffer_capacity = config.buffer_capacity,
            "router core started"
        );
        Self {
            actions,
            worker: handle,
            pool,
        }
    }

    /// The shared buffer pool, for building [`crate::domain::Field`]
    /// payloads on any thread.
    pub fn buffer_pool(&self) -> BufferPool {
        self.pool.clone()
    }

    /// A cloneable producer handle. Producers keep handles; the router
    /// keeps the `RouterCore` itself for teardown.
    pub fn handle(&self) -> CoreHandle {
        CoreHandle {
            actions: self.actions.downgrade(),
            pool: self.pool.clone(),
        }
    }

    /// Append an action to the queue. Non-blocking; FIFO per producer.
    ///
    /// # Errors
    ///
    /// `CoreError::ShutDown` once teardown has begun.
    pub fn enqueue(&self, action: Action) -> Result<(), CoreError> {
        self.actions.send(action).map_err(|_| CoreError::ShutDown)
    }

    /// Stop the core. Closes the queue and joins the worker; every action
    /// enqueued before this call is executed before the worker exits.
    /// Consuming `self` makes double teardown unrepresentable.
    pub async fn shutdown(self) {
        drop(self.actions);
        if let Err(err) = self.worker.await {
            warn!(target: "router_core", %err, "core worker terminated abnormally");
        }
        info!(target: "router_core", "router core stopped");
    }
}

impl ActionSink for RouterCore {
    fn enqueue(&self, action: Action) -> Result<(), CoreError> {
        RouterCore::enqueue(self, action)
    }
}

/// Cloneable producer-side handle to a running core's queue and pool.
///
/// Holds the sender weakly so outstanding handles never keep the queue open
/// past [`RouterCore::shutdown`]; the worker still exits once the core's own
/// sender drops.
#[derive(Clone)]
pub struct CoreHandle {
    actions: mpsc::WeakUnboundedSender<Action>,
    pool: BufferPool,
}

impl CoreHandle {
    /// Append an action to the queue. Same contract as
    /// [`RouterCore::enqueue`].
    pub fn enqueue(&self, action: Action) -> Result<(), CoreError> {
        let sender = self.actions.upgrade().ok_or(CoreError::ShutDown)?;
        sender.send(action).map_err(|_| CoreError::ShutDown)
    }

    /// The core's shared buffer pool.
    pub fn buffer_pool(&self) -> BufferPool {
        self.pool.clone()
    }
}

impl ActionSink for CoreHandle {
    fn enqueue(&self, action: Action) -> Result<(), CoreError> {
        CoreHandle::enqueue(self, action)
    }
}

/// The single consumer. Owns the registry outright; the ownership transfer
/// into the spawned task is what makes a second writer unrepresentable.
struct CoreWorker {
    registry: AddressRegistry,
}

impl CoreWorker {
    async fn run(mut self, mut queue: mpsc::UnboundedReceiver<Action>) {
        // recv() yields None only after the sender side closes AND the queue
        // is drained, which is exactly the shutdown contract.
        while let Some(action) = queue.recv().await {
            self.apply(action);
        }
        debug!(
            target: "router_core",
            addresses = self.registry.len(),
            "core worker drained queue and exiting"
        );
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::EnsureAddress {
                key,
                semantics,
                reply,
            } => {
                let key = String::from_utf8_lossy(&key.to_vec()).into_owned();
                let id = self.registry.get_or_create(&key, semantics);
                if let Some(reply) = reply {
                    // A gone receiver is the producer's business, not ours.
                    let _ = reply.send(id);
                }
            }
            Action::CreateLink { name, reply } => {
                let id = self.registry.create_link(name);
                let _ = reply.send(id);
            }
            Action::CreateNode { name, reply } => {
                let id = self.registry.create_node(name);
                let _ = reply.send(id);
            }
            Action::AttachLink { address, link } => self.registry.add_link_ref(address, link),
            Action::DetachLink { link } => self.registry.del_link_ref(link),
            Action::AttachNode { address, node } => self.registry.add_node_ref(address, node),
            Action::DetachNode { node } => self.registry.del_node_ref(node),
            Action::Inspect(inspect) => inspect(&self.registry),
        }
    }
}
