//! # Agent Module (C4)
//!
//! A mutable cell whose updates are serialized through a cooperative actor:
//! any number of producers can queue updates concurrently, but they are
//! always applied one at a time, in the order they were sent.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{oneshot, Mutex as AsyncMutex};

// Layer 3: Internal module imports
use crate::actor::{Actor, ActorContext, ActorRef};
use crate::group::Group;
use crate::message::Message;
use crate::monitoring::AgentEventKind;
use crate::util::ActorId;

/// Errors an [`Agent`] can surface back to a caller.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent's internal actor has already stopped.
    #[error("agent actor is no longer running")]
    Stopped,
}

type UpdateFn<T> = Box<dyn FnOnce(T) -> T + Send>;
type ReadFn<T> = Box<dyn FnOnce(&T) + Send>;

/// Take-once slot carrying an update closure through the mailbox. `Clone`
/// and `Debug` are satisfied structurally (the `Arc<Mutex<..>>>` itself is
/// both) without requiring anything of the closure inside.
struct UpdateSlot<T>(Arc<AsyncMutex<Option<UpdateFn<T>>>>);

impl<T> Clone for UpdateSlot<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for UpdateSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateSlot").finish_non_exhaustive()
    }
}

struct ReadSlot<T>(Arc<AsyncMutex<Option<ReadFn<T>>>>);

impl<T> Clone for ReadSlot<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for ReadSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadSlot").finish_non_exhaustive()
    }
}

enum AgentMessage<T> {
    Update(UpdateSlot<T>),
    Read(ReadSlot<T>),
}

impl<T> Clone for AgentMessage<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Update(slot) => Self::Update(slot.clone()),
            Self::Read(slot) => Self::Read(slot.clone()),
        }
    }
}

impl<T> fmt::Debug for AgentMessage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update(slot) => f.debug_tuple("Update").field(slot).finish(),
            Self::Read(slot) => f.debug_tuple("Read").field(slot).finish(),
        }
    }
}

impl<T: Send + Sync + 'static> Message for AgentMessage<T> {
    const MESSAGE_TYPE: &'static str = "agent_update";
}

#[derive(Debug, Error)]
#[error("agent update panicked or was dropped before completion")]
struct AgentActorError;

struct AgentActor<T> {
    // `Option` only to let `handle_message` move the value into the update
    // closure by value; it is `Some` at every point other actor code can
    // observe it.
    value: Option<T>,
}

#[async_trait]
impl<T: Send + Sync + 'static> Actor for AgentActor<T> {
    type Message = AgentMessage<T>;
    type Error = AgentActorError;

    async fn handle_message(
        &mut self,
        message: Self::Message,
        ctx: &mut ActorContext<Self::Message>,
    ) -> Result<(), Self::Error> {
        match message {
            AgentMessage::Update(slot) => {
                if let Some(update) = slot.0.lock().await.take() {
                    let old = self.value.take().ok_or(AgentActorError)?;
                    self.value = Some(update(old));
                }
                ctx.group()
                    .record_agent_event(
                        AgentEventKind::UpdateApplied { duration_micros: 0 },
                        *ctx.address().id(),
                    )
                    .await;
            }
            AgentMessage::Read(slot) => {
                if let (Some(read), Some(value)) = (slot.0.lock().await.take(), self.value.as_ref()) {
                    read(value);
                }
            }
        }
        Ok(())
    }
}

/// A mutable cell whose updates are applied one at a time by an internal
/// cooperative actor (see [`crate::actor`]).
pub struct Agent<T: Send + Sync + 'static> {
    actor_ref: ActorRef<AgentMessage<T>>,
    actor_id: ActorId,
}

impl<T: Send + Sync + Clone + 'static> Agent<T> {
    /// Create an agent holding `initial`, scheduled on `group`'s pool.
    pub fn new(group: &Group, initial: T) -> Self {
        let actor_ref = group.spawn_cooperative(AgentActor { value: Some(initial) });
        let actor_id = *actor_ref.address().id();
        Self { actor_ref, actor_id }
    }

    /// Queue `update` without waiting for it to apply.
    pub async fn send<F>(&self, update: F) -> Result<(), AgentError>
    where
        F: FnOnce(T) -> T + Send + 'static,
    {
        let slot = UpdateSlot(Arc::new(AsyncMutex::new(Some(Box::new(update) as UpdateFn<T>))));
        self.actor_ref
            .send(AgentMessage::Update(slot))
            .await
            .map_err(|_| AgentError::Stopped)
    }

    /// Queue `update` and wait until it (and everything queued ahead of it)
    /// has been applied.
    ///
    /// Implemented as the update followed by a no-op read: per-actor FIFO
    /// mailbox ordering guarantees the read only runs once the preceding
    /// update has been applied.
    pub async fn send_and_wait<F>(&self, update: F) -> Result<(), AgentError>
    where
        F: FnOnce(T) -> T + Send + 'static,
    {
        self.send(update).await?;
        self.val_with(|_| ()).await
    }

    /// Snapshot the current value by cloning it.
    pub async fn val(&self) -> Result<T, AgentError> {
        self.val_with(Clone::clone).await
    }

    /// Snapshot the current value with `copy_fn`, avoiding aliasing a
    /// mutable field inside `T`. Blocks until every update queued ahead of
    /// this call has been applied.
    pub async fn val_with<F, R>(&self, copy_fn: F) -> Result<R, AgentError>
    where
        F: FnOnce(&T) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let read: ReadFn<T> = Box::new(move |value: &T| {
            let _ = tx.send(copy_fn(value));
        });
        let slot = ReadSlot(Arc::new(AsyncMutex::new(Some(read))));
        self.actor_ref
            .send(AgentMessage::Read(slot))
            .await
            .map_err(|_| AgentError::Stopped)?;
        rx.await.map_err(|_| AgentError::Stopped)
    }

    /// Request an orderly stop of the agent's internal actor.
    pub fn stop(&self) {
        self.actor_ref.stop();
    }

    /// The id of the internal actor backing this agent.
    pub fn id(&self) -> ActorId {
        self.actor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupConfig;

    #[tokio::test]
    async fn test_send_then_val_reflects_update() {
        let group = Group::new(GroupConfig::default());
        let agent = Agent::new(&group, 0i64);
        agent.send(|v| v + 1).await.unwrap();
        agent.send_and_wait(|v| v + 1).await.unwrap();
        assert_eq!(agent.val().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_sends_serialize() {
        let group = Group::new(GroupConfig::default());
        let agent = Arc::new(Agent::new(&group, 0u64));
        let mut handles = Vec::new();
        for _ in 0..1000 {
            let agent = agent.clone();
            handles.push(tokio::spawn(async move {
                agent.send_and_wait(|v| v + 1).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(agent.val().await.unwrap(), 1000);
    }

    #[tokio::test]
    async fn test_val_with_copy_fn() {
        let group = Group::new(GroupConfig::default());
        let agent = Agent::new(&group, vec![1, 2, 3]);
        let len = agent.val_with(|v| v.len()).await.unwrap();
        assert_eq!(len, 3);
    }
}
