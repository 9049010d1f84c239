//! Per-message actor context: address, identity, and the reply mechanism.

// Layer 1: Standard library imports
use std::marker::PhantomData;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
use super::error::ActorError;
use crate::group::Group;
use crate::message::Message;
use crate::util::{ActorAddress, ActorId};

/// Context passed to `Actor::handle_message` and the other lifecycle hooks.
///
/// Carries the actor's own address, the group it was spawned from (for
/// `reply` resolution and nested primitive creation), and the `reply_to`
/// address attached to the message currently being handled, if any.
pub struct ActorContext<M: Message> {
    address: ActorAddress,
    id: ActorId,
    created_at: DateTime<Utc>,
    reply_to: Option<ActorAddress>,
    group: Group,
    _marker: PhantomData<M>,
}

impl<M: Message> ActorContext<M> {
    pub(crate) fn new(address: ActorAddress, group: Group) -> Self {
        Self {
            id: *address.id(),
            address,
            created_at: Utc::now(), // §3.2
            reply_to: None,
            group,
            _marker: PhantomData,
        }
    }

    /// This actor's own address.
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// This actor's identifier.
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// When this context (and thus the actor) was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The `reply_to` address carried by the message currently being
    /// handled, if the sender attached one.
    pub fn reply_to(&self) -> Option<&ActorAddress> {
        self.reply_to.as_ref()
    }

    /// The group this actor was spawned from, for creating nested
    /// primitives (agents, operators, child actors) that share its pool.
    pub fn group(&self) -> &Group {
        &self.group
    }

    pub(crate) fn set_reply_to(&mut self, reply_to: Option<ActorAddress>) {
        self.reply_to = reply_to;
    }

    /// Send `message` to the address attached as `reply_to` on the current
    /// message. Fails with `ActorError::NoReplyTo` when absent or when the
    /// address no longer resolves to a live actor of type `M`.
    pub async fn reply(&self, message: M) -> Result<(), ActorError> {
        let reply_to = self.reply_to.clone().ok_or(ActorError::NoReplyTo)?;
        let target = self
            .group
            .lookup::<M>(reply_to.id())
            .ok_or(ActorError::NoReplyTo)?;
        target.send(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupConfig;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestMessage;

    impl Message for TestMessage {
        const MESSAGE_TYPE: &'static str = "test";
    }

    #[tokio::test]
    async fn test_context_exposes_address_and_id() {
        let group = Group::new(GroupConfig::default());
        let address = ActorAddress::anonymous();
        let ctx = ActorContext::<TestMessage>::new(address.clone(), group);

        assert_eq!(ctx.address(), &address);
        assert_eq!(ctx.id(), address.id());
    }

    #[tokio::test]
    async fn test_reply_without_reply_to_fails() {
        let group = Group::new(GroupConfig::default());
        let ctx = ActorContext::<TestMessage>::new(ActorAddress::anonymous(), group);

        let result = ctx.reply(TestMessage).await;
        assert!(matches!(result, Err(ActorError::NoReplyTo)));
    }

    #[tokio::test]
    async fn test_reply_to_unresolved_address_fails() {
        let group = Group::new(GroupConfig::default());
        let mut ctx = ActorContext::<TestMessage>::new(ActorAddress::anonymous(), group);
        ctx.set_reply_to(Some(ActorAddress::anonymous()));

        let result = ctx.reply(TestMessage).await;
        assert!(matches!(result, Err(ActorError::NoReplyTo)));
    }
}
