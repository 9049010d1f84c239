//! Actor handles: the cloneable send-side reference to a live actor.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none beyond std)

// Layer 3: Internal module imports
use super::error::ActorError;
use crate::mailbox::{AtomicMetrics, BoundedMailboxSender, MailboxSender, UnboundedMailboxSender};
use crate::message::{Message, MessageEnvelope};
use crate::util::ActorAddress;

/// Either flavor of mailbox sender an actor may be backed by.
///
/// An enum rather than a trait object: `MailboxSender` requires `Clone`,
/// which makes it impossible to turn into a `dyn` object, and this crate
/// prefers concrete dispatch over type erasure.
#[derive(Clone)]
pub(crate) enum MailboxHandle<M: Message> {
    Bounded(BoundedMailboxSender<M, AtomicMetrics>),
    Unbounded(UnboundedMailboxSender<M, AtomicMetrics>),
}

impl<M: Message> MailboxHandle<M> {
    async fn send(&self, envelope: MessageEnvelope<M>) -> Result<(), ActorError> {
        let result = match self {
            Self::Bounded(sender) => sender.send(envelope).await,
            Self::Unbounded(sender) => sender.send(envelope).await,
        };
        result.map_err(|_| ActorError::MailboxClosed)
    }

    fn try_send(&self, envelope: MessageEnvelope<M>) -> Result<(), ActorError> {
        let result = match self {
            Self::Bounded(sender) => sender.try_send(envelope),
            Self::Unbounded(sender) => sender.try_send(envelope),
        };
        result.map_err(|_| ActorError::MailboxClosed)
    }
}

/// Shared control block between an `ActorRef` and the running actor core.
///
/// `closed` rejects new sends immediately. `stop_requested` asks the core
/// to drain its current mailbox contents and then stop. `terminate_requested`
/// asks the core to stop without draining. `scheduled` deduplicates wake-up
/// submissions for cooperative actors.
#[derive(Debug)]
pub(crate) struct ActorControl {
    pub(crate) closed: AtomicBool,
    pub(crate) stop_requested: AtomicBool,
    pub(crate) terminate_requested: AtomicBool,
    pub(crate) scheduled: AtomicBool,
}

impl ActorControl {
    pub(crate) fn new() -> Self {
        Self {
            closed: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
            terminate_requested: AtomicBool::new(false),
            scheduled: AtomicBool::new(false),
        }
    }
}

/// A cloneable reference to a live actor's mailbox.
///
/// This is the handle user code and other actors hold to interact with an
/// actor: `send`, `try_send`, `stop`, `terminate`. It carries no behavior of
/// its own; the actor's state machine lives in the spawned core task.
#[derive(Clone)]
pub struct ActorRef<M: Message> {
    address: ActorAddress,
    mailbox: MailboxHandle<M>,
    control: Arc<ActorControl>,
    /// Wakes a cooperative actor's core onto the pool after a successful
    /// send. `None` for pinned actors, which instead block on `recv().await`
    /// and wake naturally when the channel has a new item.
    wake: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl<M: Message> ActorRef<M> {
    pub(crate) fn new(address: ActorAddress, mailbox: MailboxHandle<M>, control: Arc<ActorControl>) -> Self {
        Self {
            address,
            mailbox,
            control,
            wake: None,
        }
    }

    /// Install the wake callback used to schedule a cooperative actor's next
    /// burst. Only called once, right after construction.
    pub(crate) fn set_wake(&mut self, wake: Arc<dyn Fn() + Send + Sync>) {
        self.wake = Some(wake);
    }

    /// Trigger the wake callback directly, without a send. Used to schedule
    /// a cooperative actor's initial `pre_start` burst.
    pub(crate) fn trigger_wake(&self) {
        if let Some(wake) = &self.wake {
            wake();
        }
    }

    /// The address this reference routes to.
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// True once the actor has stopped accepting new messages.
    pub fn is_closed(&self) -> bool {
        self.control.closed.load(Ordering::Acquire)
    }

    /// Deliver `message`, suspending on backpressure for bounded mailboxes.
    ///
    /// Fails with `ActorError::MailboxClosed` once the actor has stopped.
    pub async fn send(&self, message: M) -> Result<(), ActorError> {
        self.send_envelope(MessageEnvelope::new(message)).await
    }

    /// Deliver `message` with an explicit reply-to address, so the receiver
    /// can `ActorContext::reply` back to the sender.
    pub async fn send_with_reply(&self, message: M, reply_to: ActorAddress) -> Result<(), ActorError> {
        self.send_envelope(MessageEnvelope::new(message).with_reply_to(reply_to))
            .await
    }

    /// Non-blocking delivery; fails immediately on a full bounded mailbox.
    pub fn try_send(&self, message: M) -> Result<(), ActorError> {
        self.try_send_envelope(MessageEnvelope::new(message))
    }

    pub(crate) async fn send_envelope(&self, envelope: MessageEnvelope<M>) -> Result<(), ActorError> {
        if self.is_closed() {
            return Err(ActorError::MailboxClosed);
        }
        self.mailbox.send(envelope).await?;
        self.trigger_wake();
        Ok(())
    }

    pub(crate) fn try_send_envelope(&self, envelope: MessageEnvelope<M>) -> Result<(), ActorError> {
        if self.is_closed() {
            return Err(ActorError::MailboxClosed);
        }
        self.mailbox.try_send(envelope)?;
        self.trigger_wake();
        Ok(())
    }

    /// Request an orderly stop: no further sends are accepted, but messages
    /// already queued are handled before the actor reaches `Stopped`.
    pub fn stop(&self) {
        self.control.closed.store(true, Ordering::Release);
        self.control.stop_requested.store(true, Ordering::Release);
    }

    /// Request immediate termination: queued messages are discarded.
    pub fn terminate(&self) {
        self.control.closed.store(true, Ordering::Release);
        self.control.terminate_requested.store(true, Ordering::Release);
    }

    pub(crate) fn control(&self) -> &Arc<ActorControl> {
        &self.control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailbox::traits::MailboxReceiver;
    use crate::mailbox::BoundedMailbox;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestMessage {
        value: u32,
    }

    impl Message for TestMessage {
        const MESSAGE_TYPE: &'static str = "test";
    }

    fn make_ref() -> (ActorRef<TestMessage>, crate::mailbox::BoundedMailbox<TestMessage, AtomicMetrics>) {
        let (mailbox, sender) = BoundedMailbox::new(8);
        let control = Arc::new(ActorControl::new());
        let reference = ActorRef::new(
            ActorAddress::anonymous(),
            MailboxHandle::Bounded(sender),
            control,
        );
        (reference, mailbox)
    }

    #[tokio::test]
    async fn test_send_delivers_message() {
        let (actor_ref, mut mailbox) = make_ref();
        actor_ref.send(TestMessage { value: 42 }).await.unwrap();

        let received = mailbox.recv().await.unwrap();
        assert_eq!(received.payload.value, 42);
    }

    #[tokio::test]
    async fn test_send_with_reply_sets_reply_to() {
        let (actor_ref, mut mailbox) = make_ref();
        let reply_addr = ActorAddress::anonymous();
        actor_ref
            .send_with_reply(TestMessage { value: 1 }, reply_addr.clone())
            .await
            .unwrap();

        let received = mailbox.recv().await.unwrap();
        assert_eq!(received.reply_to, Some(reply_addr));
    }

    #[tokio::test]
    async fn test_stop_rejects_further_sends() {
        let (actor_ref, _mailbox) = make_ref();
        actor_ref.stop();

        let result = actor_ref.send(TestMessage { value: 1 }).await;
        assert!(matches!(result, Err(ActorError::MailboxClosed)));
    }

    #[tokio::test]
    async fn test_terminate_rejects_further_sends() {
        let (actor_ref, _mailbox) = make_ref();
        actor_ref.terminate();

        let result = actor_ref.try_send(TestMessage { value: 1 });
        assert!(matches!(result, Err(ActorError::MailboxClosed)));
    }
}
