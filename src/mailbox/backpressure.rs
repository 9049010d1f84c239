//! What a bounded mailbox does with an incoming message once it's full.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::traits::MailboxError;
use crate::message::{Message, MessageEnvelope, MessagePriority};

/// How a bounded mailbox handles a send when it's at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BackpressureStrategy {
    /// Wait asynchronously for space. For messages that must be delivered.
    Block,

    /// Silently discard the incoming message.
    Drop,

    /// Fail the send immediately with `MailboxError::Full`.
    #[default]
    Error,
}

impl fmt::Display for BackpressureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "Block"),
            Self::Drop => write!(f, "Drop"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl BackpressureStrategy {
    /// Send `envelope` onto `sender` according to this strategy.
    ///
    /// # Errors
    /// Returns `MailboxError::Full` under the `Error` strategy when the
    /// mailbox is at capacity, or `MailboxError::Closed` if the receiver
    /// half has been dropped.
    pub async fn apply<M: Message>(
        &self,
        sender: &mpsc::Sender<MessageEnvelope<M>>,
        envelope: MessageEnvelope<M>,
    ) -> Result<(), MailboxError> {
        match self {
            Self::Block => sender.send(envelope).await.map_err(|_| MailboxError::Closed),

            Self::Drop => match sender.try_send(envelope) {
                Ok(()) => Ok(()),
                Err(mpsc::error::TrySendError::Full(_)) => Ok(()),
                Err(mpsc::error::TrySendError::Closed(_)) => Err(MailboxError::Closed),
            },

            Self::Error => sender.try_send(envelope).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    MailboxError::Full { capacity: sender.max_capacity() }
                }
                mpsc::error::TrySendError::Closed(_) => MailboxError::Closed,
            }),
        }
    }

    /// Default strategy by priority: `Critical`/`High` block, `Normal`
    /// errors, `Low` drops.
    pub fn for_priority(priority: MessagePriority) -> Self {
        match priority {
            MessagePriority::Critical | MessagePriority::High => Self::Block,
            MessagePriority::Normal => Self::Error,
            MessagePriority::Low => Self::Drop,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct TestMsg {
        content: String,
    }

    impl Message for TestMsg {
        const MESSAGE_TYPE: &'static str = "test_msg";
    }

    #[test]
    fn test_backpressure_strategy_default() {
        assert_eq!(BackpressureStrategy::default(), BackpressureStrategy::Error);
    }

    #[test]
    fn test_strategy_for_priority() {
        assert_eq!(BackpressureStrategy::for_priority(MessagePriority::Critical), BackpressureStrategy::Block);
        assert_eq!(BackpressureStrategy::for_priority(MessagePriority::High), BackpressureStrategy::Block);
        assert_eq!(BackpressureStrategy::for_priority(MessagePriority::Normal), BackpressureStrategy::Error);
        assert_eq!(BackpressureStrategy::for_priority(MessagePriority::Low), BackpressureStrategy::Drop);
    }

    #[tokio::test]
    async fn test_apply_block_strategy_waits() {
        use std::time::Duration;
        use tokio::time::sleep;

        let (sender, mut receiver) = mpsc::channel::<MessageEnvelope<TestMsg>>(1);
        sender.try_send(MessageEnvelope::new(TestMsg { content: "first".to_string() })).unwrap();

        let sender_clone = sender.clone();
        let handle = tokio::spawn(async move {
            BackpressureStrategy::Block
                .apply(&sender_clone, MessageEnvelope::new(TestMsg { content: "second".to_string() }))
                .await
        });

        sleep(Duration::from_millis(10)).await;
        receiver.recv().await.unwrap();
        handle.await.unwrap().unwrap();

        let second = receiver.recv().await.unwrap();
        assert_eq!(second.payload.content, "second");
    }

    #[tokio::test]
    async fn test_apply_error_strategy_full() {
        let (sender, _receiver) = mpsc::channel::<MessageEnvelope<TestMsg>>(1);
        sender.try_send(MessageEnvelope::new(TestMsg { content: "first".to_string() })).unwrap();

        let result = BackpressureStrategy::Error
            .apply(&sender, MessageEnvelope::new(TestMsg { content: "second".to_string() }))
            .await;

        assert!(matches!(result, Err(MailboxError::Full { .. })));
    }

    #[tokio::test]
    async fn test_apply_drop_strategy_discards_silently() {
        let (sender, mut receiver) = mpsc::channel::<MessageEnvelope<TestMsg>>(1);
        sender.try_send(MessageEnvelope::new(TestMsg { content: "first".to_string() })).unwrap();

        BackpressureStrategy::Drop
            .apply(&sender, MessageEnvelope::new(TestMsg { content: "second".to_string() }))
            .await
            .unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.payload.content, "first");
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_apply_closed_channel() {
        let (sender, receiver) = mpsc::channel::<MessageEnvelope<TestMsg>>(1);
        drop(receiver);

        for strategy in [BackpressureStrategy::Block, BackpressureStrategy::Error, BackpressureStrategy::Drop] {
            let result = strategy.apply(&sender, MessageEnvelope::new(TestMsg { content: "test".to_string() })).await;
            assert!(matches!(result, Err(MailboxError::Closed)));
        }
    }
}
