//! Metrics recorder trait for mailbox operations.
//!
//! Abstracts the counting mechanism behind a mailbox's `sent`/`received`/
//! `dropped` figures so [`super::super::BoundedMailbox`] and
//! [`super::super::UnboundedMailbox`] stay generic over `R: MetricsRecorder`
//! rather than depending on one concrete counter type.

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

/// Counts and timestamps mailbox traffic. Implementors must be safe to
/// share across the sender and receiver halves of a mailbox.
pub trait MetricsRecorder: Send + Sync {
    /// Record a message successfully sent to the mailbox.
    fn record_sent(&self);

    /// Record a message successfully received from the mailbox.
    fn record_received(&self);

    /// Record a message dropped by a backpressure policy or TTL expiry.
    fn record_dropped(&self);

    /// Stamp the time of the most recently received message.
    fn update_last_message(&self, timestamp: DateTime<Utc>);

    /// Cumulative count of messages sent.
    fn sent_count(&self) -> u64;

    /// Cumulative count of messages received.
    fn received_count(&self) -> u64;

    /// Cumulative count of messages dropped.
    fn dropped_count(&self) -> u64;

    /// Time of the most recently received message, or `None` if none yet.
    fn last_message_at(&self) -> Option<DateTime<Utc>>;

    /// Messages sent but not yet received. Saturates at zero rather than
    /// underflowing if `received_count` ever exceeds `sent_count`.
    fn in_flight(&self) -> u64 {
        self.sent_count().saturating_sub(self.received_count())
    }
}
