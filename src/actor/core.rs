//! Actor run loops: the two scheduling flavors a [`crate::group::Group`]
//! can spawn an [`Actor`] onto.
//!
//! A pinned actor holds one pool worker for its entire life and blocks on
//! `recv().await` between messages. A cooperative actor holds no worker
//! while idle; sending it a message wakes a burst of work on the pool that
//! drains whatever is queued and then releases the worker again. Neither
//! flavor emulates a suspended continuation: `handle_message` is the whole
//! reducer, and "suspended" just means the mailbox is currently empty.

// Layer 1: Standard library imports
use std::sync::atomic::Ordering;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tokio::sync::Mutex as AsyncMutex;

// Layer 3: Internal module imports
use super::context::ActorContext;
use super::handle::{ActorControl, ActorRef, MailboxHandle};
use super::lifecycle::{ActorLifecycle, ActorState};
use super::traits::Actor;
use crate::group::Group;
use crate::mailbox::{
    AtomicMetrics, BoundedMailbox, MailboxReceiver, TryRecvError, UnboundedMailbox,
};
use crate::message::{Message, MessageEnvelope};
use crate::monitoring::ActorEventKind;
use crate::util::ActorAddress;

/// Either flavor of mailbox receiver an actor run loop owns. Mirrors
/// [`MailboxHandle`] on the send side.
enum MailboxEnd<M: Message> {
    Bounded(BoundedMailbox<M, AtomicMetrics>),
    Unbounded(UnboundedMailbox<M, AtomicMetrics>),
}

impl<M: Message> MailboxEnd<M> {
    async fn recv(&mut self) -> Option<MessageEnvelope<M>> {
        match self {
            Self::Bounded(mailbox) => mailbox.recv().await,
            Self::Unbounded(mailbox) => mailbox.recv().await,
        }
    }

    fn try_recv(&mut self) -> Result<MessageEnvelope<M>, TryRecvError> {
        match self {
            Self::Bounded(mailbox) => mailbox.try_recv(),
            Self::Unbounded(mailbox) => mailbox.try_recv(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Bounded(mailbox) => mailbox.is_empty(),
            Self::Unbounded(mailbox) => mailbox.is_empty(),
        }
    }
}

fn new_mailbox<M: Message>(capacity: Option<usize>) -> (MailboxEnd<M>, MailboxHandle<M>) {
    match capacity {
        Some(capacity) => {
            let (mailbox, sender) = BoundedMailbox::new(capacity);
            (MailboxEnd::Bounded(mailbox), MailboxHandle::Bounded(sender))
        }
        None => {
            let (mailbox, sender) = UnboundedMailbox::new();
            (
                MailboxEnd::Unbounded(mailbox),
                MailboxHandle::Unbounded(sender),
            )
        }
    }
}

/// Processes exactly one envelope. Returns `Err` with the actor error on
/// handler failure, leaving the decision of what to do next to the caller.
async fn handle_one<A: Actor>(
    actor: &mut A,
    ctx: &mut ActorContext<A::Message>,
    group: &Group,
    address: &ActorAddress,
    envelope: MessageEnvelope<A::Message>,
) -> Result<(), A::Error> {
    ctx.set_reply_to(envelope.reply_to.clone());
    group
        .record_actor_event(
            ActorEventKind::MessageReceived {
                message_type: envelope.message_type().to_string(),
            },
            *address.id(),
        )
        .await;

    let start = chrono::Utc::now(); // §3.2
    let result = actor.handle_message(envelope.payload, ctx).await;
    let duration_micros = (chrono::Utc::now() - start).num_microseconds().unwrap_or(0).max(0) as u64;

    match &result {
        Ok(()) => {
            group
                .record_actor_event(
                    ActorEventKind::MessageProcessed {
                        message_type: A::Message::MESSAGE_TYPE.to_string(),
                        duration_micros,
                    },
                    *address.id(),
                )
                .await;
        }
        Err(error) => {
            group
                .record_actor_event(
                    ActorEventKind::Failed {
                        error: error.to_string(),
                    },
                    *address.id(),
                )
                .await;
        }
    }
    result
}

async fn finish_stopped<A: Actor>(
    actor: &mut A,
    lifecycle: &mut ActorLifecycle,
    ctx: &mut ActorContext<A::Message>,
    group: &Group,
    address: &ActorAddress,
    run_post_stop: bool,
) {
    lifecycle.transition_to(ActorState::Stopping);
    if run_post_stop {
        let _ = actor.post_stop(ctx).await;
    }
    lifecycle.transition_to(ActorState::Stopped);
    group
        .record_actor_event(ActorEventKind::Stopped, *address.id())
        .await;
    group.deregister_actor(address.id());
}

async fn finish_failure<A: Actor>(
    actor: &mut A,
    lifecycle: &mut ActorLifecycle,
    ctx: &mut ActorContext<A::Message>,
    group: &Group,
    address: &ActorAddress,
    error: A::Error,
) {
    lifecycle.transition_to(ActorState::Stopped);
    actor.on_failure(error, ctx).await;
    group
        .record_actor_event(ActorEventKind::Stopped, *address.id())
        .await;
    group.deregister_actor(address.id());
}

fn build_ref<M: Message>(address: ActorAddress, mailbox: MailboxHandle<M>) -> (ActorRef<M>, Arc<ActorControl>) {
    let control = Arc::new(ActorControl::new());
    let actor_ref = ActorRef::new(address, mailbox, control.clone());
    (actor_ref, control)
}

/// Spawn `actor` pinned to one pool worker for its entire life.
pub(crate) fn spawn_pinned<A: Actor>(
    group: Group,
    address: ActorAddress,
    actor: A,
    mailbox_capacity: Option<usize>,
) -> ActorRef<A::Message> {
    let (mailbox, sender) = new_mailbox(mailbox_capacity);
    let (actor_ref, control) = build_ref(address.clone(), sender);
    group.register_actor(*address.id(), actor_ref.clone());

    let pool = group.pool().clone();
    let run_group = group.clone();
    let run_address = address;
    let _ = pool.clone().spawn_background(async move {
        let permit = pool.acquire_lifetime_permit().await.ok().flatten();
        run_pinned(actor, run_address, run_group, mailbox, control).await;
        drop(permit);
    });

    actor_ref
}

async fn run_pinned<A: Actor>(
    mut actor: A,
    address: ActorAddress,
    group: Group,
    mut mailbox: MailboxEnd<A::Message>,
    control: Arc<ActorControl>,
) {
    let mut ctx = ActorContext::new(address.clone(), group.clone());
    let mut lifecycle = ActorLifecycle::new();

    group
        .record_actor_event(ActorEventKind::Spawned, *address.id())
        .await;

    if let Err(error) = actor.pre_start(&mut ctx).await {
        finish_failure(&mut actor, &mut lifecycle, &mut ctx, &group, &address, error).await;
        return;
    }
    lifecycle.transition_to(ActorState::Running);
    group
        .record_actor_event(ActorEventKind::Started, *address.id())
        .await;

    loop {
        if control.terminate_requested.load(Ordering::Acquire) {
            finish_stopped(&mut actor, &mut lifecycle, &mut ctx, &group, &address, false).await;
            return;
        }

        if control.stop_requested.load(Ordering::Acquire) {
            match mailbox.try_recv() {
                Ok(envelope) => {
                    if let Err(error) = handle_one(&mut actor, &mut ctx, &group, &address, envelope).await {
                        finish_failure(&mut actor, &mut lifecycle, &mut ctx, &group, &address, error).await;
                        return;
                    }
                    continue;
                }
                Err(_) => {
                    finish_stopped(&mut actor, &mut lifecycle, &mut ctx, &group, &address, true).await;
                    return;
                }
            }
        }

        match mailbox.recv().await {
            Some(envelope) => {
                if let Err(error) = handle_one(&mut actor, &mut ctx, &group, &address, envelope).await {
                    finish_failure(&mut actor, &mut lifecycle, &mut ctx, &group, &address, error).await;
                    return;
                }
            }
            None => {
                finish_stopped(&mut actor, &mut lifecycle, &mut ctx, &group, &address, true).await;
                return;
            }
        }
    }
}

struct CooperativeState<A: Actor> {
    actor: A,
    ctx: ActorContext<A::Message>,
    mailbox: MailboxEnd<A::Message>,
    lifecycle: ActorLifecycle,
    started: bool,
}

/// Spawn `actor` cooperatively: it holds no pool worker until a message
/// arrives, then processes a burst and releases the worker again.
pub(crate) fn spawn_cooperative<A: Actor>(
    group: Group,
    address: ActorAddress,
    actor: A,
    mailbox_capacity: Option<usize>,
    fair: bool,
) -> ActorRef<A::Message> {
    let (mailbox, sender) = new_mailbox(mailbox_capacity);
    let (mut actor_ref, control) = build_ref(address.clone(), sender);
    group.register_actor(*address.id(), actor_ref.clone());

    let ctx = ActorContext::new(address.clone(), group.clone());
    let state = Arc::new(AsyncMutex::new(CooperativeState {
        actor,
        ctx,
        mailbox,
        lifecycle: ActorLifecycle::new(),
        started: false,
    }));

    let wake = make_wake(state, group, address, control.clone(), fair);
    actor_ref.set_wake(wake);
    // Trigger an initial burst so `pre_start` runs even if no message ever
    // arrives.
    actor_ref.trigger_wake();

    actor_ref
}

fn make_wake<A: Actor>(
    state: Arc<AsyncMutex<CooperativeState<A>>>,
    group: Group,
    address: ActorAddress,
    control: Arc<ActorControl>,
    fair: bool,
) -> Arc<dyn Fn() + Send + Sync> {
    Arc::new(move || {
        if control
            .scheduled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let state = state.clone();
            let group = group.clone();
            let address = address.clone();
            let control = control.clone();
            let pool = group.pool().clone();
            let _ = pool.spawn_background(async move {
                run_cooperative_burst(state, group, address, control, fair).await;
            });
        }
    })
}

async fn release_and_recheck<A: Actor>(
    state: &Arc<AsyncMutex<CooperativeState<A>>>,
    group: &Group,
    address: &ActorAddress,
    control: &Arc<ActorControl>,
    fair: bool,
) {
    control.scheduled.store(false, Ordering::Release);
    let should_reschedule = {
        let guard = state.lock().await;
        !guard.lifecycle.is_terminal() && !guard.mailbox.is_empty()
    };
    if should_reschedule
        && control
            .scheduled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    {
        let state = state.clone();
        let group = group.clone();
        let address = address.clone();
        let control = control.clone();
        let pool = group.pool().clone();
        let _ = pool.spawn_background(run_cooperative_burst(state, group, address, control, fair));
    }
}

fn run_cooperative_burst<A: Actor>(
    state: Arc<AsyncMutex<CooperativeState<A>>>,
    group: Group,
    address: ActorAddress,
    control: Arc<ActorControl>,
    fair: bool,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
    Box::pin(run_cooperative_burst_inner(state, group, address, control, fair))
}

async fn run_cooperative_burst_inner<A: Actor>(
    state: Arc<AsyncMutex<CooperativeState<A>>>,
    group: Group,
    address: ActorAddress,
    control: Arc<ActorControl>,
    fair: bool,
) {
    loop {
        let mut guard = state.lock().await;
        if guard.lifecycle.is_terminal() {
            drop(guard);
            control.scheduled.store(false, Ordering::Release);
            return;
        }

        if !guard.started {
            guard.started = true;
            let CooperativeState { actor, ctx, .. } = &mut *guard;
            group
                .record_actor_event(ActorEventKind::Spawned, *address.id())
                .await;
            if let Err(error) = actor.pre_start(ctx).await {
                let CooperativeState {
                    actor, lifecycle, ctx, ..
                } = &mut *guard;
                finish_failure(actor, lifecycle, ctx, &group, &address, error).await;
                drop(guard);
                control.scheduled.store(false, Ordering::Release);
                return;
            }
            guard.lifecycle.transition_to(ActorState::Running);
            group
                .record_actor_event(ActorEventKind::Started, *address.id())
                .await;
        }

        if control.terminate_requested.load(Ordering::Acquire) {
            let CooperativeState {
                actor, lifecycle, ctx, ..
            } = &mut *guard;
            finish_stopped(actor, lifecycle, ctx, &group, &address, false).await;
            drop(guard);
            control.scheduled.store(false, Ordering::Release);
            return;
        }

        match guard.mailbox.try_recv() {
            Ok(envelope) => {
                let CooperativeState { actor, ctx, .. } = &mut *guard;
                let result = handle_one(actor, ctx, &group, &address, envelope).await;
                match result {
                    Ok(()) => {
                        if fair {
                            drop(guard);
                            release_and_recheck(&state, &group, &address, &control, fair).await;
                            return;
                        }
                        // unfair: loop again and drain more if present
                    }
                    Err(error) => {
                        let CooperativeState {
                            actor, lifecycle, ctx, ..
                        } = &mut *guard;
                        finish_failure(actor, lifecycle, ctx, &group, &address, error).await;
                        drop(guard);
                        control.scheduled.store(false, Ordering::Release);
                        return;
                    }
                }
            }
            Err(TryRecvError::Empty) => {
                if control.stop_requested.load(Ordering::Acquire) {
                    let CooperativeState {
                        actor, lifecycle, ctx, ..
                    } = &mut *guard;
                    finish_stopped(actor, lifecycle, ctx, &group, &address, true).await;
                }
                drop(guard);
                control.scheduled.store(false, Ordering::Release);
                return;
            }
            Err(TryRecvError::Closed) => {
                let CooperativeState {
                    actor, lifecycle, ctx, ..
                } = &mut *guard;
                finish_stopped(actor, lifecycle, ctx, &group, &address, false).await;
                drop(guard);
                control.scheduled.store(false, Ordering::Release);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::AtomicU32;
    use thiserror::Error;
    use tokio::sync::oneshot;

    use crate::group::GroupConfig;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    enum CounterMessage {
        Increment,
        Get(#[serde(skip)] Option<CounterReplySlot>),
    }

    #[derive(Debug, Clone)]
    struct CounterReplySlot(Arc<AsyncMutex<Option<oneshot::Sender<u32>>>>);

    impl Message for CounterMessage {
        const MESSAGE_TYPE: &'static str = "counter";
    }

    #[derive(Debug, Error)]
    #[error("counter actor failure")]
    struct CounterError;

    struct CounterActor {
        count: Arc<AtomicU32>,
    }

    #[async_trait]
    impl Actor for CounterActor {
        type Message = CounterMessage;
        type Error = CounterError;

        async fn handle_message(
            &mut self,
            message: Self::Message,
            _ctx: &mut ActorContext<Self::Message>,
        ) -> Result<(), Self::Error> {
            match message {
                CounterMessage::Increment => {
                    self.count.fetch_add(1, Ordering::SeqCst);
                }
                CounterMessage::Get(Some(slot)) => {
                    if let Some(tx) = slot.0.lock().await.take() {
                        let _ = tx.send(self.count.load(Ordering::SeqCst));
                    }
                }
                CounterMessage::Get(None) => {}
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_pinned_actor_processes_messages() {
        let group = Group::new(GroupConfig::default());
        let count = Arc::new(AtomicU32::new(0));
        let actor_ref = group.spawn_pinned(CounterActor {
            count: count.clone(),
        });

        for _ in 0..5 {
            actor_ref.send(CounterMessage::Increment).await.unwrap();
        }

        let (tx, rx) = oneshot::channel();
        actor_ref
            .send(CounterMessage::Get(Some(CounterReplySlot(Arc::new(
                AsyncMutex::new(Some(tx)),
            )))))
            .await
            .unwrap();
        let observed = rx.await.unwrap();
        assert_eq!(observed, 5);
    }

    #[tokio::test]
    async fn test_cooperative_actor_processes_messages() {
        let group = Group::new(GroupConfig::default());
        let count = Arc::new(AtomicU32::new(0));
        let actor_ref = group.spawn_cooperative(CounterActor {
            count: count.clone(),
        });

        for _ in 0..10 {
            actor_ref.send(CounterMessage::Increment).await.unwrap();
        }

        let (tx, rx) = oneshot::channel();
        actor_ref
            .send(CounterMessage::Get(Some(CounterReplySlot(Arc::new(
                AsyncMutex::new(Some(tx)),
            )))))
            .await
            .unwrap();
        let observed = rx.await.unwrap();
        assert_eq!(observed, 10);
    }

    #[tokio::test]
    async fn test_stop_drains_queue_before_stopping() {
        let group = Group::new(GroupConfig::default());
        let count = Arc::new(AtomicU32::new(0));
        let actor_ref = group.spawn_pinned(CounterActor {
            count: count.clone(),
        });

        for _ in 0..3 {
            actor_ref.send(CounterMessage::Increment).await.unwrap();
        }
        actor_ref.stop();

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
