//! Actor lifecycle state machine.
//!
//! `Created -> Running -> Stopping -> Stopped`, with `Stopped` reached
//! either via an orderly `stop()`, a one-shot body returning, or an
//! uncaught handler failure. There is no `Failed` state: a failure always
//! terminates the actor, it does not require supervisor intervention.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
// (none)

/// Actor state in the lifecycle state machine.
///
/// # Example
///
/// ```rust
/// use concurro::ActorState;
///
/// let state = ActorState::Created;
/// assert_eq!(state, ActorState::Created);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// Actor has been constructed but `start()` has not yet run.
    Created,

    /// Actor is running and processing messages.
    Running,

    /// Actor is draining its mailbox (orderly stop) or handling its final
    /// message; no further messages are accepted.
    Stopping,

    /// Terminal state. Reached via `stop()`, `terminate()`, a one-shot
    /// body returning, or an uncaught handler failure.
    Stopped,
}

impl Default for ActorState {
    fn default() -> Self {
        Self::Created
    }
}

/// Tracks the current state of an actor and when it last changed.
///
/// # Example
///
/// ```rust
/// use concurro::{ActorLifecycle, ActorState};
///
/// let mut lifecycle = ActorLifecycle::new();
/// assert_eq!(lifecycle.state(), ActorState::Created);
///
/// lifecycle.transition_to(ActorState::Running);
/// assert_eq!(lifecycle.state(), ActorState::Running);
/// ```
#[derive(Debug, Clone)]
pub struct ActorLifecycle {
    state: ActorState,
    last_state_change: DateTime<Utc>,
}

impl ActorLifecycle {
    /// Create a new lifecycle tracker in the `Created` state.
    pub fn new() -> Self {
        Self {
            state: ActorState::Created,
            last_state_change: Utc::now(), // §3.2
        }
    }

    /// Transition to a new state, recording the transition time.
    pub fn transition_to(&mut self, new_state: ActorState) {
        self.state = new_state;
        self.last_state_change = Utc::now(); // §3.2
    }

    /// Get the current actor state.
    pub fn state(&self) -> ActorState {
        self.state
    }

    /// Get the timestamp of the last state change.
    pub fn last_state_change(&self) -> DateTime<Utc> {
        self.last_state_change
    }

    /// A `Stopped` actor never accepts another message or transition.
    pub fn is_terminal(&self) -> bool {
        self.state == ActorState::Stopped
    }

    /// Whether the actor is currently running (can dequeue and handle).
    pub fn is_running(&self) -> bool {
        self.state == ActorState::Running
    }
}

impl Default for ActorLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
