//! # Store
//!
//! Holds the current `AppState` and runs the dispatch loop:
//!
//! ```text
//! dispatch(action)
//!   ├── next = update(&state, &action)        // pure
//!   ├── before = replace(state, next)         // whole-state swap
//!   └── for each subscriber:
//!         on_dispatch(&before, &after, &action, &mut follow_ups)
//! ```
//!
//! Subscribers are where side effects live. They can't call `dispatch`
//! directly (the store is mutably borrowed while they run), so they push
//! follow-up actions instead. Follow-ups run FIFO before the outer
//! `dispatch` returns. Work that completes later (network replies, widget
//! callbacks) goes through a [`Dispatcher`], which the run loop drains.

use std::collections::VecDeque;

use log::{debug, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::action::{Action, update};
use crate::core::state::AppState;

/// Upper bound on actions processed by one outer `dispatch`, follow-ups
/// included. Stops subscribers that keep answering each other.
pub const MAX_CHAINED_DISPATCHES: usize = 64;

/// Post-dispatch hook.
pub trait Subscriber {
    fn on_dispatch(
        &mut self,
        before: &AppState,
        after: &AppState,
        action: &Action,
        follow_ups: &mut Vec<Action>,
    );
}

impl<F> Subscriber for F
where
    F: FnMut(&AppState, &AppState, &Action, &mut Vec<Action>),
{
    fn on_dispatch(
        &mut self,
        before: &AppState,
        after: &AppState,
        action: &Action,
        follow_ups: &mut Vec<Action>,
    ) {
        self(before, after, action, follow_ups)
    }
}

pub struct Store {
    state: AppState,
    subscribers: Vec<Box<dyn Subscriber>>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: initial,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Subscribers run in registration order.
    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Applies `action` and everything it triggers. Returns the number of
    /// actions processed.
    pub fn dispatch(&mut self, action: Action) -> usize {
        let mut queue = VecDeque::from([action]);
        let mut processed = 0;

        while let Some(action) = queue.pop_front() {
            if processed == MAX_CHAINED_DISPATCHES {
                warn!(
                    "Dispatch chain exceeded {} actions; dropping {} pending (next: {})",
                    MAX_CHAINED_DISPATCHES,
                    queue.len() + 1,
                    action.tag()
                );
                break;
            }
            processed += 1;

            debug!("Dispatch: {}", action.tag());
            let next = update(&self.state, &action);
            let before = std::mem::replace(&mut self.state, next);

            let mut follow_ups = Vec::new();
            for subscriber in &mut self.subscribers {
                subscriber.on_dispatch(&before, &self.state, &action, &mut follow_ups);
            }
            queue.extend(follow_ups);
        }

        processed
    }
}

/// Cloneable, `Send` handle for dispatching from outside the run loop.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    tx: UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn channel() -> (Self, UnboundedReceiver<Action>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn dispatch(&self, action: Action) {
        let tag = action.tag();
        if self.tx.send(action).is_err() {
            warn!("Failed to dispatch {}: receiver dropped", tag);
        }
    }
}
