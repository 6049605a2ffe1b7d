//! Per-view state: a loading flag, the last good data and an optional error.
//!
//! Every fetch is stamped with a [`Ticket`]. A settlement carrying a ticket
//! from an older generation is dropped, so a slow response can never
//! overwrite the result of a newer request.

use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub phase: Phase,
    pub data: Option<T>,
    pub error: Option<String>,
    pub generation: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error: None,
            generation: 0,
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

/// Identifies the fetch a settlement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Owns one view's state and notifies subscribers on every change.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<ViewState<T>>,
}

impl<T> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateCell<T> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ViewState::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.tx.subscribe()
    }

    /// Starts a new generation: enters `Loading` and clears the error.
    /// Data from the previous generation stays until this one settles.
    pub fn begin(&self) -> Ticket {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.phase = Phase::Loading;
            state.error = None;
            generation = state.generation;
        });
        Ticket(generation)
    }

    /// Stores `data` and enters `Success`. Returns false if the ticket is stale.
    pub fn succeed(&self, ticket: Ticket, data: T) -> bool {
        self.settle(ticket, |state| {
            state.phase = Phase::Success;
            state.data = Some(data);
        })
    }

    /// Enters `Error` with an optional user-facing message, optionally
    /// dropping the data of earlier generations. Returns false if the ticket is stale.
    pub fn fail(&self, ticket: Ticket, message: Option<String>, clear_data: bool) -> bool {
        self.settle(ticket, |state| {
            state.phase = Phase::Error;
            state.error = message;
            if clear_data {
                state.data = None;
            }
        })
    }

    fn settle(&self, ticket: Ticket, apply: impl FnOnce(&mut ViewState<T>)) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != ticket.0 {
                debug!(
                    stale = ticket.0,
                    current = state.generation,
                    "discarding superseded result"
                );
                return false;
            }
            apply(state);
            true
        })
    }
}

impl<T: Clone> StateCell<T> {
    pub fn snapshot(&self) -> ViewState<T> {
        self.tx.borrow().clone()
    }

    /// Resolves once the current generation has left `Loading`.
    pub async fn wait_settled(&self) -> ViewState<T> {
        let mut rx = self.tx.subscribe();
        let settled = rx.wait_for(|state| !state.is_loading()).await;
        match settled {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }
}
