//! Application state for the attendance engine API.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::store::Store;

/// The API layer's time source.
///
/// Core rules take `now` as an argument; the clock decides what the
/// handlers pass in, so tests can pin the calendar.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    /// Server-local wall clock.
    System,
    /// A fixed instant, for deterministic tests.
    Fixed(NaiveDateTime),
}

impl Clock {
    /// Returns the current instant according to this clock.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(instant) => *instant,
        }
    }
}

/// Shared application state.
///
/// Holds the backing store and the clock handlers read time from.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
    clock: Clock,
}

impl AppState {
    /// Creates application state over a store, using the system clock.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            clock: Clock::System,
        }
    }

    /// Creates application state with an explicit clock.
    pub fn with_clock(store: Arc<dyn Store>, clock: Clock) -> Self {
        Self { store, clock }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Returns the current instant according to the configured clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}
