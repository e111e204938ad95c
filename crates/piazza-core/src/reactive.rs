//! `StateCell<T>` - the observable container the domain stores live in
//!
//! A `StateCell` wraps one domain state value and notifies observers through
//! version counting. Views subscribe and poll; they always observe the
//! latest committed snapshot, and rapid updates coalesce into one.
//!
//! # Runtime Agnostic Design
//!
//! Only std primitives (`RwLock`, `AtomicU64`) are used, so the cell works
//! from sync code, any async runtime, or a UI event loop. Higher layers can
//! wrap subscriptions in async adapters when they need push semantics.

// Allow expect on RwLock::read/write - lock poisoning from panics
// is unrecoverable, so expect() is the appropriate handling pattern.
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

struct CellInner<T> {
    /// Current state value.
    value: RwLock<T>,
    /// Bumped once per committed transition.
    version: AtomicU64,
}

/// A versioned, observable state container.
///
/// Cloning a `StateCell` produces another handle to the same state; all
/// handles observe the same transitions.
///
/// Transitions commit through [`StateCell::mutate`], which runs the closure
/// under the write lock: one invocation is atomic with respect to every
/// other reader and writer, and transitions commit in lock-acquisition
/// order.
#[derive(Clone)]
pub struct StateCell<T> {
    inner: Arc<CellInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(CellInner {
                value: RwLock::new(value),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Clone out the current snapshot.
    pub fn get(&self) -> T {
        self.inner
            .value
            .read()
            .expect("state cell lock poisoned")
            .clone()
    }

    /// The number of transitions committed so far.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Replace the state wholesale.
    pub fn set(&self, value: T) {
        {
            let mut guard = self.inner.value.write().expect("state cell lock poisoned");
            *guard = value;
        }
        self.inner.version.fetch_add(1, Ordering::Release);
    }

    /// Run one state transition.
    ///
    /// The closure receives exclusive access to the state; its whole body is
    /// one atomic transition (no observer sees an intermediate value), and
    /// its return value is handed back to the caller. This is the entry
    /// point every store reducer goes through.
    pub fn mutate<R>(&self, transition: impl FnOnce(&mut T) -> R) -> R {
        let out = {
            let mut guard = self.inner.value.write().expect("state cell lock poisoned");
            transition(&mut guard)
        };
        self.inner.version.fetch_add(1, Ordering::Release);
        out
    }

    /// Observe future transitions.
    ///
    /// The subscription starts at the current version: only transitions
    /// committed after this call are reported by `poll`.
    pub fn subscribe(&self) -> StateSubscription<T> {
        StateSubscription {
            source: self.inner.clone(),
            last_version: self.inner.version.load(Ordering::Acquire),
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.get())
            .field("version", &self.version())
            .finish()
    }
}

/// A poll-based subscription to a [`StateCell`].
///
/// Tracks the last version it observed; `poll` reports a snapshot only when
/// the cell has advanced past it. Version-based (not queue-based): several
/// transitions between polls collapse into the latest snapshot.
pub struct StateSubscription<T> {
    source: Arc<CellInner<T>>,
    last_version: u64,
}

impl<T: Clone + Send + Sync + 'static> StateSubscription<T> {
    /// Whether the cell changed since the last `poll`.
    pub fn has_changed(&self) -> bool {
        self.source.version.load(Ordering::Acquire) > self.last_version
    }

    /// Take the newest snapshot if the cell advanced, `None` otherwise.
    pub fn poll(&mut self) -> Option<T> {
        let current = self.source.version.load(Ordering::Acquire);
        if current > self.last_version {
            self.last_version = current;
            Some(
                self.source
                    .value
                    .read()
                    .expect("state cell lock poisoned")
                    .clone(),
            )
        } else {
            None
        }
    }

    /// Current snapshot regardless of change tracking.
    pub fn get(&self) -> T {
        self.source
            .value
            .read()
            .expect("state cell lock poisoned")
            .clone()
    }
}
