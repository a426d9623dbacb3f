// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use sensor_array_core::NamedState;
use serde_json::Value;

/// Handle to the cumulative state of an accumulating array.
///
/// Every clone refers to the same mapping, which the merge loop mutates in place each
/// cycle. Holding the guard returned by [`SharedState::lock`] stalls the loop, so keep
/// it short.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<NamedState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, NamedState> {
        self.inner.lock()
    }

    /// A copy of the current contents.
    pub fn snapshot(&self) -> NamedState {
        self.inner.lock().clone()
    }

    /// Whether both handles refer to the same mapping.
    pub fn ptr_eq(&self, other: &SharedState) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SharedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedState").field(&*self.inner.lock()).finish()
    }
}

/// The value yielded by one merge cycle.
#[derive(Debug, Clone)]
pub enum Snapshot {
    /// Fresh merge of this cycle's contributions only.
    Cycle(NamedState),
    /// The array's cumulative state, shared with every other yield of the same array.
    Cumulative(SharedState),
}

impl Snapshot {
    pub fn is_cumulative(&self) -> bool {
        matches!(self, Snapshot::Cumulative(_))
    }

    /// Runs `f` against the snapshot's contents.
    pub fn with_state<T>(&self, f: impl FnOnce(&NamedState) -> T) -> T {
        match self {
            Snapshot::Cycle(state) => f(state),
            Snapshot::Cumulative(shared) => f(&*shared.lock()),
        }
    }

    /// An owned copy of the contents. For a cumulative snapshot this is the state at
    /// the time of the call, which may already include later cycles.
    pub fn to_state(&self) -> NamedState {
        self.with_state(NamedState::clone)
    }

    pub fn into_state(self) -> NamedState {
        match self {
            Snapshot::Cycle(state) => state,
            Snapshot::Cumulative(shared) => shared.snapshot(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.with_state(|state| state.get(key).cloned())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.with_state(|state| state.contains_key(key))
    }

    pub fn shared(&self) -> Option<&SharedState> {
        match self {
            Snapshot::Cycle(_) => None,
            Snapshot::Cumulative(shared) => Some(shared),
        }
    }
}

impl From<Snapshot> for Value {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.into_state().into()
    }
}
