//! Shared holders for trained artifacts.
//!
//! A trained artifact is immutable once built. Components keep the current
//! one in an [`ArtifactSlot`]; training publishes a fresh artifact with a
//! single swap, and readers keep working on the `Arc` they cloned even while
//! a retrain replaces it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Result of a read against a component that may not be trained yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome<T> {
    /// The component had an artifact and produced a value.
    Ready(T),
    /// No artifact is loaded.
    Untrained,
}

impl<T> Outcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn is_untrained(&self) -> bool {
        matches!(self, Outcome::Untrained)
    }

    /// Convert to an `Option`, dropping the untrained marker.
    pub fn ready(self) -> Option<T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::Untrained => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ready(value) => Outcome::Ready(f(value)),
            Outcome::Untrained => Outcome::Untrained,
        }
    }
}

impl<T: Default> Outcome<T> {
    /// The value, or its default when untrained.
    pub fn into_inner_or_default(self) -> T {
        self.ready().unwrap_or_default()
    }
}

/// Atomically replaceable reference to the current artifact.
#[derive(Debug)]
pub struct ArtifactSlot<T> {
    current: RwLock<Option<Arc<T>>>,
}

impl<T> Default for ArtifactSlot<T> {
    fn default() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }
}

impl<T> ArtifactSlot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current artifact, if any.
    pub fn current(&self) -> Option<Arc<T>> {
        self.current.read().clone()
    }

    /// Replace the current artifact, returning the published reference.
    pub fn publish(&self, artifact: T) -> Arc<T> {
        let artifact = Arc::new(artifact);
        *self.current.write() = Some(Arc::clone(&artifact));
        artifact
    }

    /// Drop the current artifact.
    pub fn clear(&self) {
        *self.current.write() = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }
}
