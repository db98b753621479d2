//! This module provides `SwipeCollector`, the consumer side of the marker protocol: it picks up
//! the action recorded by the dispatcher and clears the markers so the next swipe can be seen.

use crate::document::MarkerStore;
use crate::types::{Action, SwipeError};
use log::{debug, info};

/// Default time to wait for a swipe before giving up, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 300_000;
/// Default delay between two polls, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

/// Timing options for polling collectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorOptions {
    pub timeout_ms: u32,
    pub poll_interval_ms: u32,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl CollectorOptions {
    /// Maximum number of polls that fit in the timeout. Always at least one.
    pub fn max_polls(&self) -> u32 {
        match self.poll_interval_ms {
            0 => 1,
            interval => (self.timeout_ms / interval).max(1),
        }
    }
}

pub struct SwipeCollector;

impl SwipeCollector {
    /// Consumes the pending swipe, if any.
    ///
    /// The first marker in document order decides the action. All markers are removed afterwards,
    /// including the ones that were not read.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` if no marker is present; the store is left untouched.
    /// * `Ok(Some(action))` once a marker was read and every marker removed.
    /// * `Err(SwipeError::UnknownAction)` if the first marker does not hold an action name.
    ///   Markers are still removed, so the next swipe can be collected.
    pub fn collect<M: MarkerStore + ?Sized>(store: &mut M) -> Result<Option<Action>, SwipeError> {
        let Some(first) = store.marker_values()?.into_iter().next() else {
            return Ok(None);
        };
        debug!("Swipe Event element was located, got event: {}", first);

        let removed = store.remove_markers()?;
        debug!("Removed {} swipe event element(s)", removed);

        let action: Action = first.parse()?;
        info!("Swipe catched -- {}", action);

        Ok(Some(action))
    }
}
