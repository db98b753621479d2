//! This module provides `KeyActionDispatcher`, which turns key-press notifications into recorded
//! swipe actions.

use crate::document::DocumentSink;
use crate::keymap::KeyActionMap;
use crate::types::{Action, KeyPress, Marker, SwipeError, UNDEFINED};
use log::{debug, info};

/// The outcome of handling a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The key was mapped and a marker was appended.
    Triggered(Action),
    /// The key was not mapped (or missing); nothing was appended.
    Ignored,
}

impl Dispatch {
    pub fn action(&self) -> Option<Action> {
        match self {
            Dispatch::Triggered(action) => Some(*action),
            Dispatch::Ignored => None,
        }
    }
}

/// Maps key presses to actions and appends one hidden marker per recognized press.
///
/// There is no debouncing: every notification is handled independently, so a held key that
/// repeats produces one marker per repeat.
pub struct KeyActionDispatcher<S: DocumentSink> {
    sink: S,
}

impl<S: DocumentSink> KeyActionDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Handles a "key pressed" notification.
    ///
    /// # Returns
    ///
    /// * `Ok(Dispatch::Triggered(action))` if the key is mapped and the marker was appended.
    /// * `Ok(Dispatch::Ignored)` if the key is unmapped or absent.
    /// * `Err(SwipeError::Document)` if the document refused the append.
    pub fn handle_key_down(&mut self, event: &KeyPress) -> Result<Dispatch, SwipeError> {
        let key = event.display_key();
        let Some(action) = event.key.as_deref().and_then(KeyActionMap::lookup) else {
            debug!("{} was pressed, mapped action: {}", key, UNDEFINED);
            return Ok(Dispatch::Ignored);
        };

        info!("{} was pressed, mapped action: {}", key, action);
        info!("Triggering {} event", action);

        self.sink.append_marker(&Marker::for_action(action))?;

        Ok(Dispatch::Triggered(action))
    }

    /// Convenience wrapper around [`handle_key_down`](Self::handle_key_down) for a bare key
    /// identifier.
    pub fn handle_key(&mut self, key: &str) -> Result<Dispatch, SwipeError> {
        self.handle_key_down(&KeyPress::new(key))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
