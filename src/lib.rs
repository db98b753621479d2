//! This crate turns keyboard presses into swipe actions (`like`, `dislike`, `superlike`) and
//! records each one as a hidden marker element appended to a document body.
//! It includes the fixed key table, the dispatcher, the document abstractions it writes through,
//! the collector that consumes recorded markers, and the registration slot that keeps the host
//! listener unique.

pub mod collector;
pub mod dispatcher;
pub mod document;
pub mod keymap;
pub mod registration;
pub mod types;

/// Re-exports the collector and its polling options.
pub use collector::{CollectorOptions, SwipeCollector};
/// Re-exports the dispatcher and its per-event outcome.
pub use dispatcher::{Dispatch, KeyActionDispatcher};
/// Re-exports the document traits and the in-memory document.
pub use document::{DocumentSink, MarkerStore, MemoryDocument, Node};
/// Re-exports the key table.
pub use keymap::KeyActionMap;
/// Re-exports the single-slot listener registration.
pub use registration::Registration;
/// Re-exports the core types and marker constants from the types module.
pub use types::{Action, KeyPress, Marker, SwipeError, MARKER_CLASS, VALUE_ATTRIBUTE};
