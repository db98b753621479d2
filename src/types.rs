//! This module defines the core data structures shared by the dispatcher, the collector and the
//! platform front ends: swipe actions, key-press events, marker elements and the error type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The tag name used for marker elements.
pub const MARKER_TAG: &str = "div";
/// The CSS class every marker element carries. External observers look markers up by it.
pub const MARKER_CLASS: &str = "userSwipeAction";
/// The attribute holding the recognized action name.
pub const VALUE_ATTRIBUTE: &str = "value";
/// The inline style property that hides a marker from layout.
pub const HIDDEN_STYLE_PROPERTY: &str = "display";
/// The value of [`HIDDEN_STYLE_PROPERTY`] for hidden markers.
pub const HIDDEN_STYLE_VALUE: &str = "none";
/// How a missing action or key is rendered in diagnostics.
pub const UNDEFINED: &str = "undefined";

/// A semantic swipe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Swipe right.
    Like,
    /// Swipe left.
    Dislike,
    /// Swipe up / super like.
    Superlike,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 3] = [Action::Like, Action::Dislike, Action::Superlike];

    /// Returns the wire name of the action, as stored in a marker's `value` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Like => "like",
            Action::Dislike => "dislike",
            Action::Superlike => "superlike",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = SwipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| SwipeError::UnknownAction(s.to_string()))
    }
}

/// A "key pressed" notification as delivered by the host.
///
/// The `key` field is optional: events without one are treated exactly like unmapped keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// The logical key identifier, e.g. `"Enter"` or `"ArrowLeft"`.
    #[serde(default)]
    pub key: Option<String>,
}

impl KeyPress {
    /// Creates a key press for the given key identifier.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    /// Creates a key press that carries no key identifier.
    pub fn without_key() -> Self {
        Self { key: None }
    }

    /// Returns the key identifier as rendered in diagnostics.
    pub fn display_key(&self) -> &str {
        self.key.as_deref().unwrap_or(UNDEFINED)
    }
}

/// A hidden element signalling that an action was recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// The element tag name.
    pub tag: String,
    /// The element class attribute.
    pub class: String,
    /// The recognized action, stored in the `value` attribute.
    pub value: Action,
    /// Inline style declarations.
    pub style: BTreeMap<String, String>,
}

impl Marker {
    /// Builds the marker recorded for `action`.
    pub fn for_action(action: Action) -> Self {
        let mut style = BTreeMap::new();
        style.insert(
            HIDDEN_STYLE_PROPERTY.to_string(),
            HIDDEN_STYLE_VALUE.to_string(),
        );

        Self {
            tag: MARKER_TAG.to_string(),
            class: MARKER_CLASS.to_string(),
            value: action,
            style,
        }
    }

    /// Checks whether the marker is excluded from visual rendering.
    pub fn is_hidden(&self) -> bool {
        is_hidden_style(&self.style)
    }
}

/// Checks whether inline style declarations hide an element from layout.
pub fn is_hidden_style(style: &BTreeMap<String, String>) -> bool {
    style
        .get(HIDDEN_STYLE_PROPERTY)
        .is_some_and(|value| value == HIDDEN_STYLE_VALUE)
}

/// Represents the errors that can occur while recording or collecting swipe actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwipeError {
    /// A string that is not one of the known action names.
    #[error("Unknown swipe action: {0:?}")]
    UnknownAction(String),
    /// The host document is unavailable or rejected an operation.
    #[error("Document error: {0}")]
    Document(String),
    /// A key script could not be read.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&Action::Superlike).unwrap();
        assert_eq!(json, "\"superlike\"");

        let action: Action = serde_json::from_str("\"dislike\"").unwrap();
        assert_eq!(action, Action::Dislike);
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("like".parse::<Action>(), Ok(Action::Like));
        assert_eq!("superlike".parse::<Action>(), Ok(Action::Superlike));
        assert_eq!(
            "Like".parse::<Action>(),
            Err(SwipeError::UnknownAction("Like".to_string()))
        );
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_marker_for_action() {
        let marker = Marker::for_action(Action::Dislike);

        assert_eq!(marker.tag, "div");
        assert_eq!(marker.class, "userSwipeAction");
        assert_eq!(marker.value, Action::Dislike);
        assert!(marker.is_hidden());
    }

    #[test]
    fn test_hidden_style() {
        let mut style = BTreeMap::new();
        assert!(!is_hidden_style(&style));

        style.insert("display".to_string(), "block".to_string());
        assert!(!is_hidden_style(&style));

        style.insert("display".to_string(), "none".to_string());
        assert!(is_hidden_style(&style));
    }

    #[test]
    fn test_key_press_without_key_deserializes() {
        let event: KeyPress = serde_json::from_str("{}").unwrap();
        assert_eq!(event, KeyPress::without_key());
        assert_eq!(event.display_key(), "undefined");

        let event: KeyPress = serde_json::from_str(r#"{"key":"Enter"}"#).unwrap();
        assert_eq!(event.display_key(), "Enter");
    }

    #[test]
    fn test_error_display() {
        let error = SwipeError::UnknownAction("pass".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unknown swipe action"));
        assert!(error_msg.contains("pass"));
    }
}
