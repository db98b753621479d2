//! Document abstractions used by the dispatcher and the collector, plus an in-memory document.

use crate::types::{is_hidden_style, Action, Marker, SwipeError, MARKER_CLASS, VALUE_ATTRIBUTE};
use std::collections::BTreeMap;

/// The single capability the dispatcher needs from a document: appending a marker as the last
/// child of the body.
pub trait DocumentSink {
    /// Appends `marker` as the last child of the body.
    fn append_marker(&mut self, marker: &Marker) -> Result<(), SwipeError>;
}

impl<T: DocumentSink + ?Sized> DocumentSink for &mut T {
    fn append_marker(&mut self, marker: &Marker) -> Result<(), SwipeError> {
        (**self).append_marker(marker)
    }
}

/// Read and remove access to marker elements, used by whoever consumes recorded actions.
pub trait MarkerStore {
    /// Returns the raw `value` attribute of every marker, in document order.
    ///
    /// A marker without a `value` attribute yields an empty string.
    fn marker_values(&self) -> Result<Vec<String>, SwipeError>;

    /// Removes every marker and returns how many were removed.
    fn remove_markers(&mut self) -> Result<usize, SwipeError>;
}

/// A body child of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub class: String,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// True if the marker class is one of the node's classes, matching
    /// `getElementsByClassName` semantics.
    pub fn is_marker(&self) -> bool {
        self.class.split_whitespace().any(|class| class == MARKER_CLASS)
    }

    pub fn is_hidden(&self) -> bool {
        is_hidden_style(&self.style)
    }
}

impl From<&Marker> for Node {
    fn from(marker: &Marker) -> Self {
        Self {
            tag: marker.tag.clone(),
            class: marker.class.clone(),
            attributes: BTreeMap::from([(
                VALUE_ATTRIBUTE.to_string(),
                marker.value.as_str().to_string(),
            )]),
            style: marker.style.clone(),
        }
    }
}

/// An ordered list of body children held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    body: Vec<Node>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an arbitrary node, e.g. page content unrelated to swipe markers.
    pub fn append_child(&mut self, node: Node) {
        self.body.push(node);
    }

    pub fn children(&self) -> &[Node] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the marker nodes, in document order.
    pub fn markers(&self) -> impl Iterator<Item = &Node> {
        self.body.iter().filter(|node| node.is_marker())
    }

    /// Returns the actions recorded by markers, skipping markers whose value is not an action.
    pub fn recorded_actions(&self) -> Vec<Action> {
        self.markers()
            .filter_map(|node| node.attribute(VALUE_ATTRIBUTE)?.parse::<Action>().ok())
            .collect()
    }
}

impl DocumentSink for MemoryDocument {
    fn append_marker(&mut self, marker: &Marker) -> Result<(), SwipeError> {
        self.body.push(Node::from(marker));
        Ok(())
    }
}

impl MarkerStore for MemoryDocument {
    fn marker_values(&self) -> Result<Vec<String>, SwipeError> {
        Ok(self
            .markers()
            .map(|node| node.attribute(VALUE_ATTRIBUTE).unwrap_or_default().to_string())
            .collect())
    }

    fn remove_markers(&mut self) -> Result<usize, SwipeError> {
        let before = self.body.len();
        self.body.retain(|node| !node.is_marker());
        Ok(before - self.body.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_marker_is_last_child() {
        let mut document = MemoryDocument::new();
        document.append_child(Node::new("main").with_class("content"));

        document
            .append_marker(&Marker::for_action(Action::Like))
            .unwrap();

        assert_eq!(document.len(), 2);
        let last = document.children().last().unwrap();
        assert_eq!(last.tag, "div");
        assert_eq!(last.class, "userSwipeAction");
        assert_eq!(last.attribute("value"), Some("like"));
        assert!(last.is_hidden());
    }

    #[test]
    fn test_remove_markers_keeps_other_nodes() {
        let mut document = MemoryDocument::new();
        document.append_child(Node::new("main"));
        document
            .append_marker(&Marker::for_action(Action::Like))
            .unwrap();
        document.append_child(Node::new("span").with_class("badge"));
        document
            .append_marker(&Marker::for_action(Action::Superlike))
            .unwrap();

        assert_eq!(document.remove_markers().unwrap(), 2);
        assert_eq!(document.len(), 2);
        assert_eq!(document.markers().count(), 0);
        assert_eq!(document.children()[1].class, "badge");
    }

    #[test]
    fn test_marker_values_include_foreign_markers() {
        let mut document = MemoryDocument::new();
        document.append_child(
            Node::new("div")
                .with_class("userSwipeAction")
                .with_attribute("value", "pass"),
        );
        document.append_child(Node::new("div").with_class("userSwipeActionLegacy"));
        document.append_child(Node::new("div").with_class("pending userSwipeAction"));

        assert_eq!(
            document.marker_values().unwrap(),
            vec!["pass".to_string(), String::new()]
        );
        assert!(document.recorded_actions().is_empty());
    }
}
