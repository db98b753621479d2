//! This module provides the fixed key-identifier to action table.
//!
//! Older Edge (16 and earlier) and Firefox (36 and earlier) report `"Left"` and `"Right"` instead
//! of `"ArrowLeft"` and `"ArrowRight"`, so both spellings are mapped. The vertical legacy names
//! (`"Up"`, `"Down"`) are not.

use crate::types::Action;
use std::collections::HashMap;

lazy_static::lazy_static! {
    static ref KEY_ACTIONS: HashMap<&'static str, Action> = KeyActionMap::ENTRIES.into_iter().collect();
}

/// `KeyActionMap` resolves logical key identifiers to swipe actions.
///
/// The table is built once per process and never mutated. Lookups are exact and case-sensitive.
pub struct KeyActionMap;

impl KeyActionMap {
    /// The table entries: (key identifier, action).
    pub const ENTRIES: [(&'static str, Action); 5] = [
        ("Enter", Action::Superlike),
        ("ArrowLeft", Action::Dislike),
        ("ArrowRight", Action::Like),
        ("Left", Action::Dislike),
        ("Right", Action::Like),
    ];

    /// Key identifiers kept only for browsers predating the `Arrow*` names.
    pub const LEGACY_ALIASES: [&'static str; 2] = ["Left", "Right"];

    /// Looks up the action mapped to `key`, if any.
    pub fn lookup(key: &str) -> Option<Action> {
        KEY_ACTIONS.get(key).copied()
    }

    /// Returns true if `key` is one of the legacy aliases.
    pub fn is_legacy_alias(key: &str) -> bool {
        Self::LEGACY_ALIASES.contains(&key)
    }

    /// Returns all key identifiers mapped to `action`.
    pub fn keys_for(action: Action) -> Vec<&'static str> {
        Self::ENTRIES
            .iter()
            .filter(|(_, mapped)| *mapped == action)
            .map(|(key, _)| *key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_mapped_keys() {
        assert_eq!(KeyActionMap::lookup("Enter"), Some(Action::Superlike));
        assert_eq!(KeyActionMap::lookup("ArrowLeft"), Some(Action::Dislike));
        assert_eq!(KeyActionMap::lookup("ArrowRight"), Some(Action::Like));
        assert_eq!(KeyActionMap::lookup("Left"), Some(Action::Dislike));
        assert_eq!(KeyActionMap::lookup("Right"), Some(Action::Like));
    }

    #[test]
    fn test_lookup_unmapped_keys() {
        for key in ["Escape", "a", "", "ArrowUp", "ArrowDown", "Up", "Down", "enter"] {
            assert_eq!(KeyActionMap::lookup(key), None, "{key:?} should be unmapped");
        }
    }

    #[test]
    fn test_legacy_aliases() {
        assert!(KeyActionMap::is_legacy_alias("Left"));
        assert!(KeyActionMap::is_legacy_alias("Right"));
        assert!(!KeyActionMap::is_legacy_alias("ArrowLeft"));
        assert!(!KeyActionMap::is_legacy_alias("Up"));
    }

    #[test]
    fn test_keys_for_action() {
        assert_eq!(KeyActionMap::keys_for(Action::Like), vec!["ArrowRight", "Right"]);
        assert_eq!(KeyActionMap::keys_for(Action::Dislike), vec!["ArrowLeft", "Left"]);
        assert_eq!(KeyActionMap::keys_for(Action::Superlike), vec!["Enter"]);
    }
}
