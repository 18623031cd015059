use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::card::CommitAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping key codes to triage actions.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyA"`, `"Delete"`, `"ArrowUp"`, etc. Several keys may map to the same
/// action.
pub struct KeybindingOptions {
    /// Maps key string → action (e.g. `"KeyA"` → `Archive`).
    pub bindings: HashMap<String, CommitAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyA".into(), CommitAction::Archive),
            ("ArrowDown".into(), CommitAction::Archive),
            ("KeyJ".into(), CommitAction::Journal),
            ("ArrowUp".into(), CommitAction::Journal),
            ("Delete".into(), CommitAction::Delete),
            ("Backspace".into(), CommitAction::Delete),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<CommitAction> {
        self.bindings.get(key).copied()
    }

    /// Keys bound to `action`, sorted for stable display.
    #[must_use]
    pub fn keys_for(&self, action: CommitAction) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}
