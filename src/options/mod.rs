//! Centralized interaction options with TOML preset support.
//!
//! All tweakable settings (gesture thresholds, stack treatment, choreography
//! geometry, key bindings, render pacing) are consolidated here. Options
//! serialize to/from TOML so a deck can be tuned per device without a
//! rebuild.

mod choreography;
mod gesture;
mod keybindings;
mod render;
mod stack;

use std::path::Path;

pub use choreography::ChoreographyOptions;
pub use gesture::GestureOptions;
pub use keybindings::KeybindingOptions;
pub use render::RenderLoopOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use stack::{IdleTarget, StackOptions};

use crate::error::TriageError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[gesture]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Gesture classification thresholds.
    pub gesture: GestureOptions,
    /// Rank treatment and cascade timing.
    pub stack: StackOptions,
    /// Choreography geometry and spring-back timing.
    pub choreography: ChoreographyOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
    /// Render loop pacing.
    pub render_loop: RenderLoopOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TriageError> {
        let content = std::fs::read_to_string(path).map_err(TriageError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, TriageError> {
        toml::from_str(content)
            .map_err(|e| TriageError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TriageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TriageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TriageError::Io)?;
        }
        std::fs::write(path, content).map_err(TriageError::Io)?;
        log::info!("Saved options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CommitAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[gesture]
action_threshold = 150.0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.gesture.action_threshold, 150.0);
        assert_eq!(opts.gesture.lock_threshold, 30.0);
        assert_eq!(opts.stack.promotion_delay_ms, 120);
        assert_eq!(opts.choreography.cancel_ms, 180);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err =
            Options::from_toml("[gesture\nlock_threshold = ").unwrap_err();
        assert!(matches!(err, TriageError::OptionsParse(_)));
    }

    #[test]
    fn default_gesture_thresholds() {
        let gesture = GestureOptions::default();
        assert_eq!(gesture.fast_velocity(), 1500.0);
        assert_eq!(gesture.detection_distance, 12.0);
    }

    #[test]
    fn idle_targets_by_rank() {
        let stack = StackOptions::default();
        assert_eq!(stack.idle_target(0), IdleTarget::FRONT);
        assert_eq!(stack.idle_target(1).scale, 0.96);
        assert_eq!(stack.idle_target(1).offset, -20.0);
        assert_eq!(stack.idle_target(2).opacity, 0.7);
        assert_eq!(stack.idle_target(7), stack.idle_target(2));
    }

    #[test]
    fn empty_rank_table_falls_back_to_front() {
        let stack = StackOptions {
            rank_targets: Vec::new(),
            ..StackOptions::default()
        };
        assert_eq!(stack.idle_target(3), IdleTarget::FRONT);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyA"),
            Some(CommitAction::Archive)
        );
        assert_eq!(
            opts.keybindings.lookup("Delete"),
            Some(CommitAction::Delete)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
        assert_eq!(
            opts.keybindings.keys_for(CommitAction::Journal),
            vec!["ArrowUp", "KeyJ"]
        );
    }

    #[test]
    fn keybindings_override_from_toml() {
        let toml_str = r#"
[keybindings.bindings]
KeyX = "delete"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("KeyX"), Some(CommitAction::Delete));
        assert_eq!(opts.keybindings.lookup("KeyA"), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir()
            .join(format!("triage-deck-options-{}", std::process::id()));
        let path = dir.join("tuned.toml");
        let mut opts = Options::default();
        opts.choreography.offstage_distance = 1400.0;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["tuned".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("gesture"));
        assert!(props.contains_key("stack"));
        assert!(props.contains_key("choreography"));
        assert!(props.contains_key("render_loop"));
        assert!(!props.contains_key("keybindings"));

        let gesture = &props["gesture"]["properties"];
        assert!(gesture.get("action_threshold").is_some());
        assert!(gesture.get("ramp_span").is_none());
    }
}
