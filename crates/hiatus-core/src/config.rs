//! Configuration loading and typed config structures for Hiatus.
//!
//! The configuration lives in `hiatus-config.yaml` next to the engine
//! binary. Every section and field has a default, so a missing file or a
//! partial file both produce a usable configuration.

use std::path::Path;

use chrono::TimeDelta;
use serde::Deserialize;

use crate::input::{InputError, KeyboardShortcut};

/// Environment variable that overrides `keybinds.toggle_pause`.
pub const TOGGLE_KEY_ENV: &str = "HIATUS_TOGGLE_KEY";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A key binding could not be parsed.
    #[error("invalid key binding: {source}")]
    Keybind {
        /// The underlying input error.
        #[from]
        source: InputError,
    },

    /// A value is out of its allowed range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PauseConfig {
    /// Input bindings.
    #[serde(default)]
    pub keybinds: KeybindConfig,

    /// Indicator behavior.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Field-of-view restoration on resume.
    #[serde(default)]
    pub camera: CameraConfig,

    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Demo engine loop parameters.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl PauseConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `HIATUS_TOGGLE_KEY` overrides `keybinds.toggle_pause`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, and
    /// [`ConfigError::Invalid`] or [`ConfigError::Keybind`] if a value is
    /// rejected.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides and validation.
    ///
    /// # Errors
    ///
    /// See [`from_file`](Self::from_file).
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let toggle_override = std::env::var(TOGGLE_KEY_ENV).ok();
        Self::parse_with_override(yaml, toggle_override.as_deref())
    }

    /// Parse with an explicit toggle key override in place of the
    /// environment.
    fn parse_with_override(yaml: &str, toggle_key: Option<&str>) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.keybinds.apply_override(toggle_key)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on the first rejected value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        for (name, value) in [
            ("camera.optic_fov", camera.optic_fov),
            ("camera.transition_seconds", camera.transition_seconds),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    reason: format!("{name} must be a positive number"),
                });
            }
        }
        if !camera.iron_sight_fov_offset.is_finite() || camera.iron_sight_fov_offset < 0.0 {
            return Err(ConfigError::Invalid {
                reason: "camera.iron_sight_fov_offset must be zero or positive".to_owned(),
            });
        }
        if self.engine.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "engine.frame_interval_ms must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Key bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeybindConfig {
    /// Shortcut that toggles pause.
    #[serde(default)]
    pub toggle_pause: KeyboardShortcut,
}

impl KeybindConfig {
    /// Replace the toggle binding with `toggle_key`, if given.
    fn apply_override(&mut self, toggle_key: Option<&str>) -> Result<(), InputError> {
        if let Some(value) = toggle_key {
            self.toggle_pause = value.parse()?;
        }
        Ok(())
    }
}

/// Pause indicator behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Replace the countdown text with "PAUSED" while paused.
    #[serde(default = "default_true")]
    pub show_paused_text: bool,

    /// Milliseconds the indicator stays up after resume.
    #[serde(default = "default_hide_indicator_delay_ms")]
    pub hide_indicator_delay_ms: u64,
}

impl GeneralConfig {
    /// The hide delay as a [`TimeDelta`], saturating on absurd values.
    pub fn hide_indicator_delay(&self) -> TimeDelta {
        i64::try_from(self.hide_indicator_delay_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_paused_text: true,
            hide_indicator_delay_ms: default_hide_indicator_delay_ms(),
        }
    }
}

/// Field-of-view restoration settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraConfig {
    /// Whether to restore the FOV on resume at all.
    #[serde(default = "default_true")]
    pub restore_fov: bool,

    /// Skip restoration while free mouse look is engaged.
    #[serde(default = "default_true")]
    pub respect_mouse_look: bool,

    /// FOV used when aiming through a magnified optic.
    #[serde(default = "default_optic_fov")]
    pub optic_fov: f32,

    /// Degrees subtracted from the base FOV when aiming without an optic.
    #[serde(default = "default_iron_sight_fov_offset")]
    pub iron_sight_fov_offset: f32,

    /// Seconds the FOV transition takes.
    #[serde(default = "default_transition_seconds")]
    pub transition_seconds: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            restore_fov: true,
            respect_mouse_look: true,
            optic_fov: default_optic_fov(),
            iron_sight_fov_offset: default_iron_sight_fov_offset(),
            transition_seconds: default_transition_seconds(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Parameters of the demo frame loop run by the engine binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Total frames to run.
    #[serde(default = "default_frames")]
    pub frames: u64,

    /// Real milliseconds per frame.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Frames on which the scripted toggle key goes down.
    #[serde(default = "default_toggle_frames")]
    pub toggle_frames: Vec<u64>,

    /// How many frames each scripted press is held.
    #[serde(default = "default_hold_frames")]
    pub hold_frames: u64,

    /// Non-local actors spawned in the demo world.
    #[serde(default = "default_bots")]
    pub bots: u32,

    /// Audio channels created in the demo world.
    #[serde(default = "default_channels")]
    pub channels: u32,

    /// Session length in minutes.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,

    /// Random seed for the demo world.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_interval_ms: default_frame_interval_ms(),
            toggle_frames: default_toggle_frames(),
            hold_frames: default_hold_frames(),
            bots: default_bots(),
            channels: default_channels(),
            session_minutes: default_session_minutes(),
            seed: default_seed(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_hide_indicator_delay_ms() -> u64 {
    4000
}

const fn default_optic_fov() -> f32 {
    35.0
}

const fn default_iron_sight_fov_offset() -> f32 {
    15.0
}

const fn default_transition_seconds() -> f32 {
    1.0
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_frames() -> u64 {
    600
}

const fn default_frame_interval_ms() -> u64 {
    16
}

fn default_toggle_frames() -> Vec<u64> {
    vec![60, 300]
}

const fn default_hold_frames() -> u64 {
    5
}

const fn default_bots() -> u32 {
    6
}

const fn default_channels() -> u32 {
    4
}

const fn default_session_minutes() -> u32 {
    40
}

const fn default_seed() -> u64 {
    7
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: PauseConfig = serde_yml::from_str("{}").unwrap();
        assert_eq!(config, PauseConfig::default());
        assert_eq!(config.keybinds.toggle_pause.main_key, Key::F9);
        assert_eq!(config.general.hide_indicator_delay(), TimeDelta::seconds(4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let yaml = r#"
keybinds:
  toggle_pause: "LeftCtrl+P"
general:
  show_paused_text: false
camera:
  optic_fov: 30.0
engine:
  toggle_frames: [5]
"#;
        let config: PauseConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.keybinds.toggle_pause.main_key, Key::P);
        assert_eq!(config.keybinds.toggle_pause.modifiers, vec![Key::LeftCtrl]);
        assert!(!config.general.show_paused_text);
        assert_eq!(config.general.hide_indicator_delay_ms, 4000);
        assert!((config.camera.optic_fov - 30.0).abs() < f32::EPSILON);
        assert!(config.camera.restore_fov);
        assert_eq!(config.engine.toggle_frames, vec![5]);
        assert_eq!(config.engine.frames, 600);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result: Result<PauseConfig, _> =
            serde_yml::from_str("keybinds:\n  toggle_pause: \"Hyper+F9\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_rejects_bad_ranges() {
        let mut config = PauseConfig::default();
        config.camera.optic_fov = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let mut config = PauseConfig::default();
        config.engine.frame_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_hide_delay_is_allowed() {
        let mut config = PauseConfig::default();
        config.general.hide_indicator_delay_ms = 0;
        assert!(config.validate().is_ok());
        assert_eq!(config.general.hide_indicator_delay(), TimeDelta::zero());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let yaml = include_str!("../../../hiatus-config.yaml");
        let config: PauseConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config, PauseConfig::default());
    }

    #[test]
    fn toggle_override_replaces_binding() {
        let config = PauseConfig::parse_with_override("{}", Some("LeftCtrl+P")).unwrap();
        assert_eq!(config.keybinds.toggle_pause.main_key, Key::P);
        assert_eq!(config.keybinds.toggle_pause.modifiers, vec![Key::LeftCtrl]);

        let untouched = PauseConfig::parse_with_override("{}", None).unwrap();
        assert_eq!(untouched.keybinds.toggle_pause.main_key, Key::F9);
    }

    #[test]
    fn bad_toggle_override_is_rejected() {
        let result = PauseConfig::parse_with_override("{}", Some("Hyper+F9"));
        assert!(matches!(
            result,
            Err(ConfigError::Keybind {
                source: InputError::UnknownKey { .. }
            })
        ));
    }
}
