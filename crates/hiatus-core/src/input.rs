//! Keyboard shortcuts and edge-triggered toggle detection.
//!
//! The host only reports which keys are held right now. [`ToggleTrigger`]
//! turns that level signal into a single "fresh press" per physical press,
//! so holding the pause key for many frames flips the state once.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::host::InputState;

/// Errors that can occur when parsing key bindings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The key name is not recognised.
    #[error("unknown key name: {name}")]
    UnknownKey {
        /// The unrecognised name.
        name: String,
    },

    /// The shortcut string contained no keys.
    #[error("keyboard shortcut is empty")]
    EmptyShortcut,
}

/// A physical key the host can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Key {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Escape,
    Pause,
    Space,
    P,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
}

impl Key {
    /// Canonical name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F5 => "F5",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
            Self::F9 => "F9",
            Self::F10 => "F10",
            Self::F11 => "F11",
            Self::F12 => "F12",
            Self::Escape => "Escape",
            Self::Pause => "Pause",
            Self::Space => "Space",
            Self::P => "P",
            Self::LeftShift => "LeftShift",
            Self::RightShift => "RightShift",
            Self::LeftCtrl => "LeftCtrl",
            Self::RightCtrl => "RightCtrl",
            Self::LeftAlt => "LeftAlt",
            Self::RightAlt => "RightAlt",
        }
    }
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "f1" => Self::F1,
            "f2" => Self::F2,
            "f3" => Self::F3,
            "f4" => Self::F4,
            "f5" => Self::F5,
            "f6" => Self::F6,
            "f7" => Self::F7,
            "f8" => Self::F8,
            "f9" => Self::F9,
            "f10" => Self::F10,
            "f11" => Self::F11,
            "f12" => Self::F12,
            "escape" | "esc" => Self::Escape,
            "pause" => Self::Pause,
            "space" => Self::Space,
            "p" => Self::P,
            "leftshift" | "shift" => Self::LeftShift,
            "rightshift" => Self::RightShift,
            "leftctrl" | "ctrl" | "leftcontrol" => Self::LeftCtrl,
            "rightctrl" | "rightcontrol" => Self::RightCtrl,
            "leftalt" | "alt" => Self::LeftAlt,
            "rightalt" => Self::RightAlt,
            _ => {
                return Err(InputError::UnknownKey {
                    name: s.trim().to_owned(),
                });
            }
        };
        Ok(key)
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A main key plus the modifiers that must be held with it.
///
/// Written in configuration as `"F9"` or `"LeftCtrl+F9"`; the last key in
/// the string is the main key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyboardShortcut {
    /// The key whose press triggers the shortcut.
    pub main_key: Key,
    /// Keys that must already be held.
    pub modifiers: Vec<Key>,
}

impl KeyboardShortcut {
    /// A shortcut with no modifiers.
    pub const fn single(main_key: Key) -> Self {
        Self {
            main_key,
            modifiers: Vec::new(),
        }
    }
}

impl Default for KeyboardShortcut {
    fn default() -> Self {
        Self::single(Key::F9)
    }
}

impl FromStr for KeyboardShortcut {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys = s
            .split('+')
            .filter(|part| !part.trim().is_empty())
            .map(Key::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        let main_key = keys.pop().ok_or(InputError::EmptyShortcut)?;
        Ok(Self {
            main_key,
            modifiers: keys,
        })
    }
}

impl TryFrom<String> for KeyboardShortcut {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyboardShortcut> for String {
    fn from(shortcut: KeyboardShortcut) -> Self {
        shortcut.to_string()
    }
}

impl core::fmt::Display for KeyboardShortcut {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{modifier}+")?;
        }
        write!(f, "{}", self.main_key)
    }
}

/// Edge detector for the pause toggle.
///
/// Polled once per frame. Reports `true` only on the frame the main key
/// goes from released to held while all modifiers are down.
#[derive(Debug, Clone)]
pub struct ToggleTrigger {
    shortcut: KeyboardShortcut,
    was_down: bool,
}

impl ToggleTrigger {
    /// Create a trigger for `shortcut`, assuming the key starts released.
    pub const fn new(shortcut: KeyboardShortcut) -> Self {
        Self {
            shortcut,
            was_down: false,
        }
    }

    /// The bound shortcut.
    pub const fn shortcut(&self) -> &KeyboardShortcut {
        &self.shortcut
    }

    /// Sample the input for this frame and report a fresh press.
    pub fn poll(&mut self, input: &dyn InputState) -> bool {
        let down = input.is_key_down(self.shortcut.main_key);
        let fresh = down && !self.was_down;
        self.was_down = down;
        fresh
            && self
                .shortcut
                .modifiers
                .iter()
                .all(|modifier| input.is_key_down(*modifier))
    }

    /// Forget the previous sample (used at session teardown).
    pub const fn reset(&mut self) {
        self.was_down = false;
    }
}
