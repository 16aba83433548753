//! Scripted keyboard input for unattended runs.
//!
//! The engine has no real keyboard, so the toggle shortcut is pressed on a
//! fixed schedule: every key of the shortcut goes down on each configured
//! frame and is held for a number of frames, exercising the controller's
//! edge detection exactly as a human holding the key would.

use std::collections::BTreeSet;

use hiatus_core::config::EngineConfig;
use hiatus_core::input::{Key, KeyboardShortcut};

/// When the scripted shortcut is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputScript {
    shortcut: KeyboardShortcut,
    presses: Vec<u64>,
    hold_frames: u64,
}

impl InputScript {
    /// Build the script from engine settings.
    pub fn new(shortcut: KeyboardShortcut, engine: &EngineConfig) -> Self {
        let mut presses = engine.toggle_frames.clone();
        presses.sort_unstable();
        presses.dedup();
        Self {
            shortcut,
            presses,
            hold_frames: engine.hold_frames.max(1),
        }
    }

    /// Whether the shortcut is held on `frame`.
    pub fn is_held(&self, frame: u64) -> bool {
        self.presses
            .iter()
            .any(|&start| frame >= start && frame.saturating_sub(start) < self.hold_frames)
    }

    /// Write this frame's key state into the host's held-key set.
    pub fn apply(&self, frame: u64, keys: &mut BTreeSet<Key>) {
        let shortcut_keys = self
            .shortcut
            .modifiers
            .iter()
            .copied()
            .chain(std::iter::once(self.shortcut.main_key));
        if self.is_held(frame) {
            keys.extend(shortcut_keys);
        } else {
            for key in shortcut_keys {
                keys.remove(&key);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn engine(toggle_frames: Vec<u64>, hold_frames: u64) -> EngineConfig {
        EngineConfig {
            toggle_frames,
            hold_frames,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn presses_are_held_for_hold_frames() {
        let script = InputScript::new(KeyboardShortcut::single(Key::F9), &engine(vec![10], 3));
        assert!(!script.is_held(9));
        assert!(script.is_held(10));
        assert!(script.is_held(12));
        assert!(!script.is_held(13));
    }

    #[test]
    fn zero_hold_still_presses_once() {
        let script = InputScript::new(KeyboardShortcut::single(Key::F9), &engine(vec![4], 0));
        assert!(script.is_held(4));
        assert!(!script.is_held(5));
    }

    #[test]
    fn apply_sets_and_clears_every_shortcut_key() {
        let shortcut: KeyboardShortcut = "LeftCtrl+F9".parse().unwrap();
        let script = InputScript::new(shortcut, &engine(vec![2], 1));
        let mut keys = BTreeSet::new();

        script.apply(2, &mut keys);
        assert!(keys.contains(&Key::LeftCtrl));
        assert!(keys.contains(&Key::F9));

        script.apply(3, &mut keys);
        assert!(keys.is_empty());
    }
}
