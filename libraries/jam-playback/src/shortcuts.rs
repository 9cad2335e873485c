//! Keyboard shortcuts for the global player
//!
//! The embedding forwards key presses to the engine; the engine only acts
//! on them while a [`ShortcutRegistration`] is alive. The registration
//! carries a predicate supplied by the presentation layer telling whether a
//! text input currently has focus, in which case keys belong to that input.

use crate::engine::PlaybackEngine;
use crate::sync::lock;
use std::fmt;
use std::sync::{Arc, Mutex, Weak};

/// Keys the player understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Space bar: toggle play/pause of the current track
    Space,

    /// Any other printable key
    Char(char),

    /// Keys without a player binding
    Other,
}

impl Key {
    /// Map a DOM-style key code ("Space", "KeyA") to a key
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            _ => code
                .strip_prefix("Key")
                .and_then(|rest| {
                    let mut chars = rest.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                        _ => None,
                    }
                })
                .unwrap_or(Key::Other),
        }
    }
}

/// Returns true while a text input has focus
pub type FocusProbe = Arc<dyn Fn() -> bool + Send + Sync>;

pub(crate) struct ShortcutBinding {
    pub(crate) id: u64,
    text_input_focused: FocusProbe,
}

impl ShortcutBinding {
    pub(crate) fn new(id: u64, text_input_focused: FocusProbe) -> Self {
        Self {
            id,
            text_input_focused,
        }
    }

    pub(crate) fn accepts_keys(&self) -> bool {
        !(self.text_input_focused)()
    }

    pub(crate) fn focus_probe(&self) -> FocusProbe {
        Arc::clone(&self.text_input_focused)
    }
}

impl fmt::Debug for ShortcutBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutBinding")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Keeps the player's keyboard shortcuts active.
///
/// Dropping it unregisters the shortcuts. Registering again replaces the
/// previous binding; dropping a replaced registration has no effect.
#[must_use = "shortcuts are unregistered when the registration is dropped"]
pub struct ShortcutRegistration {
    engine: Weak<Mutex<PlaybackEngine>>,
    id: u64,
}

impl ShortcutRegistration {
    pub(crate) fn new(engine: &Arc<Mutex<PlaybackEngine>>, id: u64) -> Self {
        Self {
            engine: Arc::downgrade(engine),
            id,
        }
    }
}

impl Drop for ShortcutRegistration {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.upgrade() {
            lock(&engine).unregister_shortcuts(self.id);
        }
    }
}

impl fmt::Debug for ShortcutRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutRegistration")
            .field("id", &self.id)
            .finish()
    }
}
