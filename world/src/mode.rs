//! Authoritative game mode state and its transition rules.

use generator_defence_core::GameMode;

/// Single source of truth for the session's current game mode.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ModeState {
    current: GameMode,
}

impl ModeState {
    /// Mode currently active.
    pub(crate) const fn current(&self) -> GameMode {
        self.current
    }

    /// Overwrites the current mode unconditionally, returning the previous one.
    pub(crate) fn set_mode(&mut self, mode: GameMode) -> GameMode {
        let previous = std::mem::replace(&mut self.current, mode);
        log::info!("switched game mode from {previous} to {mode}");
        previous
    }

    /// Applies the restricted manual toggle.
    ///
    /// Returns the previous mode, or `None` when the current mode is terminal
    /// and the toggle left it unchanged.
    pub(crate) fn toggle(&mut self) -> Option<GameMode> {
        if self.current.is_terminal() {
            log::debug!("ignored mode toggle while in {}", self.current);
            return None;
        }
        Some(self.set_mode(self.current.toggled()))
    }
}
