#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Generator Defence adapters.
//!
//! Everything here is derived from a [`SessionStatus`]; adapters never read
//! the world directly.

use std::{io::Write, time::Duration};

use anyhow::{Context, Result as AnyResult};
use generator_defence_core::{GameMode, RunOutcome, SessionStatus, URGENT_COUNTDOWN};

/// Panel shown for the active game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModePanel {
    /// Turret shop and build instructions.
    Build,
    /// Combat HUD with the enemy counter.
    Combat,
    /// Loss prompt.
    GameOver,
    /// Victory prompt.
    LevelComplete,
}

impl ModePanel {
    /// Panel for the provided mode; `Idle` shows no mode panel.
    #[must_use]
    pub const fn for_mode(mode: GameMode) -> Option<Self> {
        match mode {
            GameMode::Idle => None,
            GameMode::Build => Some(Self::Build),
            GameMode::Combat => Some(Self::Combat),
            GameMode::GameOver => Some(Self::GameOver),
            GameMode::LevelComplete => Some(Self::LevelComplete),
        }
    }
}

/// Cursor sprite the adapter should display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    /// The operating system cursor; dynamic cursors are disabled.
    System,
    /// Neutral pointer.
    Default,
    /// Placement pointer shown while building.
    Build,
    /// Aiming reticle shown during combat.
    Crosshair,
}

impl CursorStyle {
    /// Cursor for the provided mode.
    #[must_use]
    pub const fn for_mode(mode: GameMode, dynamic_cursors: bool) -> Self {
        if !dynamic_cursors {
            return Self::System;
        }
        match mode {
            GameMode::Build => Self::Build,
            GameMode::Combat => Self::Crosshair,
            GameMode::Idle | GameMode::GameOver | GameMode::LevelComplete => Self::Default,
        }
    }
}

/// Countdown text together with its urgency flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownText {
    /// Text to display; empty when no time pressure applies.
    pub text: String,
    /// Whether the countdown should be highlighted.
    pub urgent: bool,
}

/// Formats the display countdown.
///
/// One decimal above [`URGENT_COUNTDOWN`], two at or below it. A zero
/// countdown renders as empty text.
#[must_use]
pub fn format_countdown(remaining: Duration) -> CountdownText {
    let urgent = remaining <= URGENT_COUNTDOWN;
    let seconds = remaining.as_secs_f64();
    let text = if remaining.is_zero() {
        String::new()
    } else if urgent {
        format!("{seconds:.2}")
    } else {
        format!("{seconds:.1}")
    };
    CountdownText { text, urgent }
}

/// Options chosen by the player or the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudOptions {
    /// Whether mode-specific cursors replace the system cursor.
    pub dynamic_cursors: bool,
}

impl Default for HudOptions {
    fn default() -> Self {
        Self {
            dynamic_cursors: true,
        }
    }
}

/// Everything a HUD displays for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Mode panel, `None` while idle.
    pub panel: Option<ModePanel>,
    /// Whether the player's weapons are shown.
    pub weapons_visible: bool,
    /// Whether build nodes are shown.
    pub build_nodes_visible: bool,
    /// Cursor sprite.
    pub cursor: CursorStyle,
    /// Cycle progress formatted as `current/total`.
    pub cycle_text: String,
    /// Live-enemy counter.
    pub enemies_text: String,
    /// Display countdown.
    pub countdown: CountdownText,
    /// Whether the player may still move.
    pub movement_enabled: bool,
    /// Terminal outcome of the run.
    pub outcome: RunOutcome,
}

impl Hud {
    /// Derives the HUD from a session status.
    #[must_use]
    pub fn from_status(status: &SessionStatus, options: HudOptions) -> Self {
        Self {
            panel: ModePanel::for_mode(status.mode),
            weapons_visible: status.mode == GameMode::Combat,
            build_nodes_visible: status.mode == GameMode::Build,
            cursor: CursorStyle::for_mode(status.mode, options.dynamic_cursors),
            cycle_text: format!("{}/{}", status.cycle, status.total_cycles),
            enemies_text: status.live_enemies.to_string(),
            countdown: format_countdown(status.countdown),
            movement_enabled: status.input_enabled && !status.has_won(),
            outcome: status.outcome,
        }
    }
}

/// Presentation backend capable of displaying the HUD.
pub trait HudBackend {
    /// Displays the provided HUD.
    fn present(&mut self, hud: &Hud) -> AnyResult<()>;
}

/// Backend that writes one line whenever the mode panel changes.
#[derive(Debug)]
pub struct LineHud<W> {
    writer: W,
    last_panel: Option<Option<ModePanel>>,
}

impl<W: Write> LineHud<W> {
    /// Creates a backend writing to the provided sink.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_panel: None,
        }
    }

    /// Releases the underlying sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> HudBackend for LineHud<W> {
    fn present(&mut self, hud: &Hud) -> AnyResult<()> {
        if self.last_panel == Some(hud.panel) {
            return Ok(());
        }
        self.last_panel = Some(hud.panel);

        let panel = match hud.panel {
            Some(panel) => format!("{panel:?}"),
            None => "Idle".to_owned(),
        };
        writeln!(
            self.writer,
            "[{panel}] cycle {} | enemies {} | timer {}",
            hud.cycle_text,
            hud.enemies_text,
            if hud.countdown.text.is_empty() {
                "-"
            } else {
                hud.countdown.text.as_str()
            }
        )
        .context("failed to write HUD line")?;
        Ok(())
    }
}
