//! Pointer input to game commands
//!
//! Press and release drive split/merge. While the game-over screen is up, a
//! tap inside the Replay button restarts, once.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;

/// Raw pointer input from the host (mouse or touch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// mousedown / touchstart
    PressStart,
    /// mouseup / touchend
    PressEnd,
    /// click / touch at a viewport position
    Tap { pos: Vec2 },
}

/// What the session should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Split,
    Merge,
    Restart,
}

/// Replay button rectangle, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayButton {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl ReplayButton {
    /// Button placed just below the viewport center
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(
                width / 2.0 + REPLAY_BUTTON_DX,
                height / 2.0 + REPLAY_BUTTON_DY,
            ),
            width: REPLAY_BUTTON_WIDTH,
            height: REPLAY_BUTTON_HEIGHT,
        }
    }

    /// Edges count as inside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.pos.x
            && p.x <= self.pos.x + self.width
            && p.y >= self.pos.y
            && p.y <= self.pos.y + self.height
    }
}

/// Maps input events to commands
///
/// The replay control is one-shot: `arm_replay` enables it when the game ends
/// and the first accepted tap disarms it again.
#[derive(Debug, Clone)]
pub struct InputMapper {
    button: ReplayButton,
    replay_armed: bool,
}

impl InputMapper {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            button: ReplayButton::for_viewport(width, height),
            replay_armed: false,
        }
    }

    pub fn button(&self) -> &ReplayButton {
        &self.button
    }

    /// Start listening for a Replay tap
    pub fn arm_replay(&mut self) {
        self.replay_armed = true;
    }

    pub fn replay_armed(&self) -> bool {
        self.replay_armed
    }

    pub fn map(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::PressStart => Some(Command::Split),
            InputEvent::PressEnd => Some(Command::Merge),
            InputEvent::Tap { pos } => {
                if self.replay_armed && self.button.contains(pos) {
                    self.replay_armed = false;
                    Some(Command::Restart)
                } else {
                    None
                }
            }
        }
    }
}
