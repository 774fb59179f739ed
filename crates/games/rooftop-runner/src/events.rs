use serde::{Deserialize, Serialize};

use crate::player::Mode;

/// Tricks in the order they are performed during one airborne period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trick {
    Ollie,
    Kickflip,
    Heelflip,
}

impl Trick {
    pub const SEQUENCE: [Trick; 3] = [Trick::Ollie, Trick::Kickflip, Trick::Heelflip];

    /// Trick performed as the `count`th trick (1-based) of an airborne period.
    pub fn nth(count: u8) -> Option<Trick> {
        count
            .checked_sub(1)
            .and_then(|i| Self::SEQUENCE.get(i as usize).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Trick::Ollie => "OLLIE",
            Trick::Kickflip => "KICKFLIP",
            Trick::Heelflip => "HEELFLIP",
        }
    }
}

/// Output of the player and run handlers, consumed by the scene/UI layer each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunnerEvent {
    /// The player entered a new mode.
    ModeChanged { from: Mode, to: Mode },
    /// An airborne trick was performed.
    Trick { trick: Trick, count: u8 },
    /// Request a short scale pulse on the player sprite.
    TrickPulse { peak_scale: f32, duration: f32 },
    /// Request a dust burst under the player's feet.
    LandingBurst { duration: f32 },
    /// The run ended. Emitted once.
    GameOver { distance: u32 },
}
