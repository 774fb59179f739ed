use serde::{Deserialize, Serialize};

/// Side of the player's body that touched (or stopped touching) another body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl ContactSide {
    pub fn is_horizontal(self) -> bool {
        matches!(self, ContactSide::Left | ContactSide::Right)
    }
}

/// Category tag of the other body in a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyCategory {
    Platform,
    Rail,
    Other,
}

impl BodyCategory {
    /// Bodies the player can stand on.
    pub fn is_walkable(self) -> bool {
        matches!(self, BodyCategory::Platform | BodyCategory::Rail)
    }
}

/// Contact notification delivered by the physics host after integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    Start {
        side: ContactSide,
        other: BodyCategory,
    },
    End {
        side: ContactSide,
        other: BodyCategory,
    },
}

impl CollisionEvent {
    pub fn side(&self) -> ContactSide {
        match *self {
            CollisionEvent::Start { side, .. } | CollisionEvent::End { side, .. } => side,
        }
    }

    pub fn other(&self) -> BodyCategory {
        match *self {
            CollisionEvent::Start { other, .. } | CollisionEvent::End { other, .. } => other,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, CollisionEvent::Start { .. })
    }
}
