use serde::{Deserialize, Serialize};

use crate::collision::BodyCategory;

/// Identity of a spawned platform, unique within a run.
pub type PlatformId = u64;

/// Surface category of a platform. Decides whether landing on it runs or grinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    #[default]
    Ground,
    Rail,
}

impl PlatformKind {
    pub fn category(self) -> BodyCategory {
        match self {
            PlatformKind::Ground => BodyCategory::Platform,
            PlatformKind::Rail => BodyCategory::Rail,
        }
    }
}

/// A static rectangle of rooftop or rail geometry.
///
/// Coordinates are y-down: `top` is the walkable surface and the body extends
/// `height` units below it. A platform never moves after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub left_edge: f32,
    pub width: f32,
    pub top: f32,
    pub height: f32,
    pub kind: PlatformKind,
}

impl Platform {
    /// Trailing (rightmost) x of the platform.
    pub fn right_edge(&self) -> f32 {
        self.left_edge + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether `x` lies over the walkable surface, half-open on the right.
    pub fn spans(&self, x: f32) -> bool {
        x >= self.left_edge && x < self.right_edge()
    }
}
