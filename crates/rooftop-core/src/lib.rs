pub mod collision;
pub mod platform;
pub mod time;
pub mod world;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::platform::{Platform, PlatformId, PlatformKind};
    use crate::world::World;

    /// A `World` that records every registration change instead of simulating.
    #[derive(Debug, Default)]
    pub struct RecordingWorld {
        pub live: Vec<Platform>,
        pub added: Vec<PlatformId>,
        pub removed: Vec<PlatformId>,
    }

    impl RecordingWorld {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_live(&self, id: PlatformId) -> bool {
            self.live.iter().any(|p| p.id == id)
        }
    }

    impl World for RecordingWorld {
        fn add_platform(&mut self, platform: &Platform) {
            self.added.push(platform.id);
            self.live.push(*platform);
        }

        fn remove_platform(&mut self, id: PlatformId) {
            self.removed.push(id);
            self.live.retain(|p| p.id != id);
        }
    }

    /// Build a ground platform with a flat roof at `top`.
    pub fn ground(id: PlatformId, left_edge: f32, width: f32, top: f32) -> Platform {
        Platform {
            id,
            left_edge,
            width,
            top,
            height: 100.0,
            kind: PlatformKind::Ground,
        }
    }

    /// Build a rail segment whose upper surface sits at `top`.
    pub fn rail(id: PlatformId, left_edge: f32, width: f32, top: f32) -> Platform {
        Platform {
            id,
            left_edge,
            width,
            top,
            height: 10.0,
            kind: PlatformKind::Rail,
        }
    }
}
