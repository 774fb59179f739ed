use crate::platform::{Platform, PlatformId};

/// Host-side registry that renders and collides against spawned platforms.
///
/// The terrain generator calls `add_platform` once per spawn and
/// `remove_platform` once per despawn. It never reads collision results back.
pub trait World {
    fn add_platform(&mut self, platform: &Platform);

    fn remove_platform(&mut self, id: PlatformId);
}

/// A world with no host attached. Useful when only the terrain bookkeeping matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl World for Detached {
    fn add_platform(&mut self, _platform: &Platform) {}

    fn remove_platform(&mut self, _id: PlatformId) {}
}
