use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rooftop_core::platform::{Platform, PlatformId, PlatformKind};
use rooftop_core::world::World;

use crate::config::{TerrainConfig, WidthDistribution};

/// Most platforms a single `initialize` or `update` call will spawn.
const MAX_SPAWNS_PER_CALL: usize = 4096;

/// Streams rooftops ahead of a moving reference point and releases them behind it.
///
/// Platforms are kept in spawn order, which is also left-to-right order, so
/// pruning is a plain order-preserving filter.
#[derive(Debug)]
pub struct TerrainGenerator {
    config: TerrainConfig,
    rng: StdRng,
    platforms: Vec<Platform>,
    rightmost_edge: f32,
    next_id: PlatformId,
}

impl TerrainGenerator {
    pub fn new(config: &TerrainConfig, seed: u64) -> Self {
        let mut config = config.clone();
        config.rail_chance = if config.rail_chance.is_nan() {
            0.0
        } else {
            config.rail_chance.clamp(0.0, 1.0)
        };
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            platforms: Vec::new(),
            rightmost_edge: 0.0,
            next_id: 1,
        }
    }

    /// Live platforms, left to right.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// X where the next platform (or the gap before it) starts.
    pub fn rightmost_edge(&self) -> f32 {
        self.rightmost_edge
    }

    pub fn active_count(&self) -> usize {
        self.platforms.len()
    }

    /// The platform whose surface spans `x`, if any.
    pub fn platform_at(&self, x: f32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.spans(x))
    }

    /// Release every live platform and refill from x = 0 up to the initial horizon.
    pub fn initialize<W: World + ?Sized>(&mut self, world: &mut W) {
        for p in self.platforms.drain(..) {
            world.remove_platform(p.id);
        }
        self.rightmost_edge = 0.0;

        self.fill_to(self.config.initial_horizon, world);
        tracing::debug!(
            count = self.platforms.len(),
            frontier = self.rightmost_edge,
            "Initial terrain generated"
        );
    }

    /// Extend the frontier past `reference_x + spawn_distance` and prune
    /// platforms that ended before `reference_x + despawn_distance`.
    ///
    /// A single call spawns at most `MAX_SPAWNS_PER_CALL` platforms, so a
    /// teleport further than that many roofs leaves the frontier short until
    /// later calls catch up.
    pub fn update<W: World + ?Sized>(&mut self, reference_x: f32, world: &mut W) {
        if !reference_x.is_finite() {
            tracing::warn!(reference_x, "Ignoring non-finite terrain reference");
            return;
        }

        self.fill_to(reference_x + self.config.spawn_distance, world);

        let threshold = reference_x + self.config.despawn_distance;
        self.platforms.retain(|p| {
            if p.right_edge() < threshold {
                tracing::trace!(id = p.id, right = p.right_edge(), "Despawning platform");
                world.remove_platform(p.id);
                false
            } else {
                true
            }
        });
    }

    fn fill_to<W: World + ?Sized>(&mut self, target: f32, world: &mut W) {
        let mut spawned = 0;
        while self.rightmost_edge < target {
            if spawned == MAX_SPAWNS_PER_CALL {
                tracing::warn!(
                    frontier = self.rightmost_edge,
                    target,
                    "Spawn limit reached for this call"
                );
                return;
            }
            let before = self.rightmost_edge;
            self.spawn(world);
            spawned += 1;
            // Far enough out, width + gap is below f32 resolution.
            if self.rightmost_edge <= before {
                tracing::warn!(
                    frontier = self.rightmost_edge,
                    "Frontier stopped advancing"
                );
                return;
            }
        }
    }

    fn spawn<W: World + ?Sized>(&mut self, world: &mut W) {
        let width = self.sample_width();
        let gap = sample_range(&mut self.rng, self.config.min_gap, self.config.max_gap);
        let kind = if self.config.rail_chance > 0.0 && self.rng.random_bool(self.config.rail_chance)
        {
            PlatformKind::Rail
        } else {
            PlatformKind::Ground
        };
        self.spawn_with(width, gap, kind, world);
    }

    fn spawn_with<W: World + ?Sized>(
        &mut self,
        width: f32,
        gap: f32,
        kind: PlatformKind,
        world: &mut W,
    ) {
        let height = match kind {
            PlatformKind::Ground => self.config.platform_height,
            PlatformKind::Rail => self.config.rail_height,
        };
        let platform = Platform {
            id: self.next_id,
            left_edge: self.rightmost_edge,
            width,
            top: self.config.roof_y,
            height,
            kind,
        };
        self.next_id += 1;

        world.add_platform(&platform);
        self.platforms.push(platform);
        tracing::trace!(
            id = platform.id,
            left = platform.left_edge,
            width,
            gap,
            "Spawned platform"
        );

        self.rightmost_edge += width;
        self.rightmost_edge += gap;
    }

    fn sample_width(&mut self) -> f32 {
        let (min, max) = (self.config.min_width, self.config.max_width);
        match self.config.width_distribution {
            WidthDistribution::Uniform => sample_range(&mut self.rng, min, max),
            WidthDistribution::Skewed { power } => {
                let u: f32 = self.rng.random();
                (u.powf(power) * (max - min) + min).clamp(min, max)
            },
        }
    }
}

fn sample_range(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}
