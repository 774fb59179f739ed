pub mod autopilot;
pub mod config;
pub mod events;
pub mod physics;
pub mod player;
pub mod scoring;
pub mod terrain;

use config::RunnerConfig;
use events::RunnerEvent;
use physics::ArcadeWorld;
use player::Player;
use terrain::TerrainGenerator;

/// One endless run: the player, the streamed rooftops, and the arcade host
/// that integrates them.
///
/// Each `update` performs one fixed tick in a fixed order: latched input,
/// player timers and death check, terrain streaming around the camera,
/// physics integration, then contact callbacks.
#[derive(Debug)]
pub struct RooftopRun {
    config: RunnerConfig,
    player: Player,
    terrain: TerrainGenerator,
    world: ArcadeWorld,
    pending_tap: bool,
    elapsed: f32,
    ticks: u64,
}

impl RooftopRun {
    /// Start a run. An invalid config is replaced by the defaults, keeping its seed.
    pub fn new(config: RunnerConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("Rejected run config: {e}, using defaults");
                RunnerConfig {
                    seed: config.seed,
                    ..RunnerConfig::default()
                }
            },
        };
        let player = Player::new(&config.player);
        let mut terrain = TerrainGenerator::new(&config.terrain, config.seed);
        let mut world = ArcadeWorld::new(&config.physics);
        terrain.initialize(&mut world);
        tracing::debug!(seed = config.seed, "Run started");

        Self {
            config,
            player,
            terrain,
            world,
            pending_tap: false,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    pub fn world(&self) -> &ArcadeWorld {
        &self.world
    }

    /// Camera x, kept ahead of the player so it sits near the left of the screen.
    pub fn camera_x(&self) -> f32 {
        self.player.x + self.config.player.camera_lead
    }

    /// Distance shown by the on-screen counter.
    pub fn distance(&self) -> u32 {
        self.player.distance()
    }

    pub fn is_game_over(&self) -> bool {
        self.player.is_game_over()
    }

    /// Seconds simulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Latch a tap. Multiple taps before the next tick collapse into one.
    pub fn tap(&mut self) {
        self.pending_tap = true;
    }

    /// Advance the run by one tick of `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Vec<RunnerEvent> {
        let mut events = Vec::new();
        if self.player.is_game_over() {
            self.pending_tap = false;
            return events;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        self.ticks += 1;

        if std::mem::take(&mut self.pending_tap) {
            events.extend(self.player.tap());
        }

        events.extend(self.player.on_tick(dt));
        if self.player.is_game_over() {
            return events;
        }

        let camera_x = self.camera_x();
        self.terrain.update(camera_x, &mut self.world);

        for contact in self.world.step(&mut self.player, dt) {
            events.extend(self.player.on_collision(contact));
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use player::Mode;

    const DT: f32 = 0.016;

    fn run_ticks(run: &mut RooftopRun, n: usize) -> Vec<RunnerEvent> {
        let mut all = Vec::new();
        for _ in 0..n {
            all.extend(run.update(DT));
        }
        all
    }

    #[test]
    fn new_run_has_terrain_ahead() {
        let run = RooftopRun::new(RunnerConfig::default());
        assert!(run.terrain().rightmost_edge() >= 1600.0);
        assert_eq!(run.world().platforms().len(), run.terrain().active_count());
        assert_eq!(run.player().mode(), Mode::InAir);
        assert_eq!(run.distance(), 0);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let mut config = RunnerConfig::default();
        config.seed = 9;
        config.terrain.rail_chance = 1.5;
        config.terrain.spawn_distance = f32::INFINITY;
        let mut run = RooftopRun::new(config);
        assert_eq!(run.config().seed, 9);
        assert_eq!(run.config().terrain.rail_chance, 0.0);
        assert_eq!(run.config().terrain.spawn_distance, 1600.0);
        run_ticks(&mut run, 10);
        assert_eq!(run.player().mode(), Mode::Running);
    }

    #[test]
    fn player_lands_then_runs() {
        let mut run = RooftopRun::new(RunnerConfig::default());
        let events = run_ticks(&mut run, 10);
        assert!(events.contains(&RunnerEvent::ModeChanged {
            from: Mode::InAir,
            to: Mode::Landing
        }));
        assert!(events.contains(&RunnerEvent::ModeChanged {
            from: Mode::Landing,
            to: Mode::Running
        }));
        assert_eq!(run.player().mode(), Mode::Running);
        assert!(run.distance() > 0);
    }

    #[test]
    fn tap_is_applied_on_next_tick() {
        let mut run = RooftopRun::new(RunnerConfig::default());
        run_ticks(&mut run, 10);
        run.tap();
        run.tap();
        assert_eq!(run.player().mode(), Mode::Running);
        let events = run.update(DT);
        assert!(events.contains(&RunnerEvent::ModeChanged {
            from: Mode::Running,
            to: Mode::Jumping
        }));
        assert!(run.player().vy < 0.0, "player should be rising");
    }

    #[test]
    fn idle_runner_falls_and_game_over_fires_once() {
        let mut run = RooftopRun::new(RunnerConfig::default());
        let events = run_ticks(&mut run, 60 * 20);
        let game_overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, RunnerEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs.len(), 1);
        assert!(run.is_game_over());

        // The idle runner drops into the first gap and is stopped by the next wall.
        let second_roof = run.terrain().platforms()[1];
        if let RunnerEvent::GameOver { distance } = game_overs[0] {
            assert!(*distance > 0);
            assert!((*distance as f32) < second_roof.left_edge);
        }
    }

    #[test]
    fn run_is_frozen_after_game_over() {
        let mut run = RooftopRun::new(RunnerConfig::default());
        run_ticks(&mut run, 60 * 20);
        assert!(run.is_game_over());
        let (x, y, ticks) = (run.player().x, run.player().y, run.ticks());
        run.tap();
        assert!(run_ticks(&mut run, 30).is_empty());
        assert_eq!((run.player().x, run.player().y), (x, y));
        assert_eq!(run.ticks(), ticks);
    }

    #[test]
    fn terrain_follows_camera() {
        let mut run = RooftopRun::new(RunnerConfig::default());
        run_ticks(&mut run, 20);
        assert!(run.terrain().rightmost_edge() >= run.camera_x() + 1600.0 - 10.0);
    }
}
