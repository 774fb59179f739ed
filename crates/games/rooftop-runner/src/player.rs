use serde::{Deserialize, Serialize};

use rooftop_core::collision::{BodyCategory, CollisionEvent, ContactSide};

use crate::config::PlayerConfig;
use crate::events::{RunnerEvent, Trick};
use crate::scoring::distance_traveled;

/// Tricks allowed per airborne period.
pub const MAX_AIR_TRICKS: u8 = 3;
/// Peak sprite scale of the trick pulse.
const TRICK_PULSE_SCALE: f32 = 1.3;
/// Seconds for the trick pulse to grow and shrink back.
const TRICK_PULSE_DURATION: f32 = 0.2;
/// Seconds the landing dust emitter stays on.
const LANDING_BURST_DURATION: f32 = 0.1;

/// Discrete movement mode of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// On a rooftop, auto-running.
    Running,
    /// First moments of a jump, before tricks are allowed.
    Jumping,
    /// Airborne; taps perform tricks.
    InAir,
    /// Riding a rail.
    Grinding,
    /// Brief touchdown before running resumes.
    Landing,
}

/// What the presentation layer should draw for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Running,
    Airborne,
    Trick(Trick),
    Grinding,
}

/// The runner's motion state machine.
///
/// Velocity is set once on mode entry and then left to the physics host, which
/// integrates `x`/`y` and reads/writes `vx`/`vy` directly.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    mode: Mode,
    mode_timer: f32,
    air_trick_count: u8,
    game_over: bool,
    start_x: f32,
    config: PlayerConfig,
}

impl Player {
    /// Spawn above the first rooftop. The player starts airborne and falls onto it.
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            x: config.spawn_x,
            y: config.spawn_y,
            vx: 0.0,
            vy: 0.0,
            mode: Mode::InAir,
            mode_timer: 0.0,
            air_trick_count: 0,
            game_over: false,
            start_x: config.spawn_x,
            config: config.clone(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Seconds since the current mode was entered.
    pub fn mode_timer(&self) -> f32 {
        self.mode_timer
    }

    pub fn air_trick_count(&self) -> u8 {
        self.air_trick_count
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    pub fn half_width(&self) -> f32 {
        self.config.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.config.height / 2.0
    }

    pub fn distance(&self) -> u32 {
        distance_traveled(self.x, self.start_x)
    }

    pub fn pose(&self) -> Pose {
        match self.mode {
            Mode::Running | Mode::Landing => Pose::Running,
            Mode::Jumping => Pose::Airborne,
            Mode::InAir => Trick::nth(self.air_trick_count).map_or(Pose::Airborne, Pose::Trick),
            Mode::Grinding => Pose::Grinding,
        }
    }

    /// Handle a tap/click: jump when grounded, trick when airborne.
    pub fn tap(&mut self) -> Vec<RunnerEvent> {
        let mut events = Vec::new();
        if self.game_over {
            return events;
        }

        match self.mode {
            Mode::Running | Mode::Grinding => {
                self.vy = self.config.jump_velocity;
                self.transition_to(Mode::Jumping, &mut events);
            },
            Mode::InAir => self.perform_trick(&mut events),
            Mode::Jumping | Mode::Landing => {},
        }
        events
    }

    /// Advance mode timers by one fixed step and run the death check.
    pub fn on_tick(&mut self, dt: f32) -> Vec<RunnerEvent> {
        let mut events = Vec::new();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.mode_timer += dt;

        if self.game_over {
            return events;
        }

        if self.y > self.config.death_y {
            self.game_over = true;
            self.vx = 0.0;
            self.vy = 0.0;
            let distance = self.distance();
            tracing::info!(distance, "Player fell off the world");
            events.push(RunnerEvent::GameOver { distance });
            return events;
        }

        match self.mode {
            Mode::Jumping if self.mode_timer > self.config.jump_apex_window => {
                self.transition_to(Mode::InAir, &mut events);
            },
            Mode::Landing if self.mode_timer > self.config.landing_window => {
                self.transition_to(Mode::Running, &mut events);
            },
            _ => {},
        }
        events
    }

    /// React to a contact change reported by the physics host.
    pub fn on_collision(&mut self, event: CollisionEvent) -> Vec<RunnerEvent> {
        let mut events = Vec::new();
        if self.game_over {
            return events;
        }

        match event {
            CollisionEvent::Start {
                side: ContactSide::Bottom,
                other,
            } => match other {
                BodyCategory::Rail => self.touch_down(Mode::Grinding, &mut events),
                BodyCategory::Platform => self.touch_down(Mode::Landing, &mut events),
                BodyCategory::Other => {},
            },
            CollisionEvent::Start { side, other } if side.is_horizontal() => {
                // Wall hits are not fatal; the run only ends by falling.
                tracing::debug!(?side, ?other, "Side contact ignored");
            },
            CollisionEvent::End { other, .. } if other.is_walkable() => {
                if matches!(self.mode, Mode::Running | Mode::Grinding)
                    && self.vy.abs() > self.config.fall_epsilon
                {
                    self.transition_to(Mode::InAir, &mut events);
                }
            },
            _ => {},
        }
        events
    }

    fn touch_down(&mut self, target: Mode, events: &mut Vec<RunnerEvent>) {
        self.air_trick_count = 0;
        if self.mode == target {
            return;
        }
        events.push(RunnerEvent::LandingBurst {
            duration: LANDING_BURST_DURATION,
        });
        self.transition_to(target, events);
    }

    fn perform_trick(&mut self, events: &mut Vec<RunnerEvent>) {
        if self.air_trick_count >= MAX_AIR_TRICKS {
            return;
        }
        self.air_trick_count += 1;
        if let Some(trick) = Trick::nth(self.air_trick_count) {
            tracing::debug!(trick = trick.name(), "Trick performed");
            events.push(RunnerEvent::Trick {
                trick,
                count: self.air_trick_count,
            });
        }
        events.push(RunnerEvent::TrickPulse {
            peak_scale: TRICK_PULSE_SCALE,
            duration: TRICK_PULSE_DURATION,
        });
    }

    fn transition_to(&mut self, to: Mode, events: &mut Vec<RunnerEvent>) {
        let from = self.mode;
        self.mode = to;
        self.mode_timer = 0.0;
        self.vx = match to {
            Mode::Grinding => self.config.grind_speed,
            Mode::Running | Mode::Jumping | Mode::InAir | Mode::Landing => self.config.run_speed,
        };
        tracing::trace!(?from, ?to, "Mode transition");
        events.push(RunnerEvent::ModeChanged { from, to });
    }
}
