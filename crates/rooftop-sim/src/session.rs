use serde::Serialize;

use rooftop_core::time::FixedTimestep;
use rooftop_runner::RooftopRun;
use rooftop_runner::autopilot::wants_tap;
use rooftop_runner::config::RunnerConfig;
use rooftop_runner::events::RunnerEvent;
use rooftop_runner::player::Mode;

/// Host frame length fed into the fixed-step accumulator.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Totals reported when a headless run finishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub distance: u32,
    pub elapsed_secs: f32,
    pub ticks: u64,
    pub jumps: u32,
    pub tricks: u32,
    pub landings: u32,
    pub grinds: u32,
    pub game_over: bool,
}

impl RunSummary {
    fn record(&mut self, event: &RunnerEvent) {
        match event {
            RunnerEvent::ModeChanged { to, .. } => match to {
                Mode::Jumping => self.jumps += 1,
                Mode::Landing => self.landings += 1,
                Mode::Grinding => self.grinds += 1,
                Mode::Running | Mode::InAir => {},
            },
            RunnerEvent::Trick { .. } => self.tricks += 1,
            RunnerEvent::GameOver { .. } => self.game_over = true,
            RunnerEvent::TrickPulse { .. } | RunnerEvent::LandingBurst { .. } => {},
        }
    }
}

/// Run the autopilot until the player falls or `max_secs` of host time pass.
pub fn run_headless(config: RunnerConfig, max_secs: f32) -> RunSummary {
    let seed = config.seed;
    let mut clock = FixedTimestep::new(config.physics.timestep, config.physics.max_steps_per_frame);
    let mut run = RooftopRun::new(config);
    let mut summary = RunSummary {
        seed,
        ..RunSummary::default()
    };

    let max_frames = (max_secs.max(0.0) / FRAME_DT).ceil() as u64;
    'frames: for _ in 0..max_frames {
        for _ in 0..clock.advance(FRAME_DT) {
            if wants_tap(&run) {
                run.tap();
            }
            for event in run.update(clock.step()) {
                log_event(&event);
                summary.record(&event);
            }
            if run.is_game_over() {
                break 'frames;
            }
        }
    }

    summary.distance = run.distance();
    summary.elapsed_secs = run.elapsed();
    summary.ticks = run.ticks();
    summary
}

fn log_event(event: &RunnerEvent) {
    match event {
        RunnerEvent::ModeChanged { from, to } => tracing::debug!(?from, ?to, "Mode changed"),
        RunnerEvent::Trick { trick, count } => {
            tracing::debug!(trick = trick.name(), count, "Trick");
        },
        RunnerEvent::GameOver { distance } => tracing::info!(distance, "Game over"),
        RunnerEvent::TrickPulse { .. } | RunnerEvent::LandingBurst { .. } => {
            tracing::trace!(?event, "Effect");
        },
    }
}
