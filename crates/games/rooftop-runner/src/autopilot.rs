use crate::RooftopRun;
use crate::player::{MAX_AIR_TRICKS, Mode};

/// Take off once the player's trailing edge is this close to the roof end.
const TAKEOFF_MARGIN: f32 = 12.0;
/// Seconds between successive trick taps while airborne.
const TRICK_SPACING: f32 = 0.12;

/// Decide whether a demo player should tap this tick.
///
/// Jumps as late as possible off each roof so the whole body width counts
/// toward clearing the gap, then chains tricks at a steady pace while airborne.
pub fn wants_tap(run: &RooftopRun) -> bool {
    let player = run.player();
    if player.is_game_over() {
        return false;
    }

    match player.mode() {
        Mode::Running | Mode::Grinding => {
            let back = player.x - player.half_width();
            run.terrain()
                .platform_at(back)
                .is_some_and(|roof| back >= roof.right_edge() - TAKEOFF_MARGIN)
        },
        Mode::InAir => {
            let count = player.air_trick_count();
            count < MAX_AIR_TRICKS
                && player.mode_timer() > f32::from(count + 1) * TRICK_SPACING
        },
        Mode::Jumping | Mode::Landing => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;

    #[test]
    fn waits_while_falling_onto_first_roof() {
        let run = RooftopRun::new(RunnerConfig::default());
        assert!(!wants_tap(&run), "no tricks right after spawn");
    }

    #[test]
    fn stays_put_mid_roof() {
        let mut run = RooftopRun::new(RunnerConfig::default());
        for _ in 0..10 {
            run.update(0.016);
        }
        assert_eq!(run.player().mode(), Mode::Running);
        assert!(!wants_tap(&run));
    }

    #[test]
    fn jumps_near_roof_end() {
        let mut run = RooftopRun::new(RunnerConfig::default());
        let mut jumped_at = None;
        for _ in 0..600 {
            if wants_tap(&run) && run.player().mode() == Mode::Running {
                jumped_at = Some(run.player().x);
                break;
            }
            run.update(0.016);
        }
        let x = jumped_at.expect("autopilot should jump off the first roof");
        let roof = run.terrain().platforms()[0];
        assert!(x - run.player().half_width() >= roof.right_edge() - TAKEOFF_MARGIN);
        assert!(x - run.player().half_width() < roof.right_edge());
    }
}
