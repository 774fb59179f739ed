//! End-to-end runs driven by the autopilot: terrain streaming, the player
//! state machine, and the arcade host working together over many ticks.

use rooftop_runner::RooftopRun;
use rooftop_runner::autopilot::wants_tap;
use rooftop_runner::config::{GRIND_SPEED, RunnerConfig};
use rooftop_runner::events::RunnerEvent;
use rooftop_runner::player::{MAX_AIR_TRICKS, Mode};

const DT: f32 = 0.016;

fn is_touchdown(event: &RunnerEvent) -> bool {
    matches!(
        event,
        RunnerEvent::ModeChanged {
            to: Mode::Landing | Mode::Grinding,
            ..
        }
    )
}

/// Drive a run for `secs` simulated seconds, checking per-tick invariants.
fn drive(run: &mut RooftopRun, secs: f32) -> Vec<RunnerEvent> {
    let ticks = (secs / DT) as usize;
    let spawn_distance = run.config().terrain.spawn_distance;
    let mut all = Vec::new();
    let mut tricks_since_touchdown = 0u8;

    for _ in 0..ticks {
        if wants_tap(run) {
            run.tap();
        }
        let events = run.update(DT);

        for event in &events {
            if is_touchdown(event) {
                tricks_since_touchdown = 0;
            }
            if let RunnerEvent::Trick { count, .. } = event {
                tricks_since_touchdown += 1;
                assert_eq!(*count, tricks_since_touchdown);
                assert!(tricks_since_touchdown <= MAX_AIR_TRICKS);
            }
        }

        assert_eq!(
            run.world().platforms().len(),
            run.terrain().active_count(),
            "host registrations must mirror the active list"
        );
        if !run.is_game_over() {
            assert!(
                run.terrain().rightmost_edge() >= run.camera_x() + spawn_distance - 10.0,
                "frontier fell behind the camera"
            );
        }
        all.extend(events);
    }
    all
}

#[test]
fn autopilot_clears_gaps() {
    let mut run = RooftopRun::new(RunnerConfig::default());
    let events = drive(&mut run, 30.0);

    let game_overs = events
        .iter()
        .filter(|e| matches!(e, RunnerEvent::GameOver { .. }))
        .count();
    assert!(game_overs <= 1);
    assert!(
        run.distance() >= 3000,
        "autopilot only made it {} px",
        run.distance()
    );

    let jumps = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                RunnerEvent::ModeChanged {
                    to: Mode::Jumping,
                    ..
                }
            )
        })
        .count();
    assert!(jumps >= 5, "expected several roof-to-roof jumps, got {jumps}");
    assert!(
        events
            .iter()
            .any(|e| matches!(e, RunnerEvent::Trick { count: 3, .. }))
    );
}

#[test]
fn old_rooftops_are_released() {
    let mut run = RooftopRun::new(RunnerConfig::default());
    drive(&mut run, 20.0);
    let despawn = run.config().terrain.despawn_distance;
    let camera = run.camera_x();
    assert!(
        run.terrain()
            .platforms()
            .iter()
            .all(|p| p.right_edge() >= camera + despawn - 10.0)
    );
    assert!(run.terrain().platforms()[0].id > 1, "first roof should be gone");
}

#[test]
fn seeded_runs_are_identical() {
    let mut a = RooftopRun::new(RunnerConfig::default());
    let mut b = RooftopRun::new(RunnerConfig::default());
    let ea = drive(&mut a, 10.0);
    let eb = drive(&mut b, 10.0);
    assert_eq!(ea, eb);
    assert_eq!(a.player().x, b.player().x);
    assert_eq!(a.terrain().platforms(), b.terrain().platforms());
}

#[test]
fn all_rail_course_grinds_on_first_touch() {
    let mut config = RunnerConfig::default();
    config.terrain.rail_chance = 1.0;
    let mut run = RooftopRun::new(config);

    let events = run.update(DT);
    assert!(events.contains(&RunnerEvent::ModeChanged {
        from: Mode::InAir,
        to: Mode::Grinding
    }));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, RunnerEvent::LandingBurst { .. }))
    );
    assert_eq!(run.player().mode(), Mode::Grinding);
    assert_eq!(run.player().vx, GRIND_SPEED);

    let events = drive(&mut run, 10.0);
    assert!(
        events
            .iter()
            .filter(|e| matches!(
                e,
                RunnerEvent::ModeChanged {
                    to: Mode::Grinding,
                    ..
                }
            ))
            .count()
            >= 2,
        "autopilot should hop between rails"
    );
    assert!(!events.contains(&RunnerEvent::ModeChanged {
        from: Mode::Landing,
        to: Mode::Running
    }));
}
