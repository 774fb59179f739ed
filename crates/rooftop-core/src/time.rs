/// Accumulates variable frame time into a whole number of fixed simulation steps.
///
/// Time beyond `max_steps` per frame is dropped so a stalled host cannot
/// spiral into ever longer catch-up frames.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32, max_steps: u32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            1.0 / 60.0
        };
        Self {
            step,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Seconds per simulation step.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many steps to run now.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            tracing::warn!(
                dropped_secs = self.accumulator,
                "frame exceeded {} steps, dropping backlog",
                self.max_steps
            );
            self.accumulator = 0.0;
        }

        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_steps_are_consumed() {
        let mut ts = FixedTimestep::new(0.25, 8);
        assert_eq!(ts.advance(0.875), 3);
        assert_eq!(ts.accumulator, 0.125);
        assert_eq!(ts.advance(0.125), 1);
    }

    #[test]
    fn short_frames_accumulate() {
        let mut ts = FixedTimestep::new(0.016, 8);
        assert_eq!(ts.advance(0.010), 0);
        assert_eq!(ts.advance(0.010), 1);
    }

    #[test]
    fn backlog_is_capped() {
        let mut ts = FixedTimestep::new(0.016, 4);
        assert_eq!(ts.advance(10.0), 4);
        assert_eq!(ts.accumulator, 0.0, "excess time must be dropped");
    }

    #[test]
    fn bad_frame_times_are_ignored() {
        let mut ts = FixedTimestep::new(0.016, 4);
        assert_eq!(ts.advance(-1.0), 0);
        assert_eq!(ts.advance(f32::NAN), 0);
        assert_eq!(ts.advance(f32::INFINITY), 0);
        assert_eq!(ts.accumulator, 0.0);
    }

    #[test]
    fn invalid_step_falls_back() {
        let ts = FixedTimestep::new(0.0, 0);
        assert!((ts.step() - 1.0 / 60.0).abs() < 1e-6);
    }
}
