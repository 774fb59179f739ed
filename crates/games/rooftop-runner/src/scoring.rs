/// Whole units travelled from the spawn point. Never negative.
pub fn distance_traveled(x: f32, start_x: f32) -> u32 {
    let d = (x - start_x).floor();
    if d.is_finite() && d > 0.0 {
        d as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_forward_progress() {
        assert_eq!(distance_traveled(100.0, 100.0), 0);
        assert_eq!(distance_traveled(350.9, 100.0), 250);
        assert_eq!(distance_traveled(101.0, 100.0), 1);
    }

    #[test]
    fn clamps_backward_progress() {
        assert_eq!(distance_traveled(90.0, 100.0), 0);
    }

    #[test]
    fn non_finite_is_zero() {
        assert_eq!(distance_traveled(f32::NAN, 100.0), 0);
        assert_eq!(distance_traveled(f32::INFINITY, 100.0), 0);
    }
}
