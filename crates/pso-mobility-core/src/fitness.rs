use crate::constants::AXIS_WEIGHTS;
use crate::vector::Vec3;

/// Evaluate the fitness of `position` against `target`.
///
/// Each axis contributes `weight * (position - target)^2` with the
/// fixed weights [`AXIS_WEIGHTS`]. The value is non-negative for every
/// finite input and zero exactly when `position == target`, so lower
/// is better and the target is the unique global minimum.
pub fn evaluate(position: Vec3, target: Vec3) -> f64 {
    let dx = position.x - target.x;
    let dy = position.y - target.y;
    let dz = position.z - target.z;
    AXIS_WEIGHTS[0] * dx * dx + AXIS_WEIGHTS[1] * dy * dy + AXIS_WEIGHTS[2] * dz * dz
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: Vec3 = Vec3::new(55.0, 25.0, 15.0);

    #[test]
    fn zero_exactly_at_target() {
        assert_eq!(evaluate(TARGET, TARGET), 0.0);
    }

    #[test]
    fn origin_against_default_target() {
        // 10*55^2 + 20*25^2 + 30*15^2 = 30250 + 12500 + 6750
        assert_eq!(evaluate(Vec3::new(0.0, 0.0, 0.0), TARGET), 49_500.0);
    }

    #[test]
    fn non_negative_for_sampled_positions() {
        let positions = [
            Vec3::new(-100.0, 3.0, 7.0),
            Vec3::new(55.0, 25.0, 14.999),
            Vec3::new(1e6, -1e6, 0.0),
        ];
        for position in positions {
            assert!(evaluate(position, TARGET) >= 0.0);
        }
    }

    #[test]
    fn axis_weights_are_asymmetric() {
        let origin = Vec3::new(0.0, 0.0, 0.0);
        let unit_x = evaluate(Vec3::new(1.0, 0.0, 0.0), origin);
        let unit_y = evaluate(Vec3::new(0.0, 1.0, 0.0), origin);
        let unit_z = evaluate(Vec3::new(0.0, 0.0, 1.0), origin);
        assert_eq!(unit_x, 10.0);
        assert_eq!(unit_y, 20.0);
        assert_eq!(unit_z, 30.0);
    }

    #[test]
    fn fitness_strictly_decreases_approaching_target() {
        let far = evaluate(Vec3::new(0.0, 0.0, 0.0), TARGET);
        let mid = evaluate(Vec3::new(30.0, 15.0, 10.0), TARGET);
        let near = evaluate(Vec3::new(54.0, 24.5, 14.9), TARGET);
        assert!(far > mid);
        assert!(mid > near);
        assert!(near > 0.0);
    }
}
