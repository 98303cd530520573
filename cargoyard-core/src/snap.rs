/// Drag-to-grid translation: snap a pointer point to integer grid coordinates
use std::fmt;

use nalgebra::Point3;
use tracing::trace;

use crate::error::{Axis, CargoError, Result};

/// Integer grid position produced by [`snap_to_grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl GridPos {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub fn to_point(self) -> Point3<f32> {
        Point3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Highest grid row a block may snap to for the given height limit
pub fn height_ceiling(height_limit: u32) -> i64 {
    1 + height_limit as i64
}

/// Snap `point` to the integer grid.
///
/// Every axis rounds half away from zero (`2.5 -> 3`, `-2.5 -> -3`), and `y`
/// is then capped at `1 + height_limit`. Finite values beyond the `i64`
/// range saturate. Non-finite input is rejected.
pub fn snap_to_grid(point: &Point3<f32>, height_limit: u32) -> Result<GridPos> {
    let x = snap_axis(Axis::X, point.x)?;
    let y = snap_axis(Axis::Y, point.y)?.min(height_ceiling(height_limit));
    let z = snap_axis(Axis::Z, point.z)?;

    let snapped = GridPos::new(x, y, z);
    trace!(?point, %snapped, height_limit, "snapped pointer to grid");
    Ok(snapped)
}

fn snap_axis(axis: Axis, value: f32) -> Result<i64> {
    if !value.is_finite() {
        return Err(CargoError::NonFiniteCoordinate { axis, value });
    }
    // float-to-int `as` saturates at the i64 bounds
    Ok(value.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(x: f32, y: f32, z: f32, h: u32) -> GridPos {
        snap_to_grid(&Point3::new(x, y, z), h).unwrap()
    }

    #[test]
    fn test_rounds_each_axis() {
        assert_eq!(snap(2.6, 1.2, -4.4, 4), GridPos::new(3, 1, -4));
        assert_eq!(snap(-0.49, 0.51, 0.0, 4), GridPos::new(0, 1, 0));
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(snap(2.5, 0.5, -2.5, 4), GridPos::new(3, 1, -3));
        assert_eq!(snap(-0.5, -1.5, 1.5, 4), GridPos::new(-1, -2, 2));
    }

    #[test]
    fn test_y_clamped_to_ceiling() {
        assert_eq!(snap(0.0, 7.0, 0.0, 4), GridPos::new(0, 5, 0));
        assert_eq!(snap(0.0, 5.4, 0.0, 4), GridPos::new(0, 5, 0));
        assert_eq!(snap(0.0, 100.0, 0.0, 0), GridPos::new(0, 1, 0));
        // only the top is bounded
        assert_eq!(snap(0.0, -40.0, 0.0, 4), GridPos::new(0, -40, 0));
    }

    #[test]
    fn test_y_never_exceeds_ceiling() {
        for h in [0u32, 1, 4, 10, 1000] {
            let mut y = -50.0f32;
            while y < 2000.0 {
                assert!(snap(0.0, y, 0.0, h).y <= height_ceiling(h));
                y += 0.37;
            }
        }
        assert_eq!(snap(0.0, f32::MAX, 0.0, u32::MAX).y, height_ceiling(u32::MAX));
    }

    #[test]
    fn test_integers_are_fixed_points() {
        for x in -20..=20 {
            for z in [-1000, -3, 0, 7, 1000] {
                let p = snap(x as f32, 0.3, z as f32, 4);
                assert_eq!((p.x, p.z), (x, z));
            }
        }
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let inputs = [(2.6, 7.0, -4.4), (-3.5, 0.5, 9.49), (0.1, -2.7, 0.0), (11.5, 4.4, -0.5)];
        for (x, y, z) in inputs {
            let once = snap(x, y, z, 4);
            let twice = snap_to_grid(&once.to_point(), 4).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_large_finite_values_saturate() {
        let p = snap(f32::MAX, 0.0, f32::MIN, 4);
        assert_eq!(p.x, i64::MAX);
        assert_eq!(p.z, i64::MIN);
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let nan = snap_to_grid(&Point3::new(f32::NAN, 0.0, 0.0), 4);
        assert!(matches!(
            nan,
            Err(CargoError::NonFiniteCoordinate { axis: Axis::X, .. })
        ));

        assert_eq!(
            snap_to_grid(&Point3::new(0.0, f32::INFINITY, 0.0), 4),
            Err(CargoError::NonFiniteCoordinate {
                axis: Axis::Y,
                value: f32::INFINITY,
            })
        );
        assert_eq!(
            snap_to_grid(&Point3::new(0.0, 0.0, f32::NEG_INFINITY), 4),
            Err(CargoError::NonFiniteCoordinate {
                axis: Axis::Z,
                value: f32::NEG_INFINITY,
            })
        );
    }
}
