//! Keyboard navigation of the user point over the parameter domain.

use std::f64::consts::TAU;

use xcap_core::R_FLOOR;
use xcap_geometry::ParameterPoint;

/// Direction of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Increase `r`.
    Up,
    /// Decrease `r`.
    Down,
    /// Decrease `theta`.
    Left,
    /// Increase `theta`.
    Right,
}

impl Direction {
    /// `w`/`s`/`a`/`d` in either case.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Move `point` one `step` in `direction`, wrapping at the domain edges.
///
/// Past `r_max` the radius restarts at 0.25 and below 0.25 it jumps to
/// `r_max`. Below 0 the angle jumps to `2*PI` and past `2*PI` it restarts at 0.
pub fn advance(point: ParameterPoint, direction: Direction, r_max: f64, step: f64) -> ParameterPoint {
    let mut next = point;
    match direction {
        Direction::Up => {
            next.r += step;
            if next.r > r_max {
                next.r = R_FLOOR;
            }
        }
        Direction::Down => {
            next.r -= step;
            if next.r < R_FLOOR {
                next.r = r_max;
            }
        }
        Direction::Left => {
            next.theta -= step;
            if next.theta < 0.0 {
                next.theta = TAU;
            }
        }
        Direction::Right => {
            next.theta += step;
            if next.theta > TAU {
                next.theta = 0.0;
            }
        }
    }
    next
}
