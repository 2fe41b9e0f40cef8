use serde::Deserialize;

pub const FULL_CIRCLE: i32 = 360;

/// The direction in which the encoder fills as progress grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Positive for counter-clockwise, negative for clockwise.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => -1,
            Direction::CounterClockwise => 1,
        }
    }
}

/// The filled portion of the circle, swept counter-clockwise from `start` to
/// `end`. Angles start at the X axis and grow counter-clockwise.
///
/// `start` is always in `[0, 360)`. `end` may exceed 360 so that a full circle
/// (`end - start == 360`) stays distinct from an empty one (`end == start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    pub start: i32,
    pub end: i32,
}

impl Sweep {
    pub fn span(&self) -> i32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.span() <= 0
    }

    pub fn is_full(&self) -> bool {
        self.span() >= FULL_CIRCLE
    }

    /// Reports whether the angle in degrees lies on the arc. Works modulo 360.
    pub fn contains(&self, degrees: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.is_full() {
            return true;
        }
        let rel = (degrees - self.start as f64).rem_euclid(FULL_CIRCLE as f64);
        rel <= self.span() as f64
    }
}

/// Maps `current / total` onto a sweep of the circle beginning at
/// `base_angle` and growing in the direction's sign.
///
/// `total` must be positive; the encoder never stores a zero total.
pub fn start_end_angles(current: i32, total: i32, base_angle: i32, direction: Direction) -> Sweep {
    let fraction = current as f64 / total as f64;
    let sweep = ((FULL_CIRCLE as f64 * fraction).round() as i32).clamp(0, FULL_CIRCLE);

    let start = match direction.sign() {
        s if s > 0 => base_angle,
        _ => base_angle - sweep,
    };
    let start = start.rem_euclid(FULL_CIRCLE);
    Sweep {
        start,
        end: start + sweep,
    }
}
