/// The on-canvas character pose, mutated only by move/rotate/output blocks
/// and reset between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterState {
    pub x: f64,
    pub y: f64,
    pub rotation_degrees: f64,
    /// The speech-bubble text while an output block holds it.
    pub message: Option<String>,
}

/// Movement axis for `move` blocks, in screen coordinates: `up` decreases
/// `y`, `down` increases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn parse(name: &str) -> Option<Direction> {
        match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Signed unit deltas on the (x, y) axes.
    pub(crate) fn deltas(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Spin direction for `rotate` blocks; `right` is the positive sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDirection {
    Left,
    Right,
}

impl SpinDirection {
    pub fn parse(name: &str) -> Option<SpinDirection> {
        match name {
            "left" => Some(SpinDirection::Left),
            "right" => Some(SpinDirection::Right),
            _ => None,
        }
    }

    pub(crate) fn signum(self) -> f64 {
        match self {
            SpinDirection::Left => -1.0,
            SpinDirection::Right => 1.0,
        }
    }
}
