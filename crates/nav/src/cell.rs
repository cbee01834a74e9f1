use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete grid position expressed in cell coordinates.
///
/// Serialized as a 2-element `[x, y]` array to match the wire format of map
/// payloads. The y axis grows downward, so `Direction::Down` is `+y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: the number of 8-directional steps between two
    /// cells on an empty grid.
    pub fn chebyshev(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// True when the cell lies inside the bounded square grid.
    pub fn in_bounds(self, grid_size: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < grid_size && self.y < grid_size
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Default for GridCell {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<GridCell> for (i32, i32) {
    fn from(cell: GridCell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The 8 neighbor offsets, scanned in this order everywhere a deterministic
/// neighbor order matters (search expansion, approach-cell resolution).
/// Cardinals first, then diagonals, matching [`Direction`] declaration order.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// One movement step as consumed by the renderer.
///
/// Wire names are camelCase (`"up"`, `"downRight"`, ...). `None` is the
/// defensive mapping for a delta that is not one of the 8 unit offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    None,
}

impl Direction {
    /// Maps a coordinate delta to a direction.
    ///
    /// Deltas produced by the search are unit offsets by construction; any
    /// other delta indicates a caller bug and maps to [`Direction::None`]
    /// rather than failing.
    pub fn from_delta(dx: i32, dy: i32) -> Self {
        match (dx, dy) {
            (0, -1) => Self::Up,
            (0, 1) => Self::Down,
            (-1, 0) => Self::Left,
            (1, 0) => Self::Right,
            (-1, -1) => Self::UpLeft,
            (1, -1) => Self::UpRight,
            (-1, 1) => Self::DownLeft,
            (1, 1) => Self::DownRight,
            _ => Self::None,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (1, -1),
            Self::DownLeft => (-1, 1),
            Self::DownRight => (1, 1),
            Self::None => (0, 0),
        }
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_round_trips_through_from_delta() {
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let dir = Direction::from_delta(dx, dy);
            assert_ne!(dir, Direction::None);
            assert_eq!(dir.delta(), (dx, dy));
        }
    }

    #[test]
    fn non_unit_delta_maps_to_none() {
        assert_eq!(Direction::from_delta(0, 0), Direction::None);
        assert_eq!(Direction::from_delta(2, 1), Direction::None);
        assert_eq!(Direction::from_delta(-3, 0), Direction::None);
    }

    #[test]
    fn wire_names_are_camel_case() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::DownRight.to_string(), "downRight");
        assert_eq!(Direction::UpLeft.to_string(), "upLeft");
    }

    #[test]
    fn bounds_check_is_half_open() {
        assert!(GridCell::new(0, 0).in_bounds(5));
        assert!(GridCell::new(4, 4).in_bounds(5));
        assert!(!GridCell::new(5, 4).in_bounds(5));
        assert!(!GridCell::new(-1, 0).in_bounds(5));
    }
}
