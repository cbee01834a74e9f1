//! Converts cell sequences into the material a movement payload carries:
//! per-step directions and pixel waypoints.

use serde::{Deserialize, Serialize};

use crate::cell::{Direction, GridCell};

/// A waypoint in renderer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

/// Derives one direction per consecutive cell pair; length is
/// `path.len() - 1` (zero for trivial paths).
pub fn to_directions(path: &[GridCell]) -> Vec<Direction> {
    path.windows(2)
        .map(|pair| Direction::from_delta(pair[1].x - pair[0].x, pair[1].y - pair[0].y))
        .collect()
}

/// Scales cell coordinates to pixel waypoints.
pub fn to_pixels(path: &[GridCell], cell_size: i32) -> Vec<PixelPoint> {
    path.iter()
        .map(|cell| PixelPoint {
            x: cell.x * cell_size,
            y: cell.y * cell_size,
        })
        .collect()
}

/// Caps a path at `max_steps` steps, keeping the first `max_steps + 1` cells.
///
/// The truncated path's final cell is the position the walk actually ends on;
/// callers commit that cell, never the original goal.
pub fn truncate(mut path: Vec<GridCell>, max_steps: usize) -> Vec<GridCell> {
    path.truncate(max_steps + 1);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<GridCell> {
        coords.iter().map(|&(x, y)| GridCell::new(x, y)).collect()
    }

    #[test]
    fn directions_match_step_deltas() {
        let path = cells(&[(0, 0), (1, 1), (1, 2), (0, 2), (0, 1)]);
        assert_eq!(
            to_directions(&path),
            vec![
                Direction::DownRight,
                Direction::Down,
                Direction::Left,
                Direction::Up,
            ]
        );
    }

    #[test]
    fn directions_has_one_fewer_entry_than_path() {
        let path = cells(&[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(to_directions(&path).len(), path.len() - 1);
        assert!(to_directions(&[]).is_empty());
        assert!(to_directions(&cells(&[(3, 3)])).is_empty());
    }

    #[test]
    fn malformed_step_maps_to_none() {
        let path = cells(&[(0, 0), (2, 0)]);
        assert_eq!(to_directions(&path), vec![Direction::None]);
    }

    #[test]
    fn pixels_scale_by_cell_size() {
        let path = cells(&[(0, 0), (1, 2)]);
        assert_eq!(
            to_pixels(&path, 32),
            vec![PixelPoint { x: 0, y: 0 }, PixelPoint { x: 32, y: 64 }]
        );
    }

    #[test]
    fn truncate_keeps_max_steps_plus_one_cells() {
        let path = cells(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        let capped = truncate(path.clone(), 2);
        assert_eq!(capped, cells(&[(0, 0), (1, 0), (2, 0)]));

        // Shorter paths pass through untouched.
        assert_eq!(truncate(path.clone(), 10), path);
    }
}
