//! Shared mutable record of the current map and the bot's grid position.

use std::sync::Arc;

use nav::{BarrierSet, GridCell};

use crate::event::MapUpdate;

/// Immutable snapshot of one map, replaced wholesale when a new map arrives.
#[derive(Clone, Debug)]
pub struct MapInfo {
    pub map_id: String,
    pub barriers: BarrierSet,
    pub terminals: Vec<GridCell>,
    pub spawn_point: GridCell,
    pub grid_size: i32,
    pub cell_size: i32,
}

impl From<MapUpdate> for MapInfo {
    fn from(update: MapUpdate) -> Self {
        Self {
            map_id: update.map_id,
            barriers: BarrierSet::from_coords(update.barriers),
            terminals: update.terminals,
            spawn_point: update.spawn_point,
            grid_size: update.grid_size,
            cell_size: update.cell_size,
        }
    }
}

/// Per-agent world record. Exactly one instance lives for the agent's
/// lifetime; tasks read and commit through short synchronous critical
/// sections, never across a suspension point.
#[derive(Debug, Default)]
pub struct WorldState {
    map: Option<Arc<MapInfo>>,
    position: GridCell,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the map and resets the position to its spawn point.
    pub fn apply_map(&mut self, map: MapInfo) {
        self.position = map.spawn_point;
        self.map = Some(Arc::new(map));
    }

    pub fn map(&self) -> Option<Arc<MapInfo>> {
        self.map.clone()
    }

    pub fn position(&self) -> GridCell {
        self.position
    }

    /// Records the endpoint of a completed walk.
    pub fn commit_position(&mut self, cell: GridCell) {
        self.position = cell;
    }
}
