//! Core maze generation and solvability validation for the escape-room game
//!
//! This crate provides the maze that every game mode is built on: a
//! perfect maze carved by randomized backtracking, overlaid with a
//! door/lever mechanism layer that is guaranteed solvable by
//! construction. The explorer spawns at (1,1) knowing nothing; every
//! lever is reachable without opening a single door, and the exit is
//! reachable only once the doors are open. The generator validates
//! both properties (and their converses) before returning a maze.
//!
//! Two layers, the second built strictly on the first:
//! - `pathfinding`: BFS reachability queries over the tile grid,
//!   parameterized by whether door tiles count as passable
//! - `maze_gen`: carving, mechanism placement with rollback, bounded
//!   retry and a mechanism-free fallback
//!
//! Rendering, door-toggle eventing and state sync between the two
//! player roles live in the game client; they consume `MazeData` as
//! JSON and call the pathfinding primitives for move legality.

pub mod maze_gen;
pub mod pathfinding;
pub mod rng;

// Re-export the generation entry point and commonly used types
pub use maze_gen::{generate, MazeGenerator};
pub use rng::SimpleLCG;

use serde::{Deserialize, Serialize};

/// Number of doors the generator aims to place in total
pub const DEFAULT_DOOR_COUNT: usize = 5;

/// Number of levers the generator places
///
/// Must be at least the door count: levers are linked to doors
/// one-to-one in placement order, and every door needs an opener.
pub const DEFAULT_LEVER_COUNT: usize = 5;

/// Minimum number of doors that must sit on the spawn-to-exit critical path
///
/// Below this the exit cannot be reliably gated and the attempt is
/// discarded.
pub const MIN_CRITICAL_DOORS: usize = 3;

/// Maximum number of independent generation attempts before the
/// mechanism-free fallback maze is returned
pub const MAX_GENERATION_ATTEMPTS: usize = 100;

/// Smallest usable grid side
///
/// Spawn is fixed at (1,1), so anything narrower has no interior at all.
pub const MIN_GRID_SIZE: usize = 3;

/// A single tile in the maze grid
///
/// `Door` is a static code during generation: the tile is treated as
/// non-passable unless a reachability query explicitly opens doors.
/// Once gameplay starts, passability follows the `Door` entity's open
/// flag instead, owned by the client's mechanism manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    Wall,
    Floor,
    Door,
    Lever,
    Exit,
}

/// Integer grid coordinates with value equality
///
/// Hashable, so positions key `HashSet`/`HashMap` directly in the
/// reachability queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: usize,
    pub y: usize,
}

impl GridPosition {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position
    pub fn manhattan_distance(&self, other: GridPosition) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// A node cell sits at odd/odd coordinates: a "room" in the maze
    /// graph, and the only legal lever site.
    pub fn is_node_cell(&self) -> bool {
        self.x % 2 == 1 && self.y % 2 == 1
    }

    /// A passage cell has exactly one odd coordinate: a corridor
    /// segment between two adjacent node cells, and the only legal
    /// door site.
    pub fn is_passage_cell(&self) -> bool {
        (self.x % 2 == 1) != (self.y % 2 == 1)
    }
}

/// Rectangular tile matrix with odd width and height
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid filled with a single tile
    pub fn new(width: usize, height: usize, fill: Tile) -> Self {
        Self {
            tiles: vec![vec![fill; width]; height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: GridPosition) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Read a tile. The position must be in bounds; the pathfinding
    /// layer bounds-checks before calling.
    pub fn tile(&self, pos: GridPosition) -> Tile {
        self.tiles[pos.y][pos.x]
    }

    pub fn set_tile(&mut self, pos: GridPosition, tile: Tile) {
        self.tiles[pos.y][pos.x] = tile;
    }

    /// Whether a tile can be stepped on under the given door policy
    ///
    /// Walls never pass, doors pass only when `doors_open`, everything
    /// else always passes. Out-of-bounds positions are not walkable.
    pub fn is_walkable(&self, pos: GridPosition, doors_open: bool) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        match self.tiles[pos.y][pos.x] {
            Tile::Wall => false,
            Tile::Door => doors_open,
            Tile::Floor | Tile::Lever | Tile::Exit => true,
        }
    }
}

/// A door blocking a passage cell until opened by its linked lever
///
/// Doors are created closed. The generator only establishes topology
/// and linkage; toggling is owned by the game client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub id: usize,
    pub position: GridPosition,
    pub open: bool,
}

/// A lever on a node cell, opening the doors it is linked to
///
/// Levers beyond the door count stay unlinked: they are placed for
/// exploration value but open nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lever {
    pub id: usize,
    pub position: GridPosition,
    pub active: bool,
    pub linked_door_ids: Vec<usize>,
}

/// A fully generated and validated maze
///
/// The sole generator output, consumed by the game client as JSON.
/// Topology is immutable once produced; only door/lever state changes
/// during play.
///
/// Guaranteed invariants:
/// - every lever is reachable from spawn with all doors closed
/// - the exit is reachable from spawn with all doors open
/// - if any door exists, the exit is NOT reachable with doors closed
/// - every door is linked from at least one lever
/// - lever count >= door count whenever any door exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeData {
    pub grid: Grid,
    pub spawn: GridPosition,
    pub exit: GridPosition,
    pub doors: Vec<Door>,
    pub levers: Vec<Lever>,
    pub width: usize,
    pub height: usize,
}

/// Generator tunables
///
/// The defaults are the shipped game balance; embedders may override
/// them per game mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Total doors to place (critical path + side passages)
    pub door_count: usize,
    /// Levers to place; must cover the door count
    pub lever_count: usize,
    /// Doors required on the spawn-to-exit critical path
    pub min_critical_doors: usize,
    /// Generation attempts before falling back to a mechanism-free maze
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            door_count: DEFAULT_DOOR_COUNT,
            lever_count: DEFAULT_LEVER_COUNT,
            min_critical_doors: MIN_CRITICAL_DOORS,
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        // Lever/door linking is one-to-one in placement order, so the
        // default lever count must cover the default door count.
        assert!(DEFAULT_LEVER_COUNT >= DEFAULT_DOOR_COUNT);
        assert!(MIN_CRITICAL_DOORS <= DEFAULT_DOOR_COUNT);
    }

    #[test]
    fn test_cell_parity() {
        assert!(GridPosition::new(1, 1).is_node_cell());
        assert!(GridPosition::new(3, 5).is_node_cell());
        assert!(!GridPosition::new(2, 1).is_node_cell());

        assert!(GridPosition::new(2, 1).is_passage_cell());
        assert!(GridPosition::new(1, 2).is_passage_cell());
        assert!(!GridPosition::new(1, 1).is_passage_cell());
        assert!(!GridPosition::new(2, 2).is_passage_cell());
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridPosition::new(1, 1);
        let b = GridPosition::new(4, 3);
        assert_eq!(a.manhattan_distance(b), 5);
        assert_eq!(b.manhattan_distance(a), 5);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_grid_bounds_and_tiles() {
        let mut grid = Grid::new(5, 3, Tile::Wall);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);

        let pos = GridPosition::new(2, 1);
        assert!(grid.in_bounds(pos));
        assert!(!grid.in_bounds(GridPosition::new(5, 1)));
        assert!(!grid.in_bounds(GridPosition::new(2, 3)));

        assert_eq!(grid.tile(pos), Tile::Wall);
        grid.set_tile(pos, Tile::Floor);
        assert_eq!(grid.tile(pos), Tile::Floor);
    }

    #[test]
    fn test_walkability_door_policy() {
        let mut grid = Grid::new(3, 3, Tile::Wall);
        let door = GridPosition::new(1, 1);
        grid.set_tile(door, Tile::Door);

        assert!(!grid.is_walkable(door, false));
        assert!(grid.is_walkable(door, true));

        grid.set_tile(door, Tile::Lever);
        assert!(grid.is_walkable(door, false));

        // Out of bounds is never walkable
        assert!(!grid.is_walkable(GridPosition::new(9, 9), true));
    }

    #[test]
    fn test_tile_serde_names() {
        let json = serde_json::to_string(&Tile::Door).unwrap();
        assert_eq!(json, "\"door\"");

        let tile: Tile = serde_json::from_str("\"lever\"").unwrap();
        assert_eq!(tile, Tile::Lever);
    }
}
