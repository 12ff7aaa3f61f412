//! Maze generation with door/lever mechanism placement
//!
//! Algorithm, per attempt:
//! 1. Carve a perfect maze with the randomized backtracker (DFS with an
//!    explicit stack): every node cell is visited exactly once, so the
//!    passage graph is a spanning tree with exactly one simple route
//!    between any two rooms.
//! 2. Fix spawn at (1,1) and the exit at (width-2, height-2).
//! 3. Place levers on spawn-reachable node cells, then doors on
//!    passage cells: first on the spawn-to-exit critical path (these
//!    are the gates that make the puzzle), then on side passages.
//!    Every door is placed tentatively and rolled back if it would cut
//!    off a lever.
//! 4. Re-validate the finished maze and hand it back.
//!
//! Any step that comes up short discards the whole attempt; the
//! top-level loop retries with fresh randomness up to a fixed bound,
//! and past that bound degrades to a mechanism-free maze rather than
//! failing the caller.

use std::collections::HashSet;

use crate::pathfinding::{find_path, path_exists, reachable_positions};
use crate::rng::SimpleLCG;
use crate::{Door, GeneratorConfig, Grid, GridPosition, Lever, MazeData, Tile, MIN_GRID_SIZE};

// Carving directions: two cells per step, landing on the next node cell.
const CARVE_DX: [i32; 4] = [0, 0, -2, 2];
const CARVE_DY: [i32; 4] = [-2, 2, 0, 0];

// Door candidates this close to spawn or exit (Manhattan) are skipped:
// a gate on the doorstep blocks nothing worth exploring for.
const ENDPOINT_CLEARANCE: usize = 2;

/// Generate a maze with the default configuration
///
/// The entry point game modes call. Deterministic for a given seed,
/// and infallible: when no valid mechanism layout is found within the
/// attempt budget the maze comes back without doors or levers.
pub fn generate(width: usize, height: usize, seed: u32) -> MazeData {
    MazeGenerator::new(GeneratorConfig::default()).generate(width, height, seed)
}

/// Maze generator with explicit tunables
pub struct MazeGenerator {
    config: GeneratorConfig,
}

impl MazeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate a maze, retrying internally until a valid mechanism
    /// layout is found or the attempt budget runs out
    ///
    /// Dimensions are normalized to odd values (even inputs are
    /// incremented) so node cells at odd/odd coordinates and passage
    /// cells between them alternate cleanly.
    pub fn generate(&self, width: usize, height: usize, seed: u32) -> MazeData {
        let (width, height) = normalize_dimensions(width, height);
        let mut rng = SimpleLCG::new(seed);

        for attempt in 1..=self.config.max_attempts {
            if let Some(maze) = self.try_generate(width, height, &mut rng) {
                tracing::info!(
                    "Maze generated on attempt {}/{} ({}x{}, {} doors, {} levers)",
                    attempt,
                    self.config.max_attempts,
                    width,
                    height,
                    maze.doors.len(),
                    maze.levers.len()
                );
                return maze;
            }
        }

        // Degrade rather than fail: the maze stays trivially solvable,
        // it just loses the locked-door puzzle.
        tracing::warn!(
            "All {} generation attempts failed for {}x{}, falling back to a mechanism-free maze",
            self.config.max_attempts,
            width,
            height
        );
        fallback_maze(width, height, &mut rng)
    }

    /// One fully independent generation attempt
    fn try_generate(&self, width: usize, height: usize, rng: &mut SimpleLCG) -> Option<MazeData> {
        let mut grid = Grid::new(width, height, Tile::Wall);
        carve_maze(&mut grid, rng);

        let spawn = GridPosition::new(1, 1);
        let exit = GridPosition::new(width - 2, height - 2);
        grid.set_tile(spawn, Tile::Floor);
        grid.set_tile(exit, Tile::Exit);

        // The carve visits every node cell, so this only trips on
        // degenerate dimensions.
        if !path_exists(&grid, spawn, exit, true) {
            return None;
        }

        let (doors, levers) = self.place_mechanisms(&mut grid, spawn, exit, rng)?;

        if !validate_maze(&grid, spawn, exit, &doors, &levers) {
            return None;
        }

        Some(MazeData {
            grid,
            spawn,
            exit,
            doors,
            levers,
            width,
            height,
        })
    }

    /// Place levers and doors so the asymmetric puzzle holds: every
    /// lever stays reachable behind closed doors, and the exit does not
    ///
    /// Returns `None` when the carved maze cannot host a valid layout
    /// (too few gate-able passages on the critical path, too few
    /// reachable lever sites, or door placement ran dry).
    fn place_mechanisms(
        &self,
        grid: &mut Grid,
        spawn: GridPosition,
        exit: GridPosition,
        rng: &mut SimpleLCG,
    ) -> Option<(Vec<Door>, Vec<Lever>)> {
        // The critical path is the only spawn-to-exit route in a
        // perfect maze; its passage cells are the only candidates that
        // can truly gate progress.
        let critical_path = find_path(grid, spawn, exit, true)?;
        let on_critical: HashSet<GridPosition> = critical_path.iter().copied().collect();

        let mut critical_cells: Vec<GridPosition> = critical_path
            .iter()
            .copied()
            .filter(|pos| pos.is_passage_cell())
            .filter(|pos| {
                pos.manhattan_distance(spawn) > ENDPOINT_CLEARANCE
                    && pos.manhattan_distance(exit) > ENDPOINT_CLEARANCE
            })
            .collect();

        if critical_cells.len() < self.config.min_critical_doors {
            return None;
        }

        // Side passages host the doors beyond the critical minimum.
        let mut side_cells: Vec<GridPosition> = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = GridPosition::new(x, y);
                if pos.is_passage_cell()
                    && grid.tile(pos) == Tile::Floor
                    && !on_critical.contains(&pos)
                {
                    side_cells.push(pos);
                }
            }
        }

        // Lever sites: node cells other than spawn and exit...
        let mut lever_sites: Vec<GridPosition> = Vec::new();
        for y in (1..grid.height()).step_by(2) {
            for x in (1..grid.width()).step_by(2) {
                let pos = GridPosition::new(x, y);
                if pos != spawn && pos != exit {
                    lever_sites.push(pos);
                }
            }
        }
        if lever_sites.len() < self.config.lever_count {
            return None;
        }

        // ...restricted to what the explorer can reach before any door
        // opens. A lever locked behind another door is undiscoverable.
        let reachable = reachable_positions(grid, spawn, false);
        lever_sites.retain(|pos| reachable.contains(pos));
        if lever_sites.len() < self.config.lever_count {
            return None;
        }

        rng.shuffle(&mut lever_sites);
        let mut levers: Vec<Lever> = lever_sites[..self.config.lever_count]
            .iter()
            .enumerate()
            .map(|(id, &position)| {
                grid.set_tile(position, Tile::Lever);
                Lever {
                    id,
                    position,
                    active: false,
                    linked_door_ids: Vec::new(),
                }
            })
            .collect();

        let mut doors: Vec<Door> = Vec::new();

        // Gate the critical path first. Each door is committed only if
        // every lever is still reachable with all doors closed.
        rng.shuffle(&mut critical_cells);
        let mut critical_placed = 0;
        for &cell in &critical_cells {
            if critical_placed >= self.config.min_critical_doors
                || doors.len() >= self.config.door_count
            {
                break;
            }
            if try_place_door(grid, cell, spawn, &levers) {
                doors.push(Door {
                    id: doors.len(),
                    position: cell,
                    open: false,
                });
                critical_placed += 1;
            }
        }
        if critical_placed < self.config.min_critical_doors {
            return None;
        }

        // Top up with side-passage doors. Running out of candidates
        // here is fine; the exit is already gated.
        rng.shuffle(&mut side_cells);
        for &cell in &side_cells {
            if doors.len() >= self.config.door_count {
                break;
            }
            if try_place_door(grid, cell, spawn, &levers) {
                doors.push(Door {
                    id: doors.len(),
                    position: cell,
                    open: false,
                });
            }
        }

        // One lever per door, paired in placement order. Surplus
        // levers stay unlinked.
        for (lever, door) in levers.iter_mut().zip(doors.iter()) {
            lever.linked_door_ids.push(door.id);
        }

        // Doors were only carved on connected passages, so this should
        // always hold; re-verified anyway before the layout is trusted.
        if !path_exists(grid, spawn, exit, true) {
            return None;
        }

        Some((doors, levers))
    }
}

/// Tentatively turn a passage cell into a door, keeping it only if
/// every lever stays reachable from spawn with all doors closed
fn try_place_door(
    grid: &mut Grid,
    cell: GridPosition,
    spawn: GridPosition,
    levers: &[Lever],
) -> bool {
    let previous = grid.tile(cell);
    grid.set_tile(cell, Tile::Door);

    let all_levers_reachable = levers
        .iter()
        .all(|lever| path_exists(grid, spawn, lever.position, false));

    if !all_levers_reachable {
        grid.set_tile(cell, previous);
    }
    all_levers_reachable
}

/// Carve a perfect maze with the randomized backtracker
///
/// At each visited node cell, pick a random unvisited node neighbor
/// two cells away, open the passage cell between them, and continue
/// from the neighbor; backtrack when no unvisited neighbor remains.
/// Visits every node cell, producing a spanning tree of passages.
fn carve_maze(grid: &mut Grid, rng: &mut SimpleLCG) {
    let start = GridPosition::new(1, 1);
    grid.set_tile(start, Tile::Floor);

    let mut stack: Vec<GridPosition> = vec![start];

    while let Some(&current) = stack.last() {
        let mut candidates: Vec<(GridPosition, GridPosition)> = Vec::new();
        for dir in 0..4 {
            let nx = current.x as i32 + CARVE_DX[dir];
            let ny = current.y as i32 + CARVE_DY[dir];
            if nx < 1 || ny < 1 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if nx > grid.width() - 2 || ny > grid.height() - 2 {
                continue;
            }
            let node = GridPosition::new(nx, ny);
            if grid.tile(node) != Tile::Wall {
                continue; // already visited
            }
            let passage = GridPosition::new((current.x + nx) / 2, (current.y + ny) / 2);
            candidates.push((passage, node));
        }

        if candidates.is_empty() {
            stack.pop();
        } else {
            let (passage, node) = candidates[rng.choice_index(candidates.len())];
            grid.set_tile(passage, Tile::Floor);
            grid.set_tile(node, Tile::Floor);
            stack.push(node);
        }
    }
}

/// Carve a fresh maze with no mechanisms at all
///
/// The degraded result after the attempt budget is exhausted: always
/// trivially solvable, never an error.
fn fallback_maze(width: usize, height: usize, rng: &mut SimpleLCG) -> MazeData {
    let mut grid = Grid::new(width, height, Tile::Wall);
    carve_maze(&mut grid, rng);

    let spawn = GridPosition::new(1, 1);
    let exit = GridPosition::new(width - 2, height - 2);
    grid.set_tile(spawn, Tile::Floor);
    grid.set_tile(exit, Tile::Exit);

    MazeData {
        grid,
        spawn,
        exit,
        doors: Vec::new(),
        levers: Vec::new(),
        width,
        height,
    }
}

/// Re-check every puzzle invariant on the assembled maze
///
/// Placement already enforces these one by one; this is the last gate
/// before a layout is trusted, so a violation fails the attempt.
fn validate_maze(
    grid: &Grid,
    spawn: GridPosition,
    exit: GridPosition,
    doors: &[Door],
    levers: &[Lever],
) -> bool {
    // Every lever must be discoverable behind closed doors
    for lever in levers {
        if !path_exists(grid, spawn, lever.position, false) {
            return false;
        }
    }

    // The exit must be reachable once every door opens
    if !path_exists(grid, spawn, exit, true) {
        return false;
    }

    if !doors.is_empty() {
        // Enough levers to open every door
        if levers.len() < doors.len() {
            return false;
        }

        // At least one door must truly gate the exit, otherwise the
        // puzzle is pointless
        if path_exists(grid, spawn, exit, false) {
            return false;
        }

        // Every door needs a lever that opens it
        for door in doors {
            let covered = levers
                .iter()
                .any(|lever| lever.linked_door_ids.contains(&door.id));
            if !covered {
                return false;
            }
        }
    }

    true
}

/// Force both dimensions odd (even inputs are incremented) and no
/// smaller than the minimum playable size
fn normalize_dimensions(width: usize, height: usize) -> (usize, usize) {
    let width = if width % 2 == 0 { width + 1 } else { width };
    let height = if height % 2 == 0 { height + 1 } else { height };
    (width.max(MIN_GRID_SIZE), height.max(MIN_GRID_SIZE))
}
