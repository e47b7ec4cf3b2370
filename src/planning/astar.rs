//! A* search implementation.

use super::types::{CellRecord, FrontierNode, PlannerError, Route};
use crate::config::PlannerConfig;
use crate::core::GridCoord;
use crate::grid::OccupancyGrid;
use log::{debug, trace};
use std::collections::BinaryHeap;

/// A* planner over the binary occupancy grid.
///
/// 4-connected expansion with uniform step cost 1.0 and a Euclidean heuristic
/// (admissible for axis-aligned unit moves, so closed cells are never
/// re-opened). The search halts the moment the destination is generated as a
/// neighbor.
pub struct RoutePlanner {
    config: PlannerConfig,
}

impl RoutePlanner {
    /// Create a planner with the given limits
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Find the shortest route from `source` to `destination`.
    pub fn search(
        &self,
        grid: &OccupancyGrid,
        source: GridCoord,
        destination: GridCoord,
    ) -> Result<Route, PlannerError> {
        trace!("search: source={} destination={}", source, destination);

        if !grid.is_valid(source) {
            return Err(PlannerError::InvalidCoordinate(source));
        }
        if !grid.is_valid(destination) {
            return Err(PlannerError::InvalidCoordinate(destination));
        }
        if grid.is_occupied(source) {
            return Err(PlannerError::BlockedCell(source));
        }
        if grid.is_occupied(destination) {
            return Err(PlannerError::BlockedCell(destination));
        }
        if source == destination {
            return Err(PlannerError::AlreadyAtDestination);
        }

        let cols = grid.cols();
        let index = |c: GridCoord| c.x as usize * cols + c.y as usize;

        let mut cells = vec![CellRecord::undiscovered(); grid.cell_count()];
        let mut closed = vec![false; grid.cell_count()];

        // The source is its own parent: the sentinel that ends reconstruction.
        cells[index(source)] = CellRecord {
            parent: source,
            g: 0.0,
            h: 0.0,
            f: 0.0,
        };

        let mut frontier = BinaryHeap::new();
        let mut seq: u64 = 0;
        frontier.push(FrontierNode {
            coord: source,
            f: 0.0,
            seq,
        });

        let mut expanded = 0;

        while let Some(node) = frontier.pop() {
            let current = node.coord;
            let current_idx = index(current);

            // Stale heap entries for already-closed cells are skipped, so
            // every cell is expanded at most once.
            if closed[current_idx] {
                continue;
            }
            closed[current_idx] = true;

            expanded += 1;
            if expanded > self.config.max_expansions {
                debug!("Search budget of {} expansions exhausted", self.config.max_expansions);
                return Err(PlannerError::SearchBudgetExceeded { expanded });
            }

            for neighbor in current.neighbors_4() {
                if !grid.is_valid(neighbor) || grid.is_occupied(neighbor) {
                    continue;
                }
                let neighbor_idx = index(neighbor);
                if closed[neighbor_idx] {
                    continue;
                }

                if neighbor == destination {
                    // Destination generated: fix its parent and stop.
                    let g = cells[current_idx].g + 1.0;
                    cells[neighbor_idx].parent = current;
                    cells[neighbor_idx].g = g;
                    debug!("Destination {} reached, cost {:.0}", destination, g);
                    return Ok(self.reconstruct(&cells, &index, source, destination, g, expanded));
                }

                let g_new = cells[current_idx].g + 1.0;
                let h_new = neighbor.euclidean_distance(&destination);
                let f_new = g_new + h_new;

                let record = &mut cells[neighbor_idx];
                if record.is_undiscovered() || f_new < record.f {
                    record.parent = current;
                    record.g = g_new;
                    record.h = h_new;
                    record.f = f_new;

                    seq += 1;
                    frontier.push(FrontierNode {
                        coord: neighbor,
                        f: f_new,
                        seq,
                    });
                }
            }
        }

        debug!("Frontier exhausted after {} expansions, no path", expanded);
        Err(PlannerError::NoPathFound)
    }

    /// Walk parent links backward from the destination to the self-parented
    /// source, then reverse into forward order.
    fn reconstruct(
        &self,
        cells: &[CellRecord],
        index: &dyn Fn(GridCoord) -> usize,
        source: GridCoord,
        destination: GridCoord,
        cost: f64,
        nodes_expanded: usize,
    ) -> Route {
        let mut path = Vec::new();
        let mut current = destination;

        // The source is its own parent; that self-reference ends the walk.
        loop {
            path.push(current);
            let parent = cells[index(current)].parent;
            if parent == current {
                break;
            }
            current = parent;
        }
        debug_assert_eq!(current, source);
        path.reverse();

        Route {
            cells: path,
            cost,
            nodes_expanded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;

    fn planner() -> RoutePlanner {
        RoutePlanner::new(PlannerConfig::default())
    }

    fn coord(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    fn assert_route_valid(route: &Route, source: GridCoord, destination: GridCoord) {
        assert_eq!(*route.cells.first().unwrap(), source);
        assert_eq!(*route.cells.last().unwrap(), destination);
        for pair in route.cells.windows(2) {
            assert!(
                pair[0].is_unit_adjacent(&pair[1]),
                "{} -> {} is not a unit step",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_straight_route() {
        let grid = OccupancyGrid::new(40, 40);
        let route = planner().search(&grid, coord(0, 0), coord(3, 0)).unwrap();

        assert_eq!(
            route.cells,
            vec![coord(0, 0), coord(1, 0), coord(2, 0), coord(3, 0)]
        );
        assert_eq!(route.cost, 3.0);
    }

    #[test]
    fn test_source_out_of_bounds() {
        let grid = OccupancyGrid::new(40, 40);
        assert_eq!(
            planner().search(&grid, coord(-1, 0), coord(3, 0)),
            Err(PlannerError::InvalidCoordinate(coord(-1, 0)))
        );
    }

    #[test]
    fn test_destination_out_of_bounds() {
        let grid = OccupancyGrid::new(40, 40);
        assert_eq!(
            planner().search(&grid, coord(0, 0), coord(40, 0)),
            Err(PlannerError::InvalidCoordinate(coord(40, 0)))
        );
    }

    #[test]
    fn test_blocked_destination() {
        let mut grid = OccupancyGrid::new(40, 40);
        grid.mark_occupied(coord(3, 0));
        assert_eq!(
            planner().search(&grid, coord(0, 0), coord(3, 0)),
            Err(PlannerError::BlockedCell(coord(3, 0)))
        );
    }

    #[test]
    fn test_blocked_source() {
        let mut grid = OccupancyGrid::new(40, 40);
        grid.mark_occupied(coord(0, 0));
        assert_eq!(
            planner().search(&grid, coord(0, 0), coord(3, 0)),
            Err(PlannerError::BlockedCell(coord(0, 0)))
        );
    }

    #[test]
    fn test_already_at_destination() {
        let grid = OccupancyGrid::new(40, 40);
        assert_eq!(
            planner().search(&grid, coord(5, 5), coord(5, 5)),
            Err(PlannerError::AlreadyAtDestination)
        );
    }

    #[test]
    fn test_no_path_through_full_wall() {
        let mut grid = OccupancyGrid::new(5, 5);
        for x in 0..5 {
            grid.mark_occupied(coord(x, 2));
        }
        assert_eq!(
            planner().search(&grid, coord(2, 0), coord(2, 4)),
            Err(PlannerError::NoPathFound)
        );
    }

    #[test]
    fn test_detour_around_wall() {
        // Wall across y=3 with a single opening at x=6.
        let mut grid = OccupancyGrid::new(7, 7);
        for x in 0..6 {
            grid.mark_occupied(coord(x, 3));
        }

        let source = coord(3, 0);
        let destination = coord(3, 6);
        let route = planner().search(&grid, source, destination).unwrap();

        assert_route_valid(&route, source, destination);
        // 6 lateral steps plus 3 cells down to the opening and 3 back.
        assert_eq!(route.cost, 12.0);
    }

    #[test]
    fn test_adjacent_destination() {
        let grid = OccupancyGrid::new(40, 40);
        let route = planner().search(&grid, coord(0, 0), coord(0, 1)).unwrap();
        assert_eq!(route.cells, vec![coord(0, 0), coord(0, 1)]);
        assert_eq!(route.cost, 1.0);
    }

    #[test]
    fn test_search_budget_exceeded() {
        let grid = OccupancyGrid::new(40, 40);
        let tight = RoutePlanner::new(PlannerConfig { max_expansions: 3 });
        match tight.search(&grid, coord(0, 0), coord(39, 39)) {
            Err(PlannerError::SearchBudgetExceeded { expanded }) => assert!(expanded > 3),
            other => panic!("expected budget exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_route_cost_matches_edges() {
        let grid = OccupancyGrid::new(40, 40);
        let route = planner().search(&grid, coord(0, 0), coord(5, 7)).unwrap();
        assert_route_valid(&route, coord(0, 0), coord(5, 7));
        assert_eq!(route.cost, route.edge_count() as f64);
        assert_eq!(route.cost, 12.0);
    }
}
