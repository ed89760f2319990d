//! The A* search loop.
//!
//! There is no closed set. A cell is relaxed only when a strictly cheaper
//! `g` is found, and a popped entry whose key no longer equals the cell's live
//! `g + h` is discarded as stale. With unit edge costs and the consistent
//! Manhattan heuristic this expands every cell at most once, at its true
//! distance from the start.

use gridstar_core::Coord;

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::heuristic::manhattan;
use crate::observer::{NoopObserver, SearchObserver};
use crate::path::{self, Path};

/// Where a [`SearchEngine`] is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// No search has been started, or the last one was rejected up front.
    #[default]
    Idle,
    /// Inside [`SearchEngine::run`].
    Running,
    /// The goal was popped; its predecessor chain is a shortest path.
    Found,
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// The expansion budget ran out first.
    Aborted,
}

impl SearchState {
    /// Whether the state ends a run.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted | Self::Aborted)
    }
}

/// Counters collected during one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier insertions, the initial push included.
    pub pushed: usize,
    /// Frontier removals.
    pub popped: usize,
    /// Cells whose neighbours were examined.
    pub expanded: usize,
    /// Popped entries discarded because the cell had since improved.
    pub stale_skipped: usize,
}

/// Single-source, single-target A* over a [`Grid`].
///
/// The engine keeps its frontier between runs so repeated searches reuse the
/// heap allocation. Search state lives on the grid's cells; one engine may
/// serve many grids, but a grid must not be searched by two runs at once.
#[derive(Debug, Default)]
pub struct SearchEngine {
    config: SearchConfig,
    frontier: Frontier,
    state: SearchState,
    stats: SearchStats,
    goal: Option<Coord>,
    // Grid epoch observed when the last run terminated.
    epoch: u64,
}

impl SearchEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The engine configuration.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// State reached by the last call to [`run`](Self::run).
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Counters from the last run.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `grid` from `start` to `end` and return the terminal state.
    ///
    /// The grid's search state is reset first. Both endpoints must be
    /// in-bounds passable cells, otherwise [`Error::InvalidEndpoint`] is
    /// returned and the engine stays [`Idle`](SearchState::Idle).
    pub fn run<O: SearchObserver>(
        &mut self,
        grid: &mut Grid,
        start: Coord,
        end: Coord,
        observer: &mut O,
    ) -> Result<SearchState> {
        let start_idx = endpoint(grid, start)?;
        let goal_idx = endpoint(grid, end)?;

        self.state = SearchState::Running;
        self.stats = SearchStats::default();
        self.goal = Some(end);
        self.frontier.clear();
        grid.reset_search_state();

        log::debug!("search {start} -> {end} on {} grid", grid.dims());

        {
            let cell = grid.at_mut(start_idx);
            cell.g = 0;
            cell.h = manhattan(start, end);
        }
        self.frontier.push(grid.at(start_idx));
        self.stats.pushed += 1;

        let state = loop {
            let Some(entry) = self.frontier.pop_min() else {
                break SearchState::Exhausted;
            };
            self.stats.popped += 1;

            let ci = grid.index(entry.coord())?;
            let current = grid.at(ci);

            if entry.key() != current.f() {
                self.stats.stale_skipped += 1;
                log::trace!(
                    "skip stale {} (key {}, live {})",
                    entry.coord(),
                    entry.key(),
                    current.f()
                );
                continue;
            }

            if ci == goal_idx {
                break SearchState::Found;
            }

            if let Some(limit) = self.config.max_expansions {
                if self.stats.expanded >= limit {
                    break SearchState::Aborted;
                }
            }

            self.stats.expanded += 1;
            observer.on_expand(current);
            log::trace!("expand {} g={} h={}", current.coord(), current.g(), current.h());

            let cp = current.coord();
            let tentative_g = current.g() + 1;

            for np in grid.neighbors_of(cp) {
                let ni = grid.index(np)?;
                let n = grid.at_mut(ni);
                if n.obstacle || tentative_g >= n.g {
                    continue;
                }
                n.g = tentative_g;
                n.h = manhattan(np, end);
                n.parent = Some(cp);
                self.frontier.push(n);
                self.stats.pushed += 1;
            }
        };

        self.state = state;
        self.epoch = grid.epoch();
        log::debug!(
            "search {start} -> {end} ended {state:?}: {} expanded, {} pushed, {} stale",
            self.stats.expanded,
            self.stats.pushed,
            self.stats.stale_skipped
        );
        Ok(state)
    }

    /// Produce the path found by the last run.
    ///
    /// Fails with [`Error::NoPath`] unless the last run ended in
    /// [`Found`](SearchState::Found) and `grid` has not been modified since.
    pub fn reconstruct<O: SearchObserver>(&self, grid: &Grid, observer: &mut O) -> Result<Path> {
        match (self.state, self.goal) {
            (SearchState::Found, Some(goal)) if grid.epoch() == self.epoch => {
                path::reconstruct(grid, goal, observer)
            }
            _ => Err(Error::NoPath),
        }
    }

    /// Run a search and reconstruct its path.
    ///
    /// An exhausted frontier becomes [`Error::Unreachable`] and a spent budget
    /// becomes [`Error::IterationLimit`].
    pub fn find_path(&mut self, grid: &mut Grid, start: Coord, end: Coord) -> Result<Path> {
        self.find_path_observed(grid, start, end, &mut NoopObserver)
    }

    /// Like [`find_path`](Self::find_path), reporting to `observer`.
    pub fn find_path_observed<O: SearchObserver>(
        &mut self,
        grid: &mut Grid,
        start: Coord,
        end: Coord,
        observer: &mut O,
    ) -> Result<Path> {
        match self.run(grid, start, end, observer)? {
            SearchState::Found => self.reconstruct(grid, observer),
            SearchState::Exhausted => Err(Error::Unreachable),
            SearchState::Aborted => Err(Error::IterationLimit {
                limit: self.config.max_expansions.unwrap_or(self.stats.expanded),
            }),
            SearchState::Idle | SearchState::Running => Err(Error::NoPath),
        }
    }
}

/// Search `grid` with the default configuration.
pub fn find_path(grid: &mut Grid, start: Coord, end: Coord) -> Result<Path> {
    SearchEngine::default().find_path(grid, start, end)
}

fn endpoint(grid: &Grid, c: Coord) -> Result<usize> {
    match grid.index(c) {
        Ok(i) if !grid.at(i).is_obstacle() => Ok(i),
        _ => Err(Error::InvalidEndpoint { coord: c }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::grid::{Cell, INFINITE_COST};
    use crate::observer::Recorder;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    /// Breadth-first distances from `from`, used as ground truth.
    fn bfs(grid: &Grid, from: Coord) -> Vec<i32> {
        let dims = grid.dims();
        let mut dist = vec![INFINITE_COST; grid.len()];
        let Some(si) = dims.index(from) else {
            return dist;
        };
        dist[si] = 0;
        let mut queue = VecDeque::from([from]);
        while let Some(p) = queue.pop_front() {
            let d = dist[dims.index(p).unwrap()];
            for n in grid.neighbors_of(p) {
                let ni = dims.index(n).unwrap();
                if grid.is_obstacle(n).unwrap() || dist[ni] != INFINITE_COST {
                    continue;
                }
                dist[ni] = d + 1;
                queue.push_back(n);
            }
        }
        dist
    }

    /// Records `(coord, g)` at expansion time.
    #[derive(Default)]
    struct CostProbe {
        expanded: Vec<(Coord, i32)>,
    }

    impl SearchObserver for CostProbe {
        fn on_expand(&mut self, cell: &Cell) {
            self.expanded.push((cell.coord(), cell.g()));
        }
    }

    #[test]
    fn open_grid_path_length_is_manhattan_plus_one() {
        let mut grid = Grid::new(5, 7).unwrap();
        let mut engine = SearchEngine::default();
        let cells: Vec<_> = grid.dims().iter().collect();
        for &from in &cells {
            for &to in &cells {
                let path = engine.find_path(&mut grid, from, to).unwrap();
                assert_eq!(path.len() as i32, manhattan(from, to) + 1);
                assert_eq!(path.start(), from);
                assert_eq!(path.end(), to);
                assert!(path.is_contiguous());
            }
        }
    }

    #[test]
    fn three_by_three_staircase() {
        let mut grid = Grid::new(3, 3).unwrap();
        let path = find_path(&mut grid, c(0, 0), c(2, 2)).unwrap();
        assert_eq!(path.len(), 5);
        assert!(path.is_contiguous());
        assert_eq!(path.cost(), 4);
        assert_eq!(
            grid.cell(c(2, 2)).unwrap().g() as usize,
            path.len() - 1
        );
    }

    #[test]
    fn tie_breaking_is_deterministic() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut engine = SearchEngine::default();
        let mut rec = Recorder::new();
        let path = engine
            .find_path_observed(&mut grid, c(0, 0), c(2, 2), &mut rec)
            .unwrap();
        // Right is explored before down and equal keys pop first-in first-out.
        assert_eq!(
            path.coords(),
            &[c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)]
        );
        assert_eq!(
            rec.expanded,
            vec![
                c(0, 0),
                c(0, 1),
                c(1, 0),
                c(0, 2),
                c(1, 1),
                c(2, 0),
                c(1, 2),
                c(2, 1),
            ]
        );
        assert_eq!(rec.path, path.coords().to_vec());
    }

    #[test]
    fn blocked_middle_column_is_unreachable() {
        let mut grid = Grid::with_obstacles(3, 3, [c(0, 1), c(1, 1), c(2, 1)]).unwrap();
        let mut engine = SearchEngine::default();
        let err = engine.find_path(&mut grid, c(0, 0), c(0, 2)).unwrap_err();
        assert_eq!(err, Error::Unreachable);
        assert_eq!(engine.state(), SearchState::Exhausted);
        // Only the left column is reachable.
        assert_eq!(engine.stats().expanded, 3);
    }

    #[test]
    fn enclosed_start_is_unreachable() {
        let ring = [
            c(1, 1),
            c(1, 2),
            c(1, 3),
            c(2, 1),
            c(2, 3),
            c(3, 1),
            c(3, 2),
            c(3, 3),
        ];
        let mut grid = Grid::with_obstacles(5, 5, ring).unwrap();
        let mut engine = SearchEngine::default();
        assert_eq!(
            engine.find_path(&mut grid, c(2, 2), c(0, 0)),
            Err(Error::Unreachable)
        );
        assert_eq!(engine.stats().expanded, 1);
        // Enclosed goal, seen from outside.
        assert_eq!(
            engine.find_path(&mut grid, c(4, 4), c(2, 2)),
            Err(Error::Unreachable)
        );
        assert_eq!(engine.stats().expanded, 16);
    }

    #[test]
    fn enclosed_start_on_minimal_grid() {
        let mut grid = Grid::with_obstacles(3, 3, [c(0, 1), c(1, 0), c(1, 2), c(2, 1)]).unwrap();
        assert_eq!(
            find_path(&mut grid, c(1, 1), c(2, 2)),
            Err(Error::Unreachable)
        );
    }

    #[test]
    fn start_equals_end() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut engine = SearchEngine::default();
        let mut rec = Recorder::new();
        let path = engine
            .find_path_observed(&mut grid, c(2, 1), c(2, 1), &mut rec)
            .unwrap();
        assert_eq!(path.coords(), &[c(2, 1)]);
        assert_eq!(engine.state(), SearchState::Found);
        let stats = engine.stats();
        assert_eq!(stats.pushed, 1);
        assert_eq!(stats.expanded, 0);
        assert!(rec.expanded.is_empty());
        assert_eq!(rec.path, vec![c(2, 1)]);
    }

    #[test]
    fn invalid_endpoints() {
        let mut grid = Grid::with_obstacles(3, 3, [c(1, 1)]).unwrap();
        let mut engine = SearchEngine::default();
        assert_eq!(
            engine.run(&mut grid, c(1, 1), c(0, 0), &mut NoopObserver),
            Err(Error::InvalidEndpoint { coord: c(1, 1) })
        );
        assert_eq!(
            engine.run(&mut grid, c(0, 0), c(3, 0), &mut NoopObserver),
            Err(Error::InvalidEndpoint { coord: c(3, 0) })
        );
        assert_eq!(
            engine.run(&mut grid, c(0, -1), c(0, 0), &mut NoopObserver),
            Err(Error::InvalidEndpoint { coord: c(0, -1) })
        );
        assert_eq!(engine.state(), SearchState::Idle);
    }

    #[test]
    fn reconstruct_requires_found() {
        let mut grid = Grid::with_obstacles(3, 3, [c(0, 1), c(1, 1), c(2, 1)]).unwrap();
        let mut engine = SearchEngine::default();
        assert_eq!(
            engine.reconstruct(&grid, &mut NoopObserver),
            Err(Error::NoPath)
        );
        let state = engine
            .run(&mut grid, c(0, 0), c(2, 2), &mut NoopObserver)
            .unwrap();
        assert_eq!(state, SearchState::Exhausted);
        assert_eq!(
            engine.reconstruct(&grid, &mut NoopObserver),
            Err(Error::NoPath)
        );
    }

    #[test]
    fn reconstruct_rejects_modified_grid() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut engine = SearchEngine::default();
        let state = engine
            .run(&mut grid, c(0, 0), c(2, 2), &mut NoopObserver)
            .unwrap();
        assert_eq!(state, SearchState::Found);
        assert!(engine.reconstruct(&grid, &mut NoopObserver).is_ok());

        grid.set_obstacle(c(1, 0), true).unwrap();
        assert_eq!(
            engine.reconstruct(&grid, &mut NoopObserver),
            Err(Error::NoPath)
        );
    }

    #[test]
    fn rerun_is_identical() {
        let obstacles = [c(1, 1), c(1, 2), c(1, 3), c(3, 0), c(3, 1), c(3, 3)];
        let mut grid = Grid::with_obstacles(5, 5, obstacles).unwrap();
        let mut engine = SearchEngine::default();
        let first = engine.find_path(&mut grid, c(0, 0), c(4, 4)).unwrap();
        let first_stats = engine.stats();

        grid.reset_search_state();
        let second = engine.find_path(&mut grid, c(0, 0), c(4, 4)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first_stats, engine.stats());

        // A fresh engine on a cloned grid agrees too.
        let mut other = grid.clone();
        let third = find_path(&mut other, c(0, 0), c(4, 4)).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn grid_is_reusable_after_obstacle_changes() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut engine = SearchEngine::default();
        assert_eq!(engine.find_path(&mut grid, c(0, 0), c(0, 2)).unwrap().len(), 3);

        grid.set_obstacle(c(0, 1), true).unwrap();
        let detour = engine.find_path(&mut grid, c(0, 0), c(0, 2)).unwrap();
        assert_eq!(detour.len(), 5);
        assert!(!detour.contains(c(0, 1)));

        grid.set_obstacle(c(1, 1), true).unwrap();
        grid.set_obstacle(c(2, 1), true).unwrap();
        assert_eq!(
            engine.find_path(&mut grid, c(0, 0), c(0, 2)),
            Err(Error::Unreachable)
        );

        grid.clear_obstacles();
        assert_eq!(engine.find_path(&mut grid, c(0, 0), c(0, 2)).unwrap().len(), 3);
    }

    #[test]
    fn engine_keeps_its_config() {
        let engine = SearchEngine::new(SearchConfig::new().with_max_expansions(7));
        assert_eq!(engine.config().max_expansions, Some(7));
        assert_eq!(SearchEngine::default().config(), &SearchConfig::default());
        assert_eq!(engine.state(), SearchState::Idle);
    }

    #[test]
    fn expansion_budget_aborts() {
        let mut grid = Grid::new(10, 10).unwrap();
        let mut engine = SearchEngine::new(SearchConfig::new().with_max_expansions(3));
        assert_eq!(
            engine.find_path(&mut grid, c(0, 0), c(9, 9)),
            Err(Error::IterationLimit { limit: 3 })
        );
        assert_eq!(engine.state(), SearchState::Aborted);
        assert_eq!(engine.stats().expanded, 3);
        assert_eq!(
            engine.reconstruct(&grid, &mut NoopObserver),
            Err(Error::NoPath)
        );
    }

    #[test]
    fn expansion_budget_large_enough_finds_path() {
        let mut grid = Grid::new(10, 10).unwrap();
        let mut engine = SearchEngine::new(SearchConfig::new().with_max_expansions(10_000));
        let path = engine.find_path(&mut grid, c(0, 0), c(9, 9)).unwrap();
        assert_eq!(path.len(), 19);
    }

    #[test]
    fn zero_budget_still_accepts_trivial_goal() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut engine = SearchEngine::new(SearchConfig::new().with_max_expansions(0));
        assert!(engine.find_path(&mut grid, c(1, 1), c(1, 1)).is_ok());
        assert_eq!(
            engine.find_path(&mut grid, c(0, 0), c(1, 1)),
            Err(Error::IterationLimit { limit: 0 })
        );
    }

    #[test]
    fn relaxed_costs_never_increase() {
        let obstacles = [c(0, 2), c(1, 2), c(2, 2), c(3, 2), c(2, 4), c(3, 4), c(4, 4)];
        let mut grid = Grid::with_obstacles(6, 6, obstacles).unwrap();
        let mut engine = SearchEngine::default();
        engine.find_path(&mut grid, c(0, 0), c(0, 5)).unwrap();
        for cell in grid.cells() {
            if cell.is_obstacle() {
                assert_eq!(cell.g(), INFINITE_COST);
                assert_eq!(cell.predecessor(), None);
            }
            if let Some(p) = cell.predecessor() {
                assert!(!grid.is_obstacle(p).unwrap());
                assert_eq!(grid.cell(p).unwrap().g() + 1, cell.g());
            }
        }
    }

    #[test]
    fn randomized_against_bfs() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        let mut engine = SearchEngine::default();
        for _ in 0..200 {
            let rows = rng.random_range(1..12);
            let cols = rng.random_range(1..12);
            let mut grid = Grid::new(rows, cols).unwrap();
            for p in grid.dims().iter().collect::<Vec<_>>() {
                if rng.random_bool(0.3) {
                    grid.set_obstacle(p, true).unwrap();
                }
            }
            let start = c(rng.random_range(0..rows), rng.random_range(0..cols));
            let end = c(rng.random_range(0..rows), rng.random_range(0..cols));
            grid.set_obstacle(start, false).unwrap();
            grid.set_obstacle(end, false).unwrap();

            let truth = bfs(&grid, start);
            let expected = truth[grid.dims().index(end).unwrap()];

            let mut probe = CostProbe::default();
            let result = engine.find_path_observed(&mut grid, start, end, &mut probe);
            let stats = engine.stats();

            match result {
                Ok(path) => {
                    assert_eq!(path.cost() as i32, expected);
                    assert_eq!(path.start(), start);
                    assert_eq!(path.end(), end);
                    assert!(path.is_contiguous());
                    assert!(path.iter().all(|&p| !grid.is_obstacle(p).unwrap()));
                    assert_eq!(stats.popped, stats.expanded + stats.stale_skipped + 1);
                }
                Err(err) => {
                    assert_eq!(err, Error::Unreachable);
                    assert_eq!(expected, INFINITE_COST);
                    assert_eq!(stats.popped, stats.expanded + stats.stale_skipped);
                }
            }

            // Every expansion happens at the cell's true distance, and no
            // cell is expanded twice.
            let mut seen = std::collections::HashSet::new();
            for &(p, g) in &probe.expanded {
                assert_eq!(g, truth[grid.dims().index(p).unwrap()]);
                assert!(seen.insert(p));
            }
        }
    }

    #[test]
    fn state_terminality() {
        assert!(!SearchState::Idle.is_terminal());
        assert!(!SearchState::Running.is_terminal());
        assert!(SearchState::Found.is_terminal());
        assert!(SearchState::Exhausted.is_terminal());
        assert!(SearchState::Aborted.is_terminal());
    }
}
