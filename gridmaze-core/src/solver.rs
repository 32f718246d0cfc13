use std::{collections::VecDeque, ops};

use hashbrown::HashSet;

use crate::{
    dims::Dims,
    grid::{Cell, Grid, MarkerError},
};

/// Sequence of adjacent cells from the start to the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Dims>);

impl Path {
    /// Number of cells, start and end included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Dims> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<Dims> {
        self.0.last().copied()
    }

    pub fn cells(&self) -> &[Dims] {
        &self.0
    }

    pub fn contains(&self, pos: Dims) -> bool {
        self.0.contains(&pos)
    }

    pub fn into_inner(self) -> Vec<Dims> {
        self.0
    }
}

impl ops::Deref for Path {
    type Target = [Dims];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Dims;
    type IntoIter = std::slice::Iter<'a, Dims>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Breadth-first solver over a finished grid.
///
/// Takes ownership of the grid and never changes it.
#[derive(Debug, Clone)]
pub struct Solver {
    grid: Grid,
    start: Dims,
    end: Dims,
}

impl Solver {
    /// Fails if the grid doesn't have exactly one start and one end.
    pub fn new(grid: Grid) -> Result<Self, MarkerError> {
        let (start, end) = grid.markers()?;
        Ok(Self { grid, start, end })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn end(&self) -> Dims {
        self.end
    }

    /// Shortest path from start to end, or `None` when the end can't be reached.
    ///
    /// Neighbours are expanded right, down, left, up, which picks the returned path when
    /// several shortest ones exist.
    pub fn solve(&self) -> Option<Path> {
        let mut queue = VecDeque::from([(self.start, vec![self.start])]);
        let mut visited = HashSet::new();
        visited.insert(self.start);

        while let Some((pos, path)) = queue.pop_front() {
            if pos == self.end {
                log::debug!("solved in {} steps, visited {} cells", path.len() - 1, visited.len());
                return Some(Path(path));
            }

            for next in self.grid.neighbors(pos) {
                if self.grid[next].is_passable() && visited.insert(next) {
                    let mut next_path = path.clone();
                    next_path.push(next);
                    queue.push_back((next, next_path));
                }
            }
        }

        log::debug!("no path, visited {} cells", visited.len());
        None
    }

    /// The grid in the text format with path cells drawn as `*`, start and end keep their tokens.
    pub fn render_solution(&self, path: &Path) -> String {
        let on_path = path.iter().copied().collect::<HashSet<_>>();
        let mut out = String::new();
        // writing into a String can't fail
        let _ = self.grid.write_with(&mut out, |pos, cell| match cell {
            Cell::Start | Cell::End => cell.to_char(),
            _ if on_path.contains(&pos) => PATH_CHAR,
            _ => cell.to_char(),
        });
        out
    }
}

/// Token marking a path cell in [`Solver::render_solution`].
pub const PATH_CHAR: char = '*';

/// Convenience for [`Solver::new`] followed by [`Solver::solve`].
pub fn solve(grid: Grid) -> Result<Option<Path>, MarkerError> {
    Ok(Solver::new(grid)?.solve())
}
