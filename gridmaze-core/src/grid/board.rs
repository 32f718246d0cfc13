use std::ops;

use smallvec::SmallVec;
use thiserror::Error;

use crate::{array::Array2D, dims::Dims};

use super::cell::{Cell, Way};

/// Start or end marker is missing or appears more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("grid has no {0:?} cell")]
    Missing(Cell),
    #[error("grid has {count} {cell:?} cells, expected exactly one")]
    Duplicate { cell: Cell, count: usize },
}

/// Square matrix of cells, `size` x `size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) cells: Array2D<Cell>,
}

impl Grid {
    /// Grid of the given side length with every cell set to [`Cell::Wall`].
    pub fn new(size: usize) -> Self {
        Self {
            cells: Array2D::new(Cell::Wall, size, size),
        }
    }

    pub(crate) fn from_cells(cells: Array2D<Cell>) -> Self {
        debug_assert_eq!(cells.width(), cells.height());
        Self { cells }
    }

    pub fn size(&self) -> usize {
        self.cells.width()
    }

    pub fn cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    /// In bounds and not on the outer border ring.
    pub fn is_interior(&self, pos: Dims) -> bool {
        let last = self.size() as i32 - 1;
        0 < pos.0 && pos.0 < last && 0 < pos.1 && pos.1 < last
    }

    pub fn is_border(&self, pos: Dims) -> bool {
        self.in_bounds(pos) && !self.is_interior(pos)
    }

    pub fn get(&self, pos: Dims) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Sets the cell and returns the previous state, `None` if `pos` is out of bounds.
    pub fn set(&mut self, pos: Dims, cell: Cell) -> Option<Cell> {
        self.cells
            .get_mut(pos)
            .map(|slot| std::mem::replace(slot, cell))
    }

    /// Resets every cell to [`Cell::Wall`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Wall);
    }

    /// Positions `step` cells away in each direction, restricted to the interior.
    pub fn neighbors_step(&self, pos: Dims, step: i32) -> SmallVec<[Dims; 4]> {
        Way::get_in_order()
            .into_iter()
            .map(|way| pos + way.offset() * step)
            .filter(|&next| self.is_interior(next))
            .collect()
    }

    /// Adjacent in-bounds positions, in [`Way::get_in_order`] order.
    pub fn neighbors(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        Way::get_in_order()
            .into_iter()
            .map(|way| pos + way.offset())
            .filter(|&next| self.in_bounds(next))
            .collect()
    }

    pub fn find(&self, cell: Cell) -> impl Iterator<Item = Dims> + '_ {
        self.cells
            .iter_pos()
            .zip(self.cells.iter())
            .filter(move |&(_, &c)| c == cell)
            .map(|(pos, _)| pos)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    fn unique(&self, cell: Cell) -> Result<Dims, MarkerError> {
        let mut found = self.find(cell);
        let first = found.next().ok_or(MarkerError::Missing(cell))?;
        match found.count() {
            0 => Ok(first),
            rest => Err(MarkerError::Duplicate {
                cell,
                count: rest + 1,
            }),
        }
    }

    /// Locates the single start and the single end cell.
    pub fn markers(&self) -> Result<(Dims, Dims), MarkerError> {
        Ok((self.unique(Cell::Start)?, self.unique(Cell::End)?))
    }

    /// Depth-first reachability from `from` to `to` over passable cells.
    pub fn reaches(&self, from: Dims, to: Dims) -> bool {
        if !self.in_bounds(from) || !self.in_bounds(to) {
            return false;
        }

        let mut visited = Array2D::new(false, self.size(), self.size());
        let mut stack = vec![from];
        visited[from] = true;

        while let Some(pos) = stack.pop() {
            if pos == to {
                return true;
            }

            for next in self.neighbors(pos) {
                if !visited[next] && self[next].is_passable() {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        false
    }

    pub fn border(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter_pos().filter(move |&pos| !self.is_interior(pos))
    }
}

impl ops::Index<Dims> for Grid {
    type Output = Cell;

    fn index(&self, index: Dims) -> &Self::Output {
        &self.cells[index]
    }
}

impl ops::IndexMut<Dims> for Grid {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        &mut self.cells[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_interior(size: usize) -> Grid {
        let mut grid = Grid::new(size);
        for pos in Dims::iter_fill(Dims::ONE, Dims(size as i32 - 1, size as i32 - 1)) {
            grid[pos] = Cell::Open;
        }
        grid
    }

    #[test]
    fn new_grid_is_all_walls() {
        let grid = Grid::new(7);
        assert_eq!(grid.size(), 7);
        assert_eq!(grid.count(Cell::Wall), 49);
    }

    #[test]
    fn bounds_and_interior() {
        let grid = Grid::new(5);
        assert!(grid.in_bounds(Dims(0, 0)));
        assert!(grid.in_bounds(Dims(4, 4)));
        assert!(!grid.in_bounds(Dims(5, 0)));
        assert!(!grid.in_bounds(Dims(0, -1)));

        assert!(grid.is_interior(Dims(1, 1)));
        assert!(grid.is_interior(Dims(3, 3)));
        assert!(!grid.is_interior(Dims(0, 2)));
        assert!(!grid.is_interior(Dims(4, 2)));
        assert_eq!(grid.border().count(), 16);
    }

    #[test]
    fn neighbors_step_stays_inside() {
        let grid = Grid::new(7);
        let mut around_corner = grid.neighbors_step(Dims(1, 1), 2).into_vec();
        around_corner.sort_by_key(|d| (d.0, d.1));
        assert_eq!(around_corner, vec![Dims(1, 3), Dims(3, 1)]);

        assert_eq!(grid.neighbors_step(Dims(3, 3), 2).len(), 4);
        assert_eq!(grid.neighbors_step(Dims(5, 5), 2).len(), 2);
    }

    #[test]
    fn neighbors_clip_to_bounds() {
        let grid = Grid::new(3);
        assert_eq!(grid.neighbors(Dims(0, 0)).as_slice(), &[Dims(1, 0), Dims(0, 1)]);
        assert_eq!(grid.neighbors(Dims(1, 1)).len(), 4);
    }

    #[test]
    fn set_reports_previous() {
        let mut grid = Grid::new(5);
        assert_eq!(grid.set(Dims(2, 2), Cell::Open), Some(Cell::Wall));
        assert_eq!(grid.set(Dims(2, 2), Cell::End), Some(Cell::Open));
        assert_eq!(grid.set(Dims(9, 9), Cell::Open), None);
        assert_eq!(grid.get(Dims(2, 2)), Some(Cell::End));
    }

    #[test]
    fn markers_found() {
        let mut grid = open_interior(5);
        grid[Dims(1, 1)] = Cell::Start;
        grid[Dims(3, 3)] = Cell::End;
        assert_eq!(grid.markers(), Ok((Dims(1, 1), Dims(3, 3))));
    }

    #[test]
    fn markers_missing_or_duplicated() {
        let mut grid = open_interior(5);
        assert_eq!(grid.markers(), Err(MarkerError::Missing(Cell::Start)));

        grid[Dims(1, 1)] = Cell::Start;
        assert_eq!(grid.markers(), Err(MarkerError::Missing(Cell::End)));

        grid[Dims(3, 3)] = Cell::End;
        grid[Dims(3, 1)] = Cell::End;
        assert_eq!(
            grid.markers(),
            Err(MarkerError::Duplicate {
                cell: Cell::End,
                count: 2
            })
        );
    }

    #[test]
    fn reachability() {
        let mut grid = open_interior(5);
        grid[Dims(1, 1)] = Cell::Start;
        grid[Dims(3, 3)] = Cell::End;
        assert!(grid.reaches(Dims(1, 1), Dims(3, 3)));

        grid[Dims(2, 3)] = Cell::Wall;
        grid[Dims(3, 2)] = Cell::Wall;
        assert!(!grid.reaches(Dims(1, 1), Dims(3, 3)));
    }
}
