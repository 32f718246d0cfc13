use rand::{seq::SliceRandom as _, Rng};
use smallvec::SmallVec;

use crate::{
    dims::Dims,
    grid::{Cell, Grid},
};

/// Distance between two carved cells, the cell in between is the passage.
pub const CARVE_STEP: i32 = 2;

struct Frame {
    pos: Dims,
    candidates: SmallVec<[Dims; 4]>,
}

impl Frame {
    fn new<R: Rng + ?Sized>(grid: &Grid, pos: Dims, rng: &mut R) -> Self {
        let mut candidates = grid
            .neighbors_step(pos, CARVE_STEP)
            .into_iter()
            .filter(|&next| grid[next].is_wall())
            .collect::<SmallVec<[_; 4]>>();
        candidates.shuffle(rng);

        Self { pos, candidates }
    }
}

/// Carves a perfect maze into `grid` by randomized depth-first backtracking from `start`.
///
/// Every candidate is checked again when its turn comes, a sibling branch may have carved it
/// in the meantime. Returns the number of cells opened, passages included.
pub fn carve<R: Rng + ?Sized>(grid: &mut Grid, start: Dims, rng: &mut R) -> usize {
    grid[start] = Cell::Open;
    let mut opened = 1;

    let mut stack = vec![Frame::new(grid, start, rng)];
    while let Some(frame) = stack.last_mut() {
        let current = frame.pos;
        match frame.candidates.pop() {
            Some(next) if grid[next].is_wall() => {
                grid[next] = Cell::Open;
                grid[current.midpoint(next)] = Cell::Open;
                opened += 2;

                let frame = Frame::new(grid, next, rng);
                stack.push(frame);
            }
            Some(_) => {}
            None => {
                stack.pop();
            }
        }
    }

    opened
}
