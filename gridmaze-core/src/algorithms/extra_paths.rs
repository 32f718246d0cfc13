use rand::Rng;

use crate::{
    dims::Dims,
    grid::{Cell, Grid, Way},
};

/// Knocks out a few walls to add loops, turning a perfect maze into one with several solutions.
///
/// Makes `size / 3` attempts. Each picks a random interior cell and opens it only if it's a wall
/// with an open cell above or below and an open cell to the left or right.
/// Returns how many walls were removed.
pub fn add_extra_paths<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let size = grid.size() as i32;
    if size < 3 {
        return 0;
    }

    let is_open = |grid: &Grid, pos: Dims, way: Way| grid.get(pos + way.offset()) == Some(Cell::Open);

    let mut removed = 0;
    for _ in 0..grid.size() / 3 {
        let pos = Dims(rng.gen_range(1..size - 1), rng.gen_range(1..size - 1));

        let vertical = is_open(grid, pos, Way::Top) || is_open(grid, pos, Way::Bottom);
        let horizontal = is_open(grid, pos, Way::Left) || is_open(grid, pos, Way::Right);

        if grid[pos].is_wall() && vertical && horizontal {
            grid[pos] = Cell::Open;
            removed += 1;
        }
    }

    log::debug!("extra paths: removed {removed} walls");
    removed
}
