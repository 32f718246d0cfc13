pub mod algorithms;
pub mod array;
pub mod dims;
pub mod grid;
pub mod solver;

pub use algorithms::{Generator, GeneratorError, Random};
pub use dims::Dims;
pub use grid::{Cell, Grid, MarkerError, ParseError};
pub use solver::{solve, Path, Solver};
