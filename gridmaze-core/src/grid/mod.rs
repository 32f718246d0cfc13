pub mod board;
pub use board::{Grid, MarkerError};
pub mod cell;
pub use cell::{Cell, Way};
pub mod text;
pub use text::ParseError;
