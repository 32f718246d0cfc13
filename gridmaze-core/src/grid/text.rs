use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{array::Array2D, dims::Dims};

use super::{
    board::{Grid, MarkerError},
    cell::Cell,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("maze text contains no rows")]
    Empty,
    #[error("unknown token '{token}' at row {row}, column {column}")]
    UnknownToken {
        row: usize,
        column: usize,
        token: String,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("maze must be square, got {rows} rows of {columns} cells")]
    NotSquare { rows: usize, columns: usize },
    #[error(transparent)]
    Markers(#[from] MarkerError),
}

impl Grid {
    /// Writes the grid in the text format, `glyph` decides the token of each cell.
    pub fn write_with<W, F>(&self, out: &mut W, mut glyph: F) -> fmt::Result
    where
        W: fmt::Write,
        F: FnMut(Dims, Cell) -> char,
    {
        for (y, row) in self.cells.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if x > 0 {
                    out.write_char(' ')?;
                }
                out.write_char(glyph(Dims(x as i32, y as i32), cell))?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }

    /// Parses the text format without checking the start and end markers.
    ///
    /// Used for grids that are still being edited, [`str::parse`] is the checked variant.
    pub fn parse_unchecked(text: &str) -> Result<Grid, ParseError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut rows = 0;

        for (row, line) in text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
            let before = cells.len();
            for (column, token) in line.split_whitespace().enumerate() {
                let cell = Cell::from_token(token).ok_or_else(|| ParseError::UnknownToken {
                    row,
                    column,
                    token: token.to_string(),
                })?;
                cells.push(cell);
            }

            let found = cells.len() - before;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(ParseError::Ragged {
                        row,
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let columns = width.ok_or(ParseError::Empty)?;
        if columns != rows {
            return Err(ParseError::NotSquare { rows, columns });
        }

        let cells = Array2D::from_vec(cells, columns, rows).ok_or(ParseError::Empty)?;
        Ok(Grid::from_cells(cells))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |_, cell| cell.to_char())
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    /// Parses the text format and requires exactly one start and one end.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let grid = Grid::parse_unchecked(s)?;
        grid.markers()?;
        Ok(grid)
    }
}
