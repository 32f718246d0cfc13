use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dims::Dims;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Open,
    Start,
    End,
}

impl Cell {
    /// Token used by the text format.
    pub fn to_char(self) -> char {
        match self {
            Cell::Wall => 'X',
            Cell::Open => 'O',
            Cell::Start => 'S',
            Cell::End => 'E',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Cell::Wall),
            'O' => Some(Cell::Open),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Whether a search may step onto this cell.
    ///
    /// *Note*: `Start` is not passable, searches begin on it but never return to it.
    pub fn is_passable(self) -> bool {
        matches!(self, Cell::Open | Cell::End)
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    pub fn is_marker(self) -> bool {
        matches!(self, Cell::Start | Cell::End)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One of the four axis-aligned directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Way {
    Right,
    Bottom,
    Left,
    Top,
}

impl Way {
    /// Fixed expansion order used by every search in this crate.
    pub const fn get_in_order() -> [Way; 4] {
        [Way::Right, Way::Bottom, Way::Left, Way::Top]
    }

    pub fn offset(self) -> Dims {
        match self {
            Way::Right => Dims(1, 0),
            Way::Bottom => Dims(0, 1),
            Way::Left => Dims(-1, 0),
            Way::Top => Dims(0, -1),
        }
    }

    pub fn reverse(self) -> Way {
        match self {
            Way::Right => Way::Left,
            Way::Bottom => Way::Top,
            Way::Left => Way::Right,
            Way::Top => Way::Bottom,
        }
    }

    /// Direction from `from` to an adjacent `to`, `None` if they aren't adjacent.
    pub fn between(from: Dims, to: Dims) -> Option<Way> {
        let Dims(dx, dy) = to - from;
        match (dx, dy) {
            (1, 0) => Some(Way::Right),
            (0, 1) => Some(Way::Bottom),
            (-1, 0) => Some(Way::Left),
            (0, -1) => Some(Way::Top),
            _ => None,
        }
    }
}
