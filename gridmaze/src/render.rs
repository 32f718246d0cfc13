use std::str::FromStr;

use colored::{Color, Colorize as _};
use gridmaze_core::{solver::PATH_CHAR, Cell, Dims, Grid, Path};
use hashbrown::HashSet;

use crate::settings::ColorScheme;

/// Terminal colors of each kind of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub wall: Color,
    pub open: Color,
    pub start: Color,
    pub end: Color,
    pub path: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Color::White,
            open: Color::BrightBlack,
            start: Color::Green,
            end: Color::Red,
            path: Color::Yellow,
        }
    }
}

impl Palette {
    /// Unknown color names fall back to the default palette with a warning.
    pub fn from_scheme(scheme: &ColorScheme) -> Self {
        let default = Self::default();
        let parse = |name: &str, fallback: Color| {
            Color::from_str(name).unwrap_or_else(|_| {
                log::warn!("Unknown color '{}', using {:?}", name, fallback);
                fallback
            })
        };

        Self {
            wall: parse(&scheme.wall, default.wall),
            open: parse(&scheme.open, default.open),
            start: parse(&scheme.start, default.start),
            end: parse(&scheme.end, default.end),
            path: parse(&scheme.path, default.path),
        }
    }

    pub fn cell(&self, cell: Cell) -> Color {
        match cell {
            Cell::Wall => self.wall,
            Cell::Open => self.open,
            Cell::Start => self.start,
            Cell::End => self.end,
        }
    }
}

/// Text format of `grid`, with `path` cells drawn as `*` and colored when there's a palette.
pub fn render_grid(grid: &Grid, path: Option<&Path>, palette: Option<&Palette>) -> String {
    let on_path = path
        .map(|path| path.iter().copied().collect::<HashSet<_>>())
        .unwrap_or_default();

    let mut out = String::new();
    for (y, row) in grid.cells().rows().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if x > 0 {
                out.push(' ');
            }

            let marked = !cell.is_marker() && on_path.contains(&Dims(x as i32, y as i32));
            let token = if marked { PATH_CHAR } else { cell.to_char() };

            match palette {
                Some(palette) => {
                    let color = if marked { palette.path } else { palette.cell(cell) };
                    out.push_str(&token.to_string().color(color).to_string());
                }
                None => out.push(token),
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use colored::Colorize;
    use gridmaze_core::{Generator, Solver};

    use super::*;

    #[test]
    fn plain_render_is_text_format() {
        let grid = Generator::new().generate_seeded(9, Some(1)).unwrap();
        assert_eq!(render_grid(&grid, None, None), grid.to_string());
    }

    #[test]
    fn plain_render_with_path_matches_solver() {
        let grid = Generator::new().generate_seeded(13, Some(2)).unwrap();
        let solver = Solver::new(grid).unwrap();
        let path = solver.solve().unwrap();
        assert_eq!(
            render_grid(solver.grid(), Some(&path), None),
            solver.render_solution(&path)
        );
    }

    #[test]
    fn colored_render_uses_palette() {
        colored::control::set_override(true);

        let solver = Solver::new(Generator::new().generate_seeded(11, Some(5)).unwrap()).unwrap();
        let path = solver.solve().unwrap();
        let palette = Palette {
            path: Color::Magenta,
            ..Palette::default()
        };
        let rendered = render_grid(solver.grid(), Some(&path), Some(&palette));

        let path_token = "*".color(Color::Magenta).to_string();
        assert_ne!(path_token, "*");
        assert_eq!(rendered.matches(&path_token).count(), path.len() - 2);
        assert!(rendered.contains(&"S".color(palette.start).to_string()));
        assert!(rendered.contains(&"E".color(palette.end).to_string()));
        assert!(rendered.contains(&"X".color(palette.wall).to_string()));
        assert_eq!(rendered.lines().count(), 11);
    }

    #[test]
    fn scheme_parsing() {
        let scheme = ColorScheme {
            wall: "blue".into(),
            path: "not a color".into(),
            ..ColorScheme::default()
        };
        let palette = Palette::from_scheme(&scheme);
        assert_eq!(palette.wall, Color::Blue);
        assert_eq!(palette.path, Palette::default().path);
        assert_eq!(Palette::from_scheme(&ColorScheme::default()), Palette::default());
    }
}
