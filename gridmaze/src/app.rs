use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use gridmaze_core::{Grid, GeneratorError, MarkerError, ParseError, Solver};
use thiserror::Error;

use crate::{
    cli::{Command, GenerateArgs},
    render::{render_grid, Palette},
    settings::{Settings, SettingsError},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error; {0}")]
    Io(#[from] io::Error),
    #[error("Cannot read maze file {0:?}; {1}")]
    ReadMaze(PathBuf, #[source] io::Error),
    #[error("Settings error; {0}")]
    Settings(#[from] SettingsError),
    #[error("Invalid maze; {0}")]
    Parse(#[from] ParseError),
    #[error("Generator error; {0}")]
    Generator(#[from] GeneratorError),
    #[error("Invalid maze; {0}")]
    Markers(#[from] MarkerError),
    #[error("Logger error; {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub struct App {
    settings: Settings,
    palette: Option<Palette>,
}

impl App {
    /// With `colored` off every maze is printed in the plain text format.
    pub fn new(settings: Settings, colored: bool) -> Self {
        let palette = colored.then(|| Palette::from_scheme(&settings.colors));
        Self { settings, palette }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run<W: Write>(&self, command: Command, out: &mut W) -> Result<(), AppError> {
        match command {
            Command::Generate(args) => self.generate(args, out),
            Command::Solve { file } => self.solve_file(&file, out),
            Command::Batch { count, size, seed } => self.batch(count, size, seed, out),
        }
    }

    fn generate<W: Write>(&self, args: GenerateArgs, out: &mut W) -> Result<(), AppError> {
        let size = args.size.unwrap_or(self.settings.size);
        let grid = self
            .settings
            .generator(args.extra_paths)
            .generate_seeded(size, args.seed)?;

        match &args.output {
            Some(path) => {
                fs::write(path, grid.to_string())?;
                log::info!("Maze saved to {:?}", path);
                writeln!(out, "Maze saved to {}", path.display())?;
            }
            None => write!(out, "{}", render_grid(&grid, None, self.palette.as_ref()))?,
        }

        if args.solve {
            writeln!(out)?;
            self.write_solution(&Solver::new(grid)?, out)?;
        }

        Ok(())
    }

    pub fn load_maze(path: &Path) -> Result<Grid, AppError> {
        let text = fs::read_to_string(path).map_err(|err| AppError::ReadMaze(path.to_owned(), err))?;
        let grid = text.parse::<Grid>()?;
        log::debug!("Loaded {0}x{0} maze from {1:?}", grid.size(), path);
        Ok(grid)
    }

    fn solve_file<W: Write>(&self, path: &Path, out: &mut W) -> Result<(), AppError> {
        let solver = Solver::new(Self::load_maze(path)?)?;
        self.write_solution(&solver, out)
    }

    fn batch<W: Write>(
        &self,
        count: usize,
        size: Option<usize>,
        seed: Option<u64>,
        out: &mut W,
    ) -> Result<(), AppError> {
        let size = size.unwrap_or(self.settings.size);
        let grids = self
            .settings
            .generator(false)
            .generate_batch(size, count, seed)?;

        for (i, grid) in grids.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "Maze {}", i + 1)?;
            write!(out, "{}", render_grid(grid, None, self.palette.as_ref()))?;
        }

        Ok(())
    }

    fn write_solution<W: Write>(&self, solver: &Solver, out: &mut W) -> Result<(), AppError> {
        match solver.solve() {
            Some(path) => {
                writeln!(out, "Solution found! Path length: {}", path.steps())?;
                writeln!(out)?;
                write!(
                    out,
                    "{}",
                    render_grid(solver.grid(), Some(&path), self.palette.as_ref())
                )?;
            }
            None => writeln!(out, "No solution found!")?,
        }
        Ok(())
    }
}
