use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, author, about, name = "gridmaze")]
pub struct Cli {
    #[arg(short, long, global = true, help = "Settings file to use instead of the default one")]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true, value_parser = parse_level, help = "Minimum level of log messages")]
    pub log_level: Option<LevelFilter>,
    #[arg(long, global = true, help = "Print mazes without colors")]
    pub no_color: bool,
    #[arg(long, help = "Show settings path and quit")]
    pub show_config_path: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Generate a random maze
    Generate(GenerateArgs),
    /// Find the shortest path through a maze stored in a text file
    Solve {
        #[arg(help = "File with one row per line, cells `X`, `O`, `S` and `E` separated by spaces")]
        file: PathBuf,
    },
    /// Generate several mazes in parallel
    Batch {
        #[arg(short = 'n', long, help = "Number of mazes")]
        count: usize,
        #[arg(short, long, help = "Side of the mazes, odd")]
        size: Option<usize>,
        #[arg(long, help = "Seed of the whole batch")]
        seed: Option<u64>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate(GenerateArgs::default())
    }
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GenerateArgs {
    #[arg(short, long, help = "Side of the maze, odd")]
    pub size: Option<usize>,
    #[arg(long, help = "Seed for a reproducible maze")]
    pub seed: Option<u64>,
    #[arg(short = 'x', long, help = "Remove a few extra walls, allowing multiple solutions")]
    pub extra_paths: bool,
    #[arg(short, long, help = "Write the maze to a file instead of printing it")]
    pub output: Option<PathBuf>,
    #[arg(long, help = "Also print the solution")]
    pub solve: bool,
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .parse()
        .map_err(|_| format!("unknown log level '{level}'"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_flags() {
        let cli = Cli::try_parse_from([
            "gridmaze", "generate", "-s", "7", "--seed", "3", "-x", "--solve",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Generate(GenerateArgs {
                size: Some(7),
                seed: Some(3),
                extra_paths: true,
                output: None,
                solve: true,
            }))
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gridmaze", "solve", "maze.txt", "-l", "debug", "--no-color"])
            .unwrap();
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));
        assert!(cli.no_color);
        assert_eq!(
            cli.command,
            Some(Command::Solve {
                file: "maze.txt".into()
            })
        );
    }

    #[test]
    fn bad_log_level() {
        assert!(Cli::try_parse_from(["gridmaze", "-l", "loud"]).is_err());
    }

    #[test]
    fn no_subcommand() {
        let cli = Cli::try_parse_from(["gridmaze"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::default());
    }
}
