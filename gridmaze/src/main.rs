use std::io;

use clap::Parser;
use gridmaze::{
    app::{App, AppError},
    cli::Cli,
    logging,
    settings::Settings,
};
use log::LevelFilter;

fn main() -> Result<(), AppError> {
    let args = Cli::parse();

    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);
    if args.show_config_path {
        println!("{}", settings_path.display());
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load(&settings_path)?;

    let level = args
        .log_level
        .or_else(|| settings.log_level())
        .unwrap_or(LevelFilter::Warn);
    logging::init(level)?;

    if let (Some(name), None) = (&settings.log_level, settings.log_level()) {
        log::warn!("Unknown log level '{}' in settings, using {}", name, level);
    }

    if args.no_color {
        colored::control::set_override(false);
    }

    let app = App::new(settings, !args.no_color);
    app.run(args.command.unwrap_or_default(), &mut io::stdout().lock())
}
