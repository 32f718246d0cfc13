pub mod app;
pub mod cli;
pub mod constants;
pub mod logging;
pub mod render;
pub mod settings;
