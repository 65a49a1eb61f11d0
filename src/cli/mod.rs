mod app;
mod args;
mod editor;

pub use app::App;
pub use args::Cli;
