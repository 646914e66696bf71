//! Ratatui front-end. `App` holds the screen state and turns key presses into
//! service calls; `run_app` owns the terminal.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
