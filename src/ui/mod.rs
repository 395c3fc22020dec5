pub mod app;
pub mod layout;
mod renderer;
pub mod terminal;

pub use app::{App, AppAction};
pub use terminal::run_ui;
