//! Ratatui front-end: a reference input, the passage display and the stored
//! marker list. All lookups and marker writes go through the service.

mod app;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
