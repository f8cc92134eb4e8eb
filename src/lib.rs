pub mod app;
pub mod calendar;
pub mod errors;
pub mod habits;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::{AppState, HabitStore};
pub use storage::{load_snapshot, resolve_data_path};
