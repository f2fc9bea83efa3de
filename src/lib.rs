pub mod aggregate;
pub mod app;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod report;
pub mod state;
pub mod ui;

pub use app::router;
pub use loader::{load_dataset, resolve_data_paths};
pub use state::AppState;
