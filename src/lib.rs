pub mod app;
pub mod cart;
pub mod config;
pub mod errors;
pub mod expiry;
pub mod handlers;
pub mod line;
pub mod models;
pub mod money;
pub mod quantity;
pub mod state;
pub mod storage;
pub mod totals;
pub mod ui;
pub mod ui_state;

pub use app::router;
pub use cart::CartViewModel;
pub use config::Config;
pub use state::AppState;
pub use storage::load_seed;
pub use ui_state::UiState;
