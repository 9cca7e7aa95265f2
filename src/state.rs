use crate::cart::CartViewModel;
use crate::ui_state::UiState;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared page state. Handlers that need both locks take `cart` first.
#[derive(Clone)]
pub struct AppState {
    pub cart: Arc<Mutex<CartViewModel>>,
    pub ui: Arc<Mutex<UiState>>,
}

impl AppState {
    pub fn new(cart: CartViewModel, ui: UiState) -> Self {
        Self {
            cart: Arc::new(Mutex::new(cart)),
            ui: Arc::new(Mutex::new(ui)),
        }
    }
}
