use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/cart/update/:id", post(handlers::update_line_form))
        .route("/api/cart", get(handlers::get_cart))
        .route("/api/cart/lines/:id/adjust", post(handlers::adjust_line))
        .route("/api/cart/lines/:id/quantity", post(handlers::set_line_quantity))
        .route("/api/cart/lines/:id/remove", post(handlers::remove_line))
        .route("/api/cart/coupon", post(handlers::submit_coupon))
        .route("/api/ui", get(handlers::get_ui))
        .route("/api/ui/theme", post(handlers::set_theme))
        .route("/api/ui/chat", post(handlers::toggle_chat))
        .with_state(state)
}
