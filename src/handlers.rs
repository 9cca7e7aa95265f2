use crate::cart::{CouponSubmission, Removal};
use crate::errors::AppError;
use crate::expiry::today;
use crate::models::{
    AdjustRequest, CartResponse, CouponRequest, CouponResponse, Notice, QuantityForm, QuantityRequest,
    RemovalResponse, RemoveRequest, ThemeRequest,
};
use crate::state::AppState;
use crate::ui::render_cart;
use crate::ui_state::UiView;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use tracing::info;

const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let cart = state.cart.lock().await;
    let mut ui = state.ui.lock().await;
    let flash = ui.take_flash();
    let html = render_cart(&cart, &ui.view(prefers_dark(&headers)), flash.as_ref(), today());
    ([("accept-ch", "Sec-CH-Prefers-Color-Scheme")], Html(html))
}

pub async fn get_cart(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart.lock().await;
    Json(cart.response(today(), None))
}

pub async fn adjust_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<AdjustRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let mut cart = state.cart.lock().await;
    let update = cart.adjust(id, payload.delta)?;
    Ok(Json(cart.response(today(), update.notice)))
}

pub async fn set_line_quantity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let mut cart = state.cart.lock().await;
    let update = cart.set_quantity(id, &payload.value.as_text())?;
    Ok(Json(cart.response(today(), update.notice)))
}

/// Plain form post for pages without script. Any stock notice is flashed
/// onto the page the redirect lands on.
pub async fn update_line_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<QuantityForm>,
) -> Result<Redirect, AppError> {
    let mut cart = state.cart.lock().await;
    let update = cart.set_quantity(id, &form.quantity)?;
    if let Some(notice) = update.notice {
        state.ui.lock().await.set_flash(notice);
    }
    Ok(Redirect::to("/"))
}

pub async fn remove_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<RemoveRequest>,
) -> Result<Json<RemovalResponse>, AppError> {
    let mut cart = state.cart.lock().await;
    let response = match cart.request_removal(id, payload.confirmed)? {
        Removal::NeedsConfirmation { prompt } => RemovalResponse::NeedsConfirmation {
            prompt: prompt.to_string(),
        },
        Removal::Removed { .. } => RemovalResponse::Removed {
            cart: cart.response(today(), Some(Notice::info("Item removed from cart."))),
        },
    };
    Ok(Json(response))
}

pub async fn submit_coupon(
    State(state): State<AppState>,
    Json(payload): Json<CouponRequest>,
) -> Json<CouponResponse> {
    let cart = state.cart.lock().await;
    let response = match cart.submit_coupon(&payload.code) {
        CouponSubmission::Rejected(notice) => CouponResponse::Rejected { notice },
        CouponSubmission::Forward(code) => {
            info!(%code, "forwarding coupon code");
            CouponResponse::Forwarded { code }
        }
    };
    Json(response)
}

pub async fn get_ui(State(state): State<AppState>, headers: HeaderMap) -> Json<UiView> {
    let ui = state.ui.lock().await;
    Json(ui.view(prefers_dark(&headers)))
}

/// Sets the theme when one is given, otherwise flips the displayed one.
pub async fn set_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ThemeRequest>,
) -> Json<UiView> {
    let prefers_dark = prefers_dark(&headers);
    let mut ui = state.ui.lock().await;
    match payload.theme {
        Some(theme) => ui.set_theme(theme),
        None => {
            ui.toggle_theme(prefers_dark);
        }
    }
    Json(ui.view(prefers_dark))
}

pub async fn toggle_chat(State(state): State<AppState>, headers: HeaderMap) -> Json<UiView> {
    let mut ui = state.ui.lock().await;
    ui.toggle_chat();
    Json(ui.view(prefers_dark(&headers)))
}

fn prefers_dark(headers: &HeaderMap) -> bool {
    headers
        .get(PREFERS_COLOR_SCHEME)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().trim_matches('"').eq_ignore_ascii_case("dark"))
        .unwrap_or(false)
}
