use crate::expiry::ExpiryInfo;
use crate::totals::CartSnapshot;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock ceiling used when a line arrives without one.
pub const DEFAULT_MAX_STOCK: u32 = 999;

/// One product entry in the cart.
///
/// `1 <= quantity <= max_stock` holds for every constructed value and after
/// every quantity controller action.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    id: u64,
    name: String,
    unit_price: Decimal,
    pub(crate) quantity: u32,
    max_stock: u32,
    expiry_date: Option<NaiveDate>,
}

impl LineItem {
    pub fn new(id: u64, name: impl Into<String>, unit_price: Decimal, quantity: u32, max_stock: u32) -> Self {
        let max_stock = max_stock.max(1);
        Self {
            id,
            name: name.into(),
            unit_price: unit_price.max(Decimal::ZERO),
            quantity: quantity.clamp(1, max_stock),
            max_stock,
            expiry_date: None,
        }
    }

    pub fn with_expiry(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn max_stock(&self) -> u32 {
        self.max_stock
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }
}

/// A line as it arrives from the seed document. Numbers are signed so that
/// out-of-range values can be clamped instead of failing the whole document.
#[derive(Debug, Clone, Deserialize)]
pub struct LineSeed {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default = "default_max_stock")]
    pub max_stock: i64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

fn default_quantity() -> i64 {
    1
}

fn default_max_stock() -> i64 {
    i64::from(DEFAULT_MAX_STOCK)
}

impl From<LineSeed> for LineItem {
    fn from(seed: LineSeed) -> Self {
        let max_stock = u32::try_from(seed.max_stock.max(1)).unwrap_or(u32::MAX);
        let quantity = u32::try_from(seed.quantity.clamp(1, i64::from(max_stock))).unwrap_or(1);
        let line = LineItem::new(seed.id, seed.name, seed.unit_price, quantity, max_stock);
        match seed.expiry_date {
            Some(date) => line.with_expiry(date),
            None => line,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartSeed {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub lines: Vec<LineSeed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Danger,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Danger => "danger",
        }
    }
}

/// A non-blocking message for the page to show however it likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Danger,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub delta: i64,
}

/// Raw quantity text as typed into the field. Numbers are accepted too and
/// treated as their textual form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Text(String),
    Number(serde_json::Number),
}

impl RawQuantity {
    pub fn as_text(&self) -> String {
        match self {
            RawQuantity::Text(text) => text.clone(),
            RawQuantity::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub value: RawQuantity,
}

/// Body of the plain quantity form post used when the page runs without script.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CouponRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    #[serde(default)]
    pub theme: Option<crate::ui_state::Theme>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub id: u64,
    pub name: String,
    pub unit_price: Decimal,
    pub unit_price_display: String,
    pub quantity: u32,
    pub max_stock: u32,
    pub subtotal: Decimal,
    pub subtotal_display: String,
    /// Value mirrored into the hidden `current_quantity` form field.
    pub submit_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<ExpiryInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartResponse {
    pub currency: String,
    pub lines: Vec<LineView>,
    pub totals: CartSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemovalResponse {
    NeedsConfirmation { prompt: String },
    Removed { cart: CartResponse },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CouponResponse {
    Rejected { notice: Notice },
    Forwarded { code: String },
}
