use crate::expiry::classify;
use crate::line::{recompute_line, LineTotals};
use crate::models::{CartResponse, CartSeed, LineItem, LineView, Notice};
use crate::money::{format_currency, DEFAULT_CURRENCY};
use crate::quantity::{self, QuantityChange};
use crate::totals::{recompute_totals, CartSnapshot};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use tracing::{debug, info, warn};

pub const REMOVE_PROMPT: &str = "Are you sure you want to remove this item from your cart?";
pub const EMPTY_COUPON_MESSAGE: &str = "Please enter a coupon code.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownLine(pub u64);

impl fmt::Display for UnknownLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cart line {} not found", self.0)
    }
}

impl std::error::Error for UnknownLine {}

/// Result of one quantity gesture: the touched line, the fresh cart figures,
/// and an optional stock notice for the page.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    pub change: QuantityChange,
    pub line: LineTotals,
    pub snapshot: CartSnapshot,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    NeedsConfirmation { prompt: &'static str },
    Removed { line: LineItem, snapshot: CartSnapshot },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponSubmission {
    Rejected(Notice),
    /// Trimmed code to hand to the server, which owns coupon lookup.
    Forward(String),
}

#[derive(Debug, Clone)]
pub struct CartViewModel {
    currency: String,
    discount: Decimal,
    lines: Vec<LineItem>,
}

impl CartViewModel {
    pub fn new(currency: impl Into<String>, discount: Decimal, lines: Vec<LineItem>) -> Self {
        Self {
            currency: currency.into(),
            discount,
            lines,
        }
    }

    /// Builds the cart from its seed document. `currency` overrides the
    /// seed's symbol when set.
    pub fn from_seed(seed: CartSeed, currency: Option<String>) -> Self {
        let currency = currency
            .or(seed.currency)
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let discount = if seed.discount.is_sign_negative() && !seed.discount.is_zero() {
            warn!(discount = %seed.discount, "ignoring negative discount");
            Decimal::ZERO
        } else {
            seed.discount
        };

        let lines = seed.lines.into_iter().map(LineItem::from).collect();
        Self::new(currency, discount, lines)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, id: u64) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.id() == id)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        recompute_totals(&self.lines, self.discount, &self.currency)
    }

    pub fn adjust(&mut self, id: u64, delta: i64) -> Result<CartUpdate, UnknownLine> {
        let index = self.position(id)?;
        let change = quantity::adjust(&mut self.lines[index], delta);
        Ok(self.finish(index, change))
    }

    pub fn set_quantity(&mut self, id: u64, raw: &str) -> Result<CartUpdate, UnknownLine> {
        let index = self.position(id)?;
        let change = quantity::set_quantity(&mut self.lines[index], raw);
        Ok(self.finish(index, change))
    }

    pub fn request_removal(&mut self, id: u64, confirmed: bool) -> Result<Removal, UnknownLine> {
        let index = self.position(id)?;
        if !confirmed {
            return Ok(Removal::NeedsConfirmation { prompt: REMOVE_PROMPT });
        }

        let line = self.lines.remove(index);
        info!(line = id, "removed line from cart");
        Ok(Removal::Removed {
            line,
            snapshot: self.snapshot(),
        })
    }

    pub fn submit_coupon(&self, code: &str) -> CouponSubmission {
        let code = code.trim();
        if code.is_empty() {
            return CouponSubmission::Rejected(Notice::danger(EMPTY_COUPON_MESSAGE));
        }
        CouponSubmission::Forward(code.to_string())
    }

    pub fn line_view(&self, line: &LineItem, today: NaiveDate) -> LineView {
        let totals = recompute_line(line, &self.currency);
        LineView {
            id: line.id(),
            name: line.name().to_string(),
            unit_price: line.unit_price(),
            unit_price_display: format_currency(&self.currency, line.unit_price()),
            quantity: line.quantity(),
            max_stock: line.max_stock(),
            subtotal: totals.subtotal,
            subtotal_display: totals.display,
            submit_quantity: totals.submit_quantity,
            expiry: line.expiry_date().map(|date| classify(date, today)),
        }
    }

    pub fn response(&self, today: NaiveDate, notice: Option<Notice>) -> CartResponse {
        CartResponse {
            currency: self.currency.clone(),
            lines: self.lines.iter().map(|line| self.line_view(line, today)).collect(),
            totals: self.snapshot(),
            notice,
        }
    }

    fn position(&self, id: u64) -> Result<usize, UnknownLine> {
        self.lines
            .iter()
            .position(|line| line.id() == id)
            .ok_or(UnknownLine(id))
    }

    // Line first, then the whole cart.
    fn finish(&self, index: usize, change: QuantityChange) -> CartUpdate {
        let line = &self.lines[index];
        let notice = change.out_of_stock.map(|stock| {
            warn!(line = line.id(), max_stock = stock.max_stock, "requested quantity exceeds stock");
            Notice::warning(stock.to_string())
        });

        let totals = recompute_line(line, &self.currency);
        let snapshot = self.snapshot();
        debug!(
            line = line.id(),
            from = change.previous,
            to = change.current,
            total = %snapshot.total,
            "recomputed cart"
        );

        CartUpdate {
            change,
            line: totals,
            snapshot,
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeLevel;
    use std::str::FromStr;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    fn sample_cart() -> CartViewModel {
        CartViewModel::new(
            "$",
            dec("5.00"),
            vec![
                LineItem::new(1, "Vitamin C", dec("9.99"), 2, 3),
                LineItem::new(2, "Bandages", dec("3.50"), 1, 10),
            ],
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn snapshot_for_sample_cart() {
        let cart = sample_cart();
        let snapshot = cart.snapshot();
        assert_eq!(snapshot.subtotal_display, "$23.48");
        assert_eq!(snapshot.total_display, "$18.48");
    }

    #[test]
    fn increment_recomputes_line_and_totals() {
        let mut cart = sample_cart();
        let update = cart.adjust(1, 1).unwrap();
        assert!(update.change.changed());
        assert_eq!(update.line.display, "$29.97");
        assert_eq!(update.line.submit_quantity, 3);
        assert_eq!(update.snapshot.subtotal, dec("33.47"));
        assert_eq!(update.snapshot.total, dec("28.47"));
        assert_eq!(update.notice, None);
    }

    #[test]
    fn increment_past_stock_warns_and_keeps_totals() {
        let mut cart = sample_cart();
        cart.adjust(1, 1).unwrap();
        let before = cart.snapshot();

        let update = cart.adjust(1, 1).unwrap();
        assert!(!update.change.changed());
        assert_eq!(update.snapshot, before);
        let notice = update.notice.expect("stock notice");
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Sorry, only 3 items available in stock.");
    }

    #[test]
    fn direct_edit_clamps_to_stock() {
        let mut cart = sample_cart();
        let update = cart.set_quantity(2, "20").unwrap();
        assert_eq!(update.change.current, 10);
        assert!(update.notice.is_some());
        assert_eq!(cart.line(2).unwrap().quantity(), 10);
        assert_eq!(update.snapshot.subtotal, dec("54.98"));
    }

    #[test]
    fn unknown_line_is_reported() {
        let mut cart = sample_cart();
        assert_eq!(cart.adjust(42, 1), Err(UnknownLine(42)));
        assert_eq!(cart.set_quantity(42, "1"), Err(UnknownLine(42)));
        assert_eq!(cart.request_removal(42, true), Err(UnknownLine(42)));
    }

    #[test]
    fn removal_needs_confirmation_first() {
        let mut cart = sample_cart();
        let removal = cart.request_removal(2, false).unwrap();
        assert_eq!(removal, Removal::NeedsConfirmation { prompt: REMOVE_PROMPT });
        assert_eq!(cart.lines().len(), 2);

        match cart.request_removal(2, true).unwrap() {
            Removal::Removed { line, snapshot } => {
                assert_eq!(line.id(), 2);
                assert_eq!(snapshot.subtotal, dec("19.98"));
                assert_eq!(snapshot.total, dec("14.98"));
            }
            other => panic!("unexpected removal result: {other:?}"),
        }
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn empty_coupon_is_rejected() {
        let cart = sample_cart();
        assert_eq!(
            cart.submit_coupon("   "),
            CouponSubmission::Rejected(Notice::danger(EMPTY_COUPON_MESSAGE))
        );
        assert_eq!(
            cart.submit_coupon(" SAVE10 "),
            CouponSubmission::Forward("SAVE10".to_string())
        );
    }

    #[test]
    fn seed_negative_discount_is_dropped() {
        let seed: CartSeed = serde_json::from_str(
            r#"{ "currency": "€", "discount": "-3", "lines": [ { "id": 1, "unit_price": "2" } ] }"#,
        )
        .unwrap();
        let cart = CartViewModel::from_seed(seed, None);
        assert_eq!(cart.discount(), Decimal::ZERO);
        assert_eq!(cart.currency(), "€");
        assert_eq!(cart.snapshot().total_display, "€2.00");
    }

    #[test]
    fn currency_override_beats_seed() {
        let seed: CartSeed = serde_json::from_str(r#"{ "currency": "€" }"#).unwrap();
        let cart = CartViewModel::from_seed(seed, Some("£".to_string()));
        assert_eq!(cart.currency(), "£");

        let cart = CartViewModel::from_seed(CartSeed::default(), None);
        assert_eq!(cart.currency(), "$");
    }

    #[test]
    fn response_carries_expiry_and_hidden_quantity() {
        let line = LineItem::new(7, "Eye drops", dec("4.25"), 2, 5)
            .with_expiry(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
        let cart = CartViewModel::new("$", Decimal::ZERO, vec![line]);

        let response = cart.response(today(), None);
        let view = &response.lines[0];
        assert_eq!(view.subtotal_display, "$8.50");
        assert_eq!(view.submit_quantity, 2);
        let expiry = view.expiry.expect("expiry info");
        assert_eq!(expiry.days_left, 15);
        assert_eq!(expiry.row_class(), "table-warning");
    }
}
