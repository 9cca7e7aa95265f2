use crate::line::line_subtotal;
use crate::models::LineItem;
use crate::money::format_currency;
use crate::ui_state::badge_label;
use rust_decimal::Decimal;
use serde::Serialize;

/// Cart figures derived from the current lines. Never cached; rebuilt on
/// every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub item_count: u64,
    /// Count badge text; `None` hides the badge.
    pub badge: Option<String>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub subtotal_display: String,
    pub discount_display: String,
    pub total_display: String,
}

/// Sums every line and subtracts the discount. A discount larger than the
/// subtotal yields a negative total; clamping is left to the caller.
pub fn recompute_totals<'a, I>(lines: I, discount: Decimal, currency: &str) -> CartSnapshot
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut item_count = 0u64;
    let mut subtotal = Decimal::ZERO;
    for line in lines {
        item_count = item_count.saturating_add(u64::from(line.quantity()));
        subtotal = subtotal.saturating_add(line_subtotal(line));
    }
    let total = subtotal.saturating_sub(discount);

    CartSnapshot {
        item_count,
        badge: badge_label(item_count),
        subtotal,
        discount,
        total,
        subtotal_display: format_currency(currency, subtotal),
        discount_display: format_currency(currency, discount),
        total_display: format_currency(currency, total),
    }
}
