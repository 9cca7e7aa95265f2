use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_CURRENCY: &str = "$";

/// Formats an amount for display, rounded half-up to cents.
///
/// Rounding happens here and only here; callers keep full precision in the
/// values they store or submit.
pub fn format_currency(symbol: &str, amount: Decimal) -> String {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    if cents.is_zero() {
        cents.set_sign_positive(true);
    }
    format!("{symbol}{cents}")
}
