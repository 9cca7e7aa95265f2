use crate::models::LineItem;
use crate::money::format_currency;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTotals {
    pub subtotal: Decimal,
    pub display: String,
    pub submit_quantity: u32,
}

/// `unit_price × quantity` at full precision.
pub fn line_subtotal(line: &LineItem) -> Decimal {
    line.unit_price().saturating_mul(Decimal::from(line.quantity()))
}

pub fn recompute_line(line: &LineItem, currency: &str) -> LineTotals {
    let subtotal = line_subtotal(line);
    LineTotals {
        subtotal,
        display: format_currency(currency, subtotal),
        submit_quantity: line.quantity(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn subtotal_is_exact_across_stock_range() {
        let prices = ["0", "0.01", "9.99", "3.50", "0.333", "1234.5678"];
        for raw in prices {
            let price = Decimal::from_str(raw).unwrap();
            for quantity in 1..=12u32 {
                let line = LineItem::new(1, "Item", price, quantity, 12);
                let totals = recompute_line(&line, "$");
                assert_eq!(totals.subtotal, price * Decimal::from(quantity));
                assert_eq!(totals.submit_quantity, quantity);
            }
        }
    }

    #[test]
    fn display_rounds_but_value_keeps_precision() {
        let line = LineItem::new(1, "Syrup", Decimal::from_str("0.335").unwrap(), 3, 10);
        let totals = recompute_line(&line, "$");
        assert_eq!(totals.subtotal, Decimal::from_str("1.005").unwrap());
        assert_eq!(totals.display, "$1.01");
    }
}
