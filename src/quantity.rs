use crate::models::LineItem;
use std::fmt;

/// Raised when a gesture asks for more units than the line has in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfStock {
    pub max_stock: u32,
}

impl fmt::Display for OutOfStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sorry, only {} items available in stock.", self.max_stock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityChange {
    pub previous: u32,
    pub current: u32,
    pub out_of_stock: Option<OutOfStock>,
}

impl QuantityChange {
    fn unchanged(quantity: u32) -> Self {
        Self {
            previous: quantity,
            current: quantity,
            out_of_stock: None,
        }
    }

    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Steps the quantity by `delta`. Steps that would leave `[1, max_stock]`
/// are rejected and the quantity stays put.
pub fn adjust(line: &mut LineItem, delta: i64) -> QuantityChange {
    let previous = line.quantity;
    let max_stock = line.max_stock();
    let proposed = i64::from(previous).saturating_add(delta);

    if delta == 0 || (delta < 0 && proposed < 1) {
        return QuantityChange::unchanged(previous);
    }
    if delta > 0 && proposed > i64::from(max_stock) {
        return QuantityChange {
            out_of_stock: Some(OutOfStock { max_stock }),
            ..QuantityChange::unchanged(previous)
        };
    }

    let Ok(current) = u32::try_from(proposed) else {
        return QuantityChange::unchanged(previous);
    };
    line.quantity = current;
    QuantityChange {
        previous,
        current,
        out_of_stock: None,
    }
}

/// Applies a directly edited value. Anything that is not a positive integer
/// becomes 1; anything above stock is clamped and reported.
pub fn set_quantity(line: &mut LineItem, raw: &str) -> QuantityChange {
    let previous = line.quantity;
    let max_stock = line.max_stock();

    let (current, out_of_stock) = match parse_leading_int(raw) {
        Some(value) if value > i64::from(max_stock) => (max_stock, Some(OutOfStock { max_stock })),
        Some(value) if value >= 1 => (u32::try_from(value).unwrap_or(max_stock), None),
        _ => (1, None),
    };

    line.quantity = current;
    QuantityChange {
        previous,
        current,
        out_of_stock,
    }
}

/// Reads an integer the way form inputs are usually read: optional leading
/// whitespace and sign, then as many digits as there are. Trailing text is
/// ignored and oversized values saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(byte - b'0'));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}
