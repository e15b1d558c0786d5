//! Money arithmetic for the checkout engine
//!
//! All amounts are `i64` whole rupiah. Subtotals and totals are exact
//! integer sums; the only fractional step is the tax-rate multiply, which
//! goes through `Decimal` and rounds half-up before re-entering integer
//! space.

use rust_decimal::prelude::*;
use shared::order::CartLine;

/// Derived monetary figures for a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

/// Exact integer sum of line totals
pub fn subtotal(lines: &[CartLine]) -> i64 {
    lines.iter().map(CartLine::line_total).sum()
}

/// Total units across all lines
pub fn item_count(lines: &[CartLine]) -> u32 {
    lines.iter().map(|line| line.quantity).sum()
}

/// Tax on a subtotal, rounded half-up to a whole unit
pub fn tax(subtotal: i64, rate: Decimal) -> i64 {
    (Decimal::from(subtotal) * rate)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Subtotal, tax, and total for a cart at the given rate
pub fn totals(lines: &[CartLine], rate: Decimal) -> Totals {
    let subtotal = subtotal(lines);
    let tax = tax(subtotal, rate);
    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Change due on a cash payment; never negative
pub fn change_due(tendered: i64, total: i64) -> i64 {
    (tendered - total).max(0)
}

/// Render an amount in the register's display format: `Rp 74.800`
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("Rp -{grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, unit_price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            unit_price,
            quantity,
        }
    }

    fn ten_percent() -> Decimal {
        Decimal::new(1, 1)
    }

    #[test]
    fn test_reference_cart_totals() {
        // 25000 x 2 + 18000 x 1 = 68000; 10% tax = 6800; total = 74800
        let lines = vec![line("a", 25000, 2), line("b", 18000, 1)];
        let totals = totals(&lines, ten_percent());
        assert_eq!(totals.subtotal, 68000);
        assert_eq!(totals.tax, 6800);
        assert_eq!(totals.total, 74800);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 5 * 0.1 = 0.5 rounds up to 1
        assert_eq!(tax(5, ten_percent()), 1);
        // 4 * 0.1 = 0.4 rounds down to 0
        assert_eq!(tax(4, ten_percent()), 0);
        // 15 * 0.1 = 1.5 rounds up to 2
        assert_eq!(tax(15, ten_percent()), 2);
    }

    #[test]
    fn test_subtotal_is_exact_integer_sum() {
        // 333 odd-priced units must not drift
        let lines = vec![line("a", 1111, 333)];
        assert_eq!(subtotal(&lines), 369_963);
    }

    #[test]
    fn test_zero_rate_means_zero_tax() {
        let lines = vec![line("a", 25000, 2)];
        let totals = totals(&lines, Decimal::ZERO);
        assert_eq!(totals.tax, 0);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_change_due() {
        assert_eq!(change_due(100_000, 74_800), 25_200);
        assert_eq!(change_due(74_800, 74_800), 0);
        // Short payments never produce negative change
        assert_eq!(change_due(50_000, 74_800), 0);
    }

    #[test]
    fn test_item_count() {
        let lines = vec![line("a", 25000, 2), line("b", 18000, 1)];
        assert_eq!(item_count(&lines), 3);
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(74800), "Rp 74.800");
        assert_eq!(format_rupiah(8000), "Rp 8.000");
        assert_eq!(format_rupiah(500), "Rp 500");
        assert_eq!(format_rupiah(1_250_000), "Rp 1.250.000");
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(-25200), "Rp -25.200");
    }
}
