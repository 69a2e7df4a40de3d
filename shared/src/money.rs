//! Money helpers
//!
//! Prices are `Decimal` end to end; these helpers cover display formatting
//! and the cents boundary used by payment collaborators.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Format an amount as a dollar string, two decimal places
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shared::money::format_dollars;
///
/// assert_eq!(format_dollars(Decimal::new(1250, 2)), "$12.50");
/// ```
pub fn format_dollars(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// Convert a decimal dollar amount to integer cents (rounded)
pub fn to_cents(amount: Decimal) -> i64 {
    (amount * Decimal::from(100))
        .round()
        .to_i64()
        .unwrap_or(i64::MAX)
}

/// Convert integer cents to a decimal dollar amount
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(dec!(12.50)), 1250);
        assert_eq!(to_cents(dec!(0.01)), 1);
        assert_eq!(to_cents(dec!(0.00)), 0);
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(from_cents(1250), dec!(12.50));
        assert_eq!(from_cents(1), dec!(0.01));
    }

    #[test]
    fn test_round_trip() {
        for cents in [0, 1, 99, 100, 1250, 9999, 100000] {
            assert_eq!(to_cents(from_cents(cents)), cents);
        }
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(dec!(12.5)), "$12.50");
        assert_eq!(format_dollars(dec!(100)), "$100.00");
        assert_eq!(format_dollars(dec!(0.01)), "$0.01");
    }
}
