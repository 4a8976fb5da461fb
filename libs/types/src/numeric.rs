//! Monetary amounts and currency display formatting
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Display rounding is HALF_UP to two fractional digits.

use crate::errors::ValidationError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strictly positive transfer amount in BRL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Wrap a decimal, rejecting zero and negative values
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(Self(value))
    }

    /// Parse form input. Accepts `.` or a lone `,` as the decimal separator.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidAmount(String::new()));
        }

        let normalized = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
            trimmed.replace(',', ".")
        } else {
            trimmed.to_string()
        };

        let value = Decimal::from_str(&normalized)
            .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
        Self::new(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Decimal string sent to the API (`50`, `12.5`), without trailing zeros
    pub fn to_wire_string(&self) -> String {
        self.0.normalize().to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CurrencyFormat::PT_BR.format(self.0))
    }
}

/// Locale-specific currency display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub grouping_separator: char,
    pub decimal_separator: char,
}

impl CurrencyFormat {
    /// Brazilian real: `R$ 1.234,56`
    pub const PT_BR: CurrencyFormat = CurrencyFormat {
        symbol: "R$",
        grouping_separator: '.',
        decimal_separator: ',',
    };

    /// Format a value with two fractional digits.
    ///
    /// Pure: the result depends only on `value` and `self`.
    pub fn format(&self, value: Decimal) -> String {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);

        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().to_string();
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, ch) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(self.grouping_separator);
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        format!(
            "{sign}{} {grouped}{}{fraction}",
            self.symbol, self.decimal_separator
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::PT_BR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_integer() {
        let amount = Amount::parse("50").unwrap();
        assert_eq!(amount.as_decimal(), Decimal::from(50));
        assert_eq!(amount.to_wire_string(), "50");
    }

    #[test]
    fn test_parse_comma_decimal() {
        let amount = Amount::parse("12,5").unwrap();
        assert_eq!(amount.to_wire_string(), "12.5");
    }

    #[test]
    fn test_parse_rejects_garbage_and_non_positive() {
        assert_eq!(
            Amount::parse("abc"),
            Err(ValidationError::InvalidAmount("abc".to_string()))
        );
        assert_eq!(Amount::parse("0"), Err(ValidationError::NonPositiveAmount));
        assert_eq!(Amount::parse("-3"), Err(ValidationError::NonPositiveAmount));
        assert!(matches!(Amount::parse("   "), Err(ValidationError::InvalidAmount(_))));
    }

    #[test]
    fn test_wire_string_drops_trailing_zeros() {
        let amount = Amount::new(dec("100.50")).unwrap();
        assert_eq!(amount.to_wire_string(), "100.5");
    }

    #[test]
    fn test_format_groups_thousands() {
        let fmt = CurrencyFormat::PT_BR;
        assert_eq!(fmt.format(dec("1234.5")), "R$ 1.234,50");
        assert_eq!(fmt.format(dec("1234567.891")), "R$ 1.234.567,89");
        assert_eq!(fmt.format(dec("50")), "R$ 50,00");
        assert_eq!(fmt.format(dec("999")), "R$ 999,00");
    }

    #[test]
    fn test_format_rounds_half_up() {
        let fmt = CurrencyFormat::PT_BR;
        assert_eq!(fmt.format(dec("0.005")), "R$ 0,01");
        assert_eq!(fmt.format(dec("2.345")), "R$ 2,35");
        assert_eq!(fmt.format(dec("2.344")), "R$ 2,34");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(CurrencyFormat::PT_BR.format(dec("-1500")), "-R$ 1.500,00");
    }

    #[test]
    fn test_amount_display_uses_brl() {
        let amount = Amount::parse("2847.53").unwrap();
        assert_eq!(amount.to_string(), "R$ 2.847,53");
    }

    proptest! {
        #[test]
        fn prop_format_is_pure(cents in 0u64..1_000_000_000_000u64) {
            let value = Decimal::new(cents as i64, 2);
            let fmt = CurrencyFormat::PT_BR;
            let first = fmt.format(value);
            let _ = fmt.format(Decimal::new(7, 0));
            prop_assert_eq!(first, fmt.format(value));
        }

        #[test]
        fn prop_format_preserves_digits(cents in 0u64..1_000_000_000_000u64) {
            let value = Decimal::new(cents as i64, 2);
            let text = CurrencyFormat::PT_BR.format(value);
            let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(digits.parse::<u64>().unwrap(), cents);
            prop_assert!(text.starts_with("R$ "));
        }
    }
}
