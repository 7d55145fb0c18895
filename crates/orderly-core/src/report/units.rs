//! Summing of quantities that share a unit.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::FormatError;

lazy_static! {
    /// `<magnitude> <unit>`, anything after the unit token is ignored.
    static ref QUANTITY: Regex = Regex::new(r"^\s*(\S+)\s+(\S+)").unwrap();
}

/// Split a quantity into its magnitude and lower-cased unit.
pub fn parse_quantity(quantity: &str) -> Result<(Decimal, String), FormatError> {
    let invalid = |reason: &str| FormatError::Quantity {
        quantity: quantity.to_string(),
        reason: reason.to_string(),
    };

    let caps = QUANTITY
        .captures(quantity)
        .ok_or_else(|| invalid("expected a number followed by a unit"))?;
    let magnitude =
        Decimal::from_str(&caps[1]).map_err(|_| invalid("magnitude is not a number"))?;
    Ok((magnitude, caps[2].trim().to_lowercase()))
}

/// Sum magnitudes per unit, one `"{sum} {unit}"` per unit in first-seen order.
pub fn merge_units<S: AsRef<str>>(quantities: &[S]) -> Result<Vec<String>, FormatError> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();

    for quantity in quantities {
        let (magnitude, unit) = parse_quantity(quantity.as_ref())?;
        match totals.iter_mut().find(|(u, _)| *u == unit) {
            Some((_, total)) => {
                *total = total
                    .checked_add(magnitude)
                    .ok_or_else(|| FormatError::Quantity {
                        quantity: quantity.as_ref().to_string(),
                        reason: "sum overflows".to_string(),
                    })?;
            }
            None => totals.push((unit, magnitude)),
        }
    }

    Ok(totals
        .into_iter()
        .map(|(unit, total)| format!("{} {}", total.normalize(), unit))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_in_first_seen_unit_order() {
        let merged = merge_units(&["2 lb", "3 lb", "1 kg"]).unwrap();
        assert_eq!(merged, vec!["5 lb", "1 kg"]);
    }

    #[test]
    fn test_units_are_case_insensitive() {
        let merged = merge_units(&["1 CS", "2 cs", "0.5 Cs"]).unwrap();
        assert_eq!(merged, vec!["3.5 cs"]);
    }

    #[test]
    fn test_decimal_sums_are_exact() {
        let merged = merge_units(&["0.1 kg", "0.2 kg"]).unwrap();
        assert_eq!(merged, vec!["0.3 kg"]);
    }

    #[test]
    fn test_missing_unit_fails() {
        let err = merge_units(&["4 lb", "12"]).unwrap_err();
        assert_eq!(
            err,
            FormatError::Quantity {
                quantity: "12".to_string(),
                reason: "expected a number followed by a unit".to_string()
            }
        );
    }

    #[test]
    fn test_sum_overflow_fails() {
        let err = merge_units(&["79228162514264337593543950335 lb"; 2]).unwrap_err();
        assert_eq!(
            err,
            FormatError::Quantity {
                quantity: "79228162514264337593543950335 lb".to_string(),
                reason: "sum overflows".to_string()
            }
        );
    }

    #[test]
    fn test_non_numeric_magnitude_fails() {
        let err = merge_units(&["some lb"]).unwrap_err();
        assert!(matches!(err, FormatError::Quantity { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_units::<&str>(&[]).unwrap().is_empty());
    }
}
