//! Normalization of free-text feed values into canonical typed values.
//!
//! Every function here is total: malformed input degrades to a safe default
//! (`0`, `0.00`, `None`, empty string) instead of failing the row.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::patterns::PRICE_PREFIX;

/// Characters stripped from both ends of every feed value.
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\u{0b}', '"', '\''];

/// Strip whitespace, NUL, vertical tab and quote characters from both ends.
pub fn clean_scalar(value: Option<&str>) -> String {
    value
        .map(|v| v.trim_matches(TRIM_CHARS).to_string())
        .unwrap_or_default()
}

/// Parse a supplier price such as `"87,00"` or `"PLN 99.5"` into a
/// two-digit decimal.
pub fn normalize_price(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut price = parse_leading_decimal(&cleaned)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(2);

    // Values too wide for scale 2 cannot be represented as a price
    if price.scale() != 2 {
        return Decimal::new(0, 2);
    }
    price
}

/// Parse a quantity, mapping open-ended values (`">30"`) to `max`.
pub fn normalize_quantity(value: Option<&str>, max: u32) -> u32 {
    let Some(value) = value else {
        return 0;
    };

    let value = value.trim();
    if value.starts_with('>') {
        return max;
    }

    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }

    // Only digits remain, so the sole failure is overflow
    digits.parse().unwrap_or(u32::MAX)
}

/// Turn empty or `"null"` values into `None`.
pub fn normalize_nullable(value: Option<&str>) -> Option<String> {
    let value = value?.trim_matches(TRIM_CHARS);
    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        return None;
    }
    Some(value.to_string())
}

/// Parse the leading `digits[.digits]` run; anything after it is ignored.
fn parse_leading_decimal(s: &str) -> Decimal {
    let Some(caps) = PRICE_PREFIX.captures(s) else {
        return Decimal::ZERO;
    };

    let integer = caps.get(1).map_or("", |m| m.as_str());
    let fraction = caps.get(2).map_or("", |m| m.as_str());

    let integer = if integer.is_empty() { "0" } else { integer };
    let number = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    };

    Decimal::from_str(&number).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn price(raw: &str) -> String {
        normalize_price(raw).to_string()
    }

    fn is_two_digit_price(s: &str) -> bool {
        let Some((int, frac)) = s.split_once('.') else {
            return false;
        };
        !int.is_empty()
            && int.chars().all(|c| c.is_ascii_digit())
            && frac.len() == 2
            && frac.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(price("87,00"), "87.00");
        assert_eq!(price("99.5"), "99.50");
        assert_eq!(price("abc"), "0.00");
    }

    #[test]
    fn test_normalize_price_edge_cases() {
        assert_eq!(price(""), "0.00");
        assert_eq!(price("."), "0.00");
        assert_eq!(price(",5"), "0.50");
        assert_eq!(price("12"), "12.00");
        assert_eq!(price(" 1 234,56 zł "), "1234.56");
        assert_eq!(price("-5,00"), "5.00");
        assert_eq!(price("1.2.3"), "1.20");
        assert_eq!(price("10,005"), "10.01");
        assert_eq!(price("10,004"), "10.00");
    }

    #[test]
    fn test_normalize_price_shape() {
        for raw in [
            "87,00",
            "99.5",
            "abc",
            "",
            "0",
            "1.999",
            "12,3,4",
            "PLN 7",
            "..",
            "000,1",
            "1000000000000000000000000000",
            "79228162514264337593543950335",
            "999999999999999999999999999999999",
        ] {
            let out = price(raw);
            assert!(is_two_digit_price(&out), "{raw:?} -> {out:?}");
        }
    }

    #[test]
    fn test_normalize_price_too_wide_falls_back_to_zero() {
        for raw in ["1000000000000000000000000000", "79228162514264337593543950335,99"] {
            let out = normalize_price(raw);
            assert_eq!(out.scale(), 2, "{raw:?}");
            assert_eq!(out.to_string(), "0.00");
        }
        assert_eq!(price("100000000000000000000000000,5"), "100000000000000000000000000.50");
    }

    #[test]
    fn test_normalize_price_is_fixed_point() {
        for raw in ["87,00", "99.5", "abc", "1.999", " 1 234,56 "] {
            let once = normalize_price(raw);
            let twice = normalize_price(&once.to_string());
            assert_eq!(once.to_string(), twice.to_string());
        }
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(Some(">30"), 31), 31);
        assert_eq!(normalize_quantity(Some(">10"), 11), 11);
        assert_eq!(normalize_quantity(Some("25"), 31), 25);
        assert_eq!(normalize_quantity(Some("xyz"), 31), 0);
        assert_eq!(normalize_quantity(None, 31), 0);
    }

    #[test]
    fn test_normalize_quantity_edge_cases() {
        assert_eq!(normalize_quantity(Some("  >5 "), 11), 11);
        assert_eq!(normalize_quantity(Some("12 szt."), 31), 12);
        assert_eq!(normalize_quantity(Some("-3"), 31), 3);
        assert_eq!(normalize_quantity(Some(""), 31), 0);
        assert_eq!(normalize_quantity(Some("99999999999999"), 31), u32::MAX);
    }

    #[test]
    fn test_normalize_quantity_is_fixed_point() {
        for raw in [">30", "25", "xyz", "7 pcs"] {
            let once = normalize_quantity(Some(raw), 31);
            assert_eq!(normalize_quantity(Some(once.to_string().as_str()), 31), once);
        }
    }

    #[test]
    fn test_normalize_nullable() {
        assert_eq!(normalize_nullable(Some("123456")), Some("123456".to_string()));
        assert_eq!(normalize_nullable(Some("null")), None);
        assert_eq!(normalize_nullable(Some("NULL")), None);
        assert_eq!(normalize_nullable(Some(" 'Null' ")), None);
        assert_eq!(normalize_nullable(Some("")), None);
        assert_eq!(normalize_nullable(None), None);
        assert_eq!(normalize_nullable(Some(" \"590\" ")), Some("590".to_string()));
    }

    #[test]
    fn test_normalize_nullable_is_fixed_point() {
        let once = normalize_nullable(Some(" '5901234123457' "));
        assert_eq!(normalize_nullable(once.as_deref()), once);
    }

    #[test]
    fn test_clean_scalar() {
        assert_eq!(clean_scalar(Some(" \"test\" ")), "test");
        assert_eq!(clean_scalar(Some("\tabc\n")), "abc");
        assert_eq!(clean_scalar(Some("\0'x'\u{0b}")), "x");
        assert_eq!(clean_scalar(Some("a \"b\" c")), "a \"b\" c");
        assert_eq!(clean_scalar(None), "");
    }
}
