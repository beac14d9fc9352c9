//! Display formatting for counter values.
//!
//! Plain numbers are grouped in threes with `,`. Counters that opt into the
//! `k` format show thousands with at most one decimal: `1500 -> "1.5k"`,
//! `2000 -> "2k"`.

/// How a counter renders its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Digit-grouped integer: `12,480`.
    #[default]
    Grouped,
    /// Thousands abbreviated with a `k` suffix from 1000 up.
    Thousands,
}

impl NumberFormat {
    /// Reads a `data-format` attribute. Only `"k"` selects [`NumberFormat::Thousands`].
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr.map(str::trim) {
            Some("k") => NumberFormat::Thousands,
            _ => NumberFormat::Grouped,
        }
    }
}

/// Formats `n` with `,` between each group of three digits.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `x` rounded to tenths, taken from its exact binary value.
///
/// Only an exact tie rounds up, so `1.15` (stored just below) gives 11 and
/// `1.25` (stored exactly) gives 13. Expects `x >= 1`.
fn tenths_of(x: f64) -> u128 {
    let bits = x.to_bits();
    let mantissa = u128::from((bits & ((1 << 52) - 1)) | (1 << 52));
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let scaled = mantissa * 10;
    if exponent >= 0 {
        return scaled << exponent;
    }
    let shift = exponent.unsigned_abs();
    let whole = scaled >> shift;
    let rem = scaled - (whole << shift);
    whole + u128::from(rem << 1 >= 1 << shift)
}

/// Formats a counter value.
///
/// In `Thousands` format, values divisible by 1000 drop the decimal; others
/// show `n / 1000` as a double rounded to one decimal place, so `1150`
/// renders as `"1.1k"`. Values under 1000 always fall back to grouped output.
pub fn format_count(n: u64, format: NumberFormat) -> String {
    match format {
        NumberFormat::Thousands if n >= 1000 => {
            if n % 1000 == 0 {
                format!("{}k", n / 1000)
            } else {
                let tenths = tenths_of(n as f64 / 1000.0);
                format!("{}.{}k", tenths / 10, tenths % 10)
            }
        }
        _ => group_digits(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_digits_small_numbers_unchanged() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(7), "7");
        assert_eq!(group_digits(999), "999");
    }

    #[test]
    fn group_digits_inserts_separators() {
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(12_480), "12,480");
        assert_eq!(group_digits(1_234_567), "1,234,567");
        assert_eq!(group_digits(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn thousands_format_examples() {
        assert_eq!(format_count(1500, NumberFormat::Thousands), "1.5k");
        assert_eq!(format_count(1000, NumberFormat::Thousands), "1k");
        assert_eq!(format_count(25_000, NumberFormat::Thousands), "25k");
        assert_eq!(format_count(1250, NumberFormat::Thousands), "1.3k");
        assert_eq!(format_count(1999, NumberFormat::Thousands), "2.0k");
        assert_eq!(
            format_count(u64::MAX, NumberFormat::Thousands),
            "18446744073709552.0k"
        );
    }

    #[test]
    fn thousands_rounds_the_stored_double() {
        assert_eq!(format_count(1150, NumberFormat::Thousands), "1.1k");
        assert_eq!(format_count(1450, NumberFormat::Thousands), "1.4k");
        assert_eq!(format_count(2050, NumberFormat::Thousands), "2.0k");
        assert_eq!(format_count(1250, NumberFormat::Thousands), "1.3k");
        assert_eq!(format_count(1750, NumberFormat::Thousands), "1.8k");
        assert_eq!(format_count(1001, NumberFormat::Thousands), "1.0k");
    }

    #[test]
    fn thousands_format_below_1000_is_plain() {
        assert_eq!(format_count(999, NumberFormat::Thousands), "999");
        assert_eq!(format_count(0, NumberFormat::Thousands), "0");
    }

    #[test]
    fn grouped_format_examples() {
        assert_eq!(format_count(999, NumberFormat::Grouped), "999");
        assert_eq!(format_count(1500, NumberFormat::Grouped), "1,500");
    }

    #[test]
    fn from_attr_only_recognizes_k() {
        assert_eq!(NumberFormat::from_attr(Some("k")), NumberFormat::Thousands);
        assert_eq!(NumberFormat::from_attr(Some(" k ")), NumberFormat::Thousands);
        assert_eq!(NumberFormat::from_attr(Some("K")), NumberFormat::Grouped);
        assert_eq!(NumberFormat::from_attr(None), NumberFormat::Grouped);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn grouping_preserves_digits(n: u64) {
                let grouped = group_digits(n);
                prop_assert_eq!(grouped.replace(',', ""), n.to_string());
                for chunk in grouped.split(',').skip(1) {
                    prop_assert_eq!(chunk.len(), 3);
                }
            }

            #[test]
            fn thousands_always_ends_with_k_from_1000(n in 1000_u64..10_000_000) {
                let s = format_count(n, NumberFormat::Thousands);
                prop_assert!(s.ends_with('k'));
                prop_assert!(!s.contains(','));
            }
        }
    }
}
