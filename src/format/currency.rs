use rust_decimal::{Decimal, RoundingStrategy};

use super::Locale;

const CURRENCY_LOCALE: Locale = Locale::EsCo;
const USD_SYMBOL: &str = "US$";

/// Formats a USD amount under the Spanish (Colombia) convention.
///
/// `1234.5` renders as `US$ 1.234,50`: `.` groups thousands, `,` separates
/// decimals, two fraction digits always, sign ahead of the symbol.
/// Non-finite input renders as the `nan` sentinel.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "nan".to_owned();
    }
    let text = format!("{:.2}", amount.abs());
    render(amount.is_sign_negative(), &text)
}

/// Exact-decimal variant of [`format_currency`] for server-sent amounts.
///
/// Rounds midpoints away from zero at two fraction digits before rendering,
/// so `2.345` becomes `US$ 2,35` without binary float artifacts.
#[must_use]
pub fn format_currency_decimal(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let mut text = rounded.abs().to_string();
    match text.find('.') {
        None => text.push_str(".00"),
        Some(dot) => {
            for _ in (text.len() - dot - 1)..2 {
                text.push('0');
            }
        }
    }
    render(rounded < Decimal::ZERO, &text)
}

fn render(negative: bool, unsigned_fixed: &str) -> String {
    let (int_digits, fraction_digits) = unsigned_fixed
        .split_once('.')
        .unwrap_or((unsigned_fixed, ""));
    let mut out = String::with_capacity(unsigned_fixed.len() + USD_SYMBOL.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(USD_SYMBOL);
    out.push(' ');
    push_grouped(&mut out, int_digits);
    if !fraction_digits.is_empty() {
        out.push(CURRENCY_LOCALE.decimal_separator());
        out.push_str(fraction_digits);
    }
    out
}

// Grouping runs over the plain ASCII digit run produced by fixed-point
// formatting; the sign is stripped before this point.
fn push_grouped(out: &mut String, int_digits: &str) {
    let len = int_digits.len();
    for (idx, ch) in int_digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(CURRENCY_LOCALE.grouping_separator());
        }
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{format_currency, format_currency_decimal};

    #[test]
    fn grouping_starts_at_four_integer_digits() {
        assert_eq!(format_currency(999.0), "US$ 999,00");
        assert_eq!(format_currency(1_000.0), "US$ 1.000,00");
    }

    #[test]
    fn grouping_repeats_every_three_digits() {
        assert_eq!(format_currency(1_234_567.89), "US$ 1.234.567,89");
    }

    #[test]
    fn decimal_variant_pads_short_scales() {
        assert_eq!(format_currency_decimal(Decimal::new(12345, 1)), "US$ 1.234,50");
        assert_eq!(format_currency_decimal(Decimal::from(7)), "US$ 7,00");
    }

    #[test]
    fn decimal_variant_rounds_midpoints_away_from_zero() {
        assert_eq!(format_currency_decimal(Decimal::new(2345, 3)), "US$ 2,35");
        assert_eq!(format_currency_decimal(Decimal::new(-2345, 3)), "-US$ 2,35");
    }
}
