//! Display formatting for supply and market values.
//!
//! Output follows the `en-US` locale conventions front-end clients already
//! expect: comma thousands separators, `.` decimal point, `$` for currency.

/// Fraction digits used for prices below one cent.
const SMALL_PRICE_FRACTION_DIGITS: usize = 10;

/// Values below this are rendered with [`SMALL_PRICE_FRACTION_DIGITS`] and no grouping.
const SMALL_PRICE_THRESHOLD: f64 = 0.01;

/// Enough fraction digits to print any `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Format a plain number with thousands separators and at most 3 fraction digits.
///
/// Trailing zeros are dropped, so whole numbers render without a decimal point:
/// `999999998.0` becomes `"999,999,998"` and `999999499.5` becomes `"999,999,499.5"`.
/// Halfway values round away from zero (`1.0625` becomes `"1.063"`).
pub fn format_number(value: f64) -> String {
    format_grouped(value, 0, 3)
}

/// Format a USD amount.
///
/// Amounts of at least one cent get 2 to 6 fraction digits with grouping
/// (`"$42,000.00"`). Smaller amounts keep exactly 10 fraction digits and no
/// grouping so tiny token prices stay readable (`"$0.0042000000"`).
pub fn format_price(value: f64) -> String {
    if value >= SMALL_PRICE_THRESHOLD {
        format!("${}", format_grouped(value, 2, 6))
    } else {
        format!("${}", format_fixed(value, SMALL_PRICE_FRACTION_DIGITS))
    }
}

/// Round the shortest round-trip digits of `value` to `max_frac` places, trim
/// trailing zeros down to `min_frac`, and group the integer part.
///
/// Negative values keep their sign even when they round to zero (`"-0"`).
fn format_grouped(value: f64, min_frac: usize, max_frac: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Display for f64 never uses exponent notation
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = split_decimal(&shortest);
    let (int_part, frac_part) = round_half_up(int_part, frac_part, max_frac);

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min_frac {
        frac.push('0');
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, group_thousands(&int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(&int_part), frac)
    }
}

/// Exactly `frac_digits` fraction digits, rounding the exact binary value with
/// halfway cases going away from zero. No grouping.
fn format_fixed(value: f64, frac_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = split_decimal(&exact);
    let (int_part, mut frac) = round_half_up(int_part, frac_part, frac_digits);
    while frac.len() < frac_digits {
        frac.push('0');
    }

    let sign = if value < 0.0 { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, int_part)
    } else {
        format!("{}{}.{}", sign, int_part, frac)
    }
}

fn split_decimal(digits: &str) -> (&str, &str) {
    digits.split_once('.').unwrap_or((digits, ""))
}

/// Cut `frac_part` to `places` digits, rounding up when the first dropped
/// digit is 5 or more. Both parts must be ASCII digits.
fn round_half_up(int_part: &str, frac_part: &str, places: usize) -> (String, String) {
    if frac_part.len() <= places {
        return (int_part.to_string(), frac_part.to_string());
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .collect();

    if frac_part.as_bytes()[places] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - places;
    let frac = String::from_utf8_lossy(&digits[split..]).into_owned();
    let int = String::from_utf8_lossy(&digits[..split]).into_owned();
    (int, frac)
}

/// Insert a comma between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
