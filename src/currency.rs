use std::iter;

/// Renders `value` as `<symbol><amount>` with thousands separators and
/// exactly two decimal places, e.g. `£1,234,567.00`.
///
/// Rounding is half-up at the cent, applied to the shortest decimal form of
/// the value. That form is what the value was written as, so `1234.005`
/// renders as `£1,234.01` even though the nearest binary float is slightly
/// below it.
pub fn float_to_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{}{}", symbol, value);
    }

    let repr = value.abs().to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    // Whole digits followed by exactly two cent digits.
    let mut fraction = fraction.bytes().chain(iter::repeat(b'0'));
    let mut digits: Vec<u8> = whole.bytes().map(|b| b - b'0').collect();
    for _ in 0..2 {
        digits.push(fraction.next().unwrap_or(b'0') - b'0');
    }

    if fraction.next().unwrap_or(b'0') >= b'5' {
        round_up(&mut digits);
    }

    let cents = digits.split_off(digits.len() - 2);
    let negative = value < 0.0 && digits.iter().chain(cents.iter()).any(|d| *d != 0);

    format!(
        "{}{}{}.{}{}",
        symbol,
        if negative { "-" } else { "" },
        group_thousands(&digits),
        cents[0],
        cents[1]
    )
}

/// Adds one to the last digit, carrying leftwards. A run of nines grows a
/// new leading digit: 999.99 rounded up (from 999.995) becomes 1,000.00.
fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

fn group_thousands(digits: &[u8]) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(b'0' + digit));
    }
    grouped
}
