//! Locale-style currency formatting: space-grouped thousands and a comma as
//! the decimal separator, e.g. `1234567.891` at precision 2 becomes
//! `"1 234 567,89"`.

/// Separator placed between groups of three integer digits.
const GROUP_SEPARATOR: char = ' ';

/// Separator placed between the integer and fractional digits.
const DECIMAL_SEPARATOR: char = ',';

/// Formats `value` as currency with exactly `precision` fractional digits.
///
/// Rounding follows Rust's fixed-precision float formatting: the exact binary
/// value is expanded and rounded to nearest, with exact ties going to the even
/// digit (`0.125` at precision 2 gives `"0,12"`). Negative values that round
/// to zero keep their sign (`-0.001` at precision 2 gives `"-0,00"`).
///
/// The sign stays attached to the leading digit group, so `-1000` at
/// precision 0 gives `"-1 000"`.
pub fn format(value: f64, precision: usize) -> String {
    let fixed = format!("{value:.precision$}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut formatted = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    formatted.push_str(sign);
    push_grouped(&mut formatted, integer);
    if precision > 0 {
        formatted.push(DECIMAL_SEPARATOR);
        formatted.push_str(fraction);
    }
    formatted
}

/// Appends ASCII `digits` to `out` in groups of three counted from the right.
fn push_grouped(out: &mut String, digits: &str) {
    let leading = digits.len() % 3;
    let (head, tail) = digits.split_at(leading);
    out.push_str(head);
    for (index, group) in tail.as_bytes().chunks(3).enumerate() {
        if index > 0 || !head.is_empty() {
            out.push(GROUP_SEPARATOR);
        }
        // Digits produced by float formatting are always ASCII.
        out.extend(group.iter().map(|&digit| digit as char));
    }
}
