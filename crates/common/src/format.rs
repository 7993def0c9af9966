//! Locale display helpers (Brazilian Portuguese: `,` as decimal separator).
//!
//! Purely cosmetic, applied only when a number leaves the process as text.

/// Shortest round-trip representation of `value` with `,` as decimal separator.
pub fn display_decimal(value: f64) -> String {
    value.to_string().replacen('.', ",", 1)
}

/// `ratio` as a percentage with one decimal place, e.g. `0.0123` → `"1,2"`.
///
/// Exact ties round away from zero: `0.0025` → `"0,3"`, `-0.0025` → `"-0,3"`.
pub fn display_percent(ratio: f64) -> String {
    format!("{:.1}", round_half_away(ratio * 100.0)).replacen('.', ",", 1)
}

/// Round to one decimal, ties away from zero. Only values whose tenths are
/// exactly `x.5` in binary are ties; everything else keeps nearest rounding.
fn round_half_away(value: f64) -> f64 {
    let tenths = value * 10.0;
    // Zero residual means `value * 10` was computed without rounding
    let exact = value.mul_add(10.0, -tenths) == 0.0;
    if exact && tenths.fract().abs() == 0.5 {
        tenths.round() / 10.0
    } else {
        value
    }
}
