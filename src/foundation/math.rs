use std::f64::consts::TAU;

/// Gaussian bump `amp * exp(-(x - center)^2 / (2 * width^2))`.
pub(crate) fn gaussian(x: f64, center: f64, width: f64, amp: f64) -> f64 {
    let d = x - center;
    amp * (-(d * d) / (2.0 * width * width)).exp()
}

/// Full-width sinusoid `amp * sin(2π * freq * x + phase)`.
pub(crate) fn sine(x: f64, freq: f64, phase: f64, amp: f64) -> f64 {
    amp * (TAU * freq * x + phase).sin()
}

/// Fixed two-decimal formatting used for every path coordinate.
///
/// Rust's float formatting never consults the locale. Negative zero is folded to `0.00` so
/// tiny negative values do not change the byte stream.
pub(crate) fn fixed2(v: f64) -> String {
    let s = format!("{v:.2}");
    if s == "-0.00" { "0.00".to_string() } else { s }
}

/// Shortest round-trip formatting for dimensions and stroke widths (`600`, `1.5`).
pub(crate) fn shortest(v: f64) -> String {
    if v == 0.0 { "0".to_string() } else { format!("{v}") }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
