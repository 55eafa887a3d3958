//! Fixed-point natural-log table.

/// Number of entries in the stock table.
pub const DEFAULT_SIZE: usize = 32784;

/// Fixed-point scale: four decimal digits.
pub const SCALE: f64 = 10000.0;

/// Fixed-point value of `ln(n)`, truncated toward zero.
///
/// `n` is 1-based; `ln(1)` is zero.
pub fn scaled_ln(n: usize) -> u32 {
    // `as` truncates toward zero; rounding here would drift from the stock output.
    ((n as f64).ln() * SCALE) as u32
}

/// Computes `size` scaled log values.
///
/// Element `i` (0-based) is `floor(ln(i + 1) * 10000)`. A zero `size`
/// yields an empty table.
pub fn compute_table(size: usize) -> Vec<u32> {
    (1..=size).map(scaled_ln).collect()
}
