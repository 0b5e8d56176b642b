//! Lenient parsing for values typed in by hand. Anything that does not parse
//! to a finite, non-negative number becomes 0 instead of an error.

pub fn coerce_f64(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Fractional input is truncated, as a whole-number field would.
pub fn coerce_u32(text: &str) -> u32 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return value;
    }
    let value = coerce_f64(trimmed).trunc();
    if value > u32::MAX as f64 {
        return 0;
    }
    value as u32
}
