//! Confidence arithmetic shared by every scoring stage
//!
//! Severity and confidence values are clamped at every update so that no
//! stage can push a stored value outside `[0, 1]`.

/// Clamp a score into `[0, 1]`. NaN collapses to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Round to two decimal places (the precision reported to users)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(0.42), 0.42);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.3700000001), 0.37);
        assert_eq!(round2(0.856), 0.86);
        assert_eq!(round2(0.3), 0.3);
    }
}
