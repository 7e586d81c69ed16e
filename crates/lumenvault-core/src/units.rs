//! Fixed-point conversion between stroops and display XLM
//!
//! Pure functions, no I/O. Display amounts are stroops / 10^7.
//! Conversion from display to stroops truncates; callers must not assume
//! `to_display(to_stroops(x))` round-trips for values that are not already
//! aligned to the configured decimals.

use crate::types::constants::DECIMALS;
use crate::types::Stroops;

/// Scale factor for a given decimal precision
fn scale(decimals: u32) -> f64 {
    10f64.powi(decimals as i32)
}

/// Convert a display amount to the smallest unit: `floor(display * 10^decimals)`.
/// Never fails. Negative input is a caller contract violation; amounts are
/// validated positive before conversion.
pub fn to_smallest_unit(display: f64, decimals: u32) -> Stroops {
    (display * scale(decimals)).floor() as Stroops
}

/// Convert a smallest-unit amount to its display value.
/// Accepts the full i128 range; wide balances lose sub-stroop precision in
/// the f64 result but are never corrupted by overflow.
pub fn to_display(smallest: Stroops, decimals: u32) -> f64 {
    smallest as f64 / scale(decimals)
}

/// Display-to-stroops at the native asset's 7 decimals
pub fn xlm_to_stroops(xlm: f64) -> Stroops {
    to_smallest_unit(xlm, DECIMALS)
}

/// Stroops-to-display at the native asset's 7 decimals
pub fn stroops_to_xlm(stroops: Stroops) -> f64 {
    to_display(stroops, DECIMALS)
}

/// Parse a decimal string (as returned by ledger balance queries) into a
/// display amount.
pub fn display_from_str(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_xlm_is_one_hundred_million_stroops() {
        assert_eq!(xlm_to_stroops(10.0), 100_000_000);
    }

    #[test]
    fn test_round_trip_for_aligned_amounts() {
        for xlm in [0.0, 0.1, 1.0, 2.5, 5.5, 10.0, 42.4242424, 1234.5] {
            let stroops = xlm_to_stroops(xlm);
            assert_eq!(stroops_to_xlm(stroops), xlm, "round trip for {}", xlm);
        }
    }

    #[test]
    fn test_truncation_is_one_directional() {
        // Finer than 7 decimals: truncated, not rounded
        assert_eq!(xlm_to_stroops(0.000_000_019), 0);
        assert_eq!(xlm_to_stroops(1.000_000_09), 10_000_000);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let samples = [0.0, 0.000_000_1, 0.1, 0.5, 1.0, 1.000_000_1, 7.3, 100.0, 1e9];
        for pair in samples.windows(2) {
            assert!(
                xlm_to_stroops(pair[0]) <= xlm_to_stroops(pair[1]),
                "monotonicity violated between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_wide_balance_does_not_overflow() {
        // Far beyond u64 range; conversion must stay finite and positive
        let wide: Stroops = 1_000_000_000_000_000_000_000_000;
        let display = stroops_to_xlm(wide);
        assert!(display.is_finite());
        assert!(display > 0.0);
    }

    #[test]
    fn test_display_from_str() {
        assert_eq!(display_from_str("10.5"), Some(10.5));
        assert_eq!(display_from_str("  3 "), Some(3.0));
        assert_eq!(display_from_str("NaN"), None);
        assert_eq!(display_from_str("not a number"), None);
    }
}
