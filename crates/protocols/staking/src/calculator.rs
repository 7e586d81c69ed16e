//! Staking calculator
//!
//! Pure math for previews, amount validation, and the annualized yield
//! estimate. No I/O, no async.
//!
//! # Units
//!
//! - Display amounts: XLM / sXLM as f64 (7 decimals)
//! - Exchange rate: XLM per 1 sXLM, starts at 1.0 and grows as yield accrues

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use lumenvault_core::{constants, units, ProtocolError};

/// Fee headroom the user must keep in the native asset when staking (1 XLM)
pub const STAKE_FEE_HEADROOM_XLM: f64 = 1.0;

/// Display ceiling for the yield estimate
const APY_CAP_PCT: f64 = 999.0;

/// Minimum observed span before a yield estimate is produced. Anything
/// shorter annualizes refresh-interval noise.
const MIN_OBSERVATION: Duration = Duration::from_secs(3600);

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;

/// sXLM received for staking `xlm` at the current exchange rate
pub fn stake_preview(xlm: f64, exchange_rate: f64) -> f64 {
    if exchange_rate <= 0.0 {
        return 0.0;
    }
    xlm / exchange_rate
}

/// XLM received for unstaking `sxlm` at the current exchange rate
pub fn unstake_preview(sxlm: f64, exchange_rate: f64) -> f64 {
    sxlm * exchange_rate
}

/// Validate a stake amount against the native balance. Staking must leave
/// fee headroom in the account.
pub fn validate_stake_amount(amount_xlm: f64, native_balance_xlm: f64) -> Result<(), ProtocolError> {
    validate_minimum(amount_xlm)?;
    let spendable = native_balance_xlm - STAKE_FEE_HEADROOM_XLM;
    if amount_xlm > spendable {
        return Err(ProtocolError::InsufficientBalance {
            required: amount_xlm + STAKE_FEE_HEADROOM_XLM,
            available: native_balance_xlm,
        });
    }
    Ok(())
}

/// Validate an unstake amount against the sXLM balance
pub fn validate_unstake_amount(
    amount_sxlm: f64,
    share_balance_sxlm: f64,
) -> Result<(), ProtocolError> {
    validate_minimum(amount_sxlm)?;
    if amount_sxlm > share_balance_sxlm {
        return Err(ProtocolError::InsufficientBalance {
            required: amount_sxlm,
            available: share_balance_sxlm,
        });
    }
    Ok(())
}

fn validate_minimum(amount: f64) -> Result<(), ProtocolError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ProtocolError::InvalidAmount {
            message: "amount must be positive".to_string(),
        });
    }
    let min = units::stroops_to_xlm(constants::MIN_AMOUNT_STROOPS);
    if amount < min {
        return Err(ProtocolError::InvalidAmount {
            message: format!("minimum amount is {} XLM", min),
        });
    }
    Ok(())
}

/// Annualized yield projected from observed rate growth.
///
/// A display estimate, not an on-chain quantity: it projects the growth
/// seen over the observed span and assumes it continues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub apy_pct: f64,
    /// Span the estimate was projected from
    pub observed: Duration,
}

/// Tracks observed exchange-rate samples and derives the yield estimate
/// from the actual elapsed span between the first and latest sample.
#[derive(Debug, Default)]
pub struct RateTracker {
    first: Option<(Instant, f64)>,
    latest: Option<(Instant, f64)>,
}

impl RateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, rate: f64) {
        self.record_at(Instant::now(), rate);
    }

    /// Record a sample with an explicit timestamp (injectable for tests)
    pub fn record_at(&mut self, at: Instant, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            return;
        }
        if self.first.is_none() {
            self.first = Some((at, rate));
        }
        self.latest = Some((at, rate));
    }

    /// `None` until two samples span at least the minimum observation window
    pub fn estimate_apy(&self) -> Option<YieldEstimate> {
        let (first_at, first_rate) = self.first?;
        let (latest_at, latest_rate) = self.latest?;

        let observed = latest_at.checked_duration_since(first_at)?;
        if observed < MIN_OBSERVATION {
            return None;
        }

        let growth = (latest_rate - first_rate) / first_rate;
        let apy_pct = growth / observed.as_secs_f64() * SECONDS_PER_YEAR * 100.0;

        Some(YieldEstimate {
            apy_pct: apy_pct.min(APY_CAP_PCT),
            observed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previews_at_rate_one_point_one() {
        // 1 sXLM = 1.1 XLM: unstaking 5.0 sXLM previews 5.5 XLM
        let preview = unstake_preview(5.0, 1.1);
        assert!((preview - 5.5).abs() < 1e-9);

        // Staking converts the other way
        let preview = stake_preview(11.0, 1.1);
        assert!((preview - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_stake_preview_guards_zero_rate() {
        assert_eq!(stake_preview(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_stake_validation() {
        assert!(validate_stake_amount(10.0, 50.0).is_ok());

        // Below the 0.1 minimum
        assert!(matches!(
            validate_stake_amount(0.05, 50.0),
            Err(ProtocolError::InvalidAmount { .. })
        ));

        // Must leave 1 XLM headroom
        assert!(matches!(
            validate_stake_amount(49.5, 50.0),
            Err(ProtocolError::InsufficientBalance { .. })
        ));

        assert!(matches!(
            validate_stake_amount(-1.0, 50.0),
            Err(ProtocolError::InvalidAmount { .. })
        ));
        assert!(matches!(
            validate_stake_amount(f64::NAN, 50.0),
            Err(ProtocolError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_unstake_validation() {
        assert!(validate_unstake_amount(5.0, 5.0).is_ok());
        assert!(matches!(
            validate_unstake_amount(5.1, 5.0),
            Err(ProtocolError::InsufficientBalance { .. })
        ));
        assert!(matches!(
            validate_unstake_amount(0.0, 5.0),
            Err(ProtocolError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_yield_estimate_needs_observation_window() {
        let mut tracker = RateTracker::new();
        assert!(tracker.estimate_apy().is_none());

        let now = Instant::now();
        tracker.record_at(now, 1.0);
        assert!(tracker.estimate_apy().is_none());

        // 30 seconds later: still inside the minimum window
        tracker.record_at(now + Duration::from_secs(30), 1.0001);
        assert!(tracker.estimate_apy().is_none());
    }

    #[test]
    fn test_yield_estimate_annualizes_observed_growth() {
        let mut tracker = RateTracker::new();
        let now = Instant::now();
        tracker.record_at(now, 1.0);
        // 1% growth over ~7 days
        tracker.record_at(now + Duration::from_secs(7 * 86_400), 1.01);

        let estimate = tracker.estimate_apy().unwrap();
        // 1% / 7 days, annualized: ~52.1%
        assert!((estimate.apy_pct - 52.142857).abs() < 0.01);
        assert_eq!(estimate.observed, Duration::from_secs(7 * 86_400));
    }

    #[test]
    fn test_yield_estimate_is_capped() {
        let mut tracker = RateTracker::new();
        let now = Instant::now();
        tracker.record_at(now, 1.0);
        // Doubling in two hours annualizes to an absurd figure
        tracker.record_at(now + Duration::from_secs(7200), 2.0);

        assert_eq!(tracker.estimate_apy().unwrap().apy_pct, 999.0);
    }

    #[test]
    fn test_tracker_ignores_bad_samples() {
        let mut tracker = RateTracker::new();
        let now = Instant::now();
        tracker.record_at(now, 0.0);
        tracker.record_at(now, f64::NAN);
        assert!(tracker.estimate_apy().is_none());
    }
}
