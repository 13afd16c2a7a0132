//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Commission calculation for executed trades. A pure function of the matched quantity and
// matched notional: the quantity selects a tier rate, the rate is applied to the notional,
// and the result is clamped into the configured floor/ceiling band.
//
// | Name                | Description                                    | Return Type    |
// |---------------------|------------------------------------------------|----------------|
// | CommissionSchedule  | Tier rates plus floor/ceiling clamps           | struct         |
// | rate_ppm            | Tier rate for a matched quantity               | u64            |
// | commission          | Fee for a matched quantity and notional        | u64            |
//--------------------------------------------------------------------------------------------------

use crate::domain::models::units::MILLIGRAMS_PER_GRAM;

/// Floor for any charged commission, in rials.
pub const MIN_COMMISSION: u64 = 500_000;

/// Ceiling for any charged commission, in rials.
pub const MAX_COMMISSION: u64 = 50_000_000;

/// Rate precision: rates are expressed in parts per million of the notional.
pub const RATE_PRECISION: u64 = 1_000_000;

/// 2% rate for matches up to one gram.
const RATE_UP_TO_ONE_GRAM: u64 = 20_000;

/// 1.5% rate for matches up to ten grams.
const RATE_UP_TO_TEN_GRAMS: u64 = 15_000;

/// 1% rate for bulk matches above ten grams.
const RATE_BULK: u64 = 10_000;

/// Tiered commission schedule with floor and ceiling clamps.
///
/// The default schedule carries the production tiers and clamps; the clamps are
/// parameters so tests can exercise the band edges without astronomical notionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionSchedule {
    min_commission: u64,
    max_commission: u64,
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        Self {
            min_commission: MIN_COMMISSION,
            max_commission: MAX_COMMISSION,
        }
    }
}

impl CommissionSchedule {
    /// Creates a schedule with explicit clamp bounds.
    pub fn with_clamps(min_commission: u64, max_commission: u64) -> Self {
        Self {
            min_commission,
            max_commission,
        }
    }

    /// Selects the tier rate (parts per million) for a matched quantity in milligrams.
    ///
    /// Small retail matches pay the highest rate, bulk matches the lowest.
    #[inline]
    pub fn rate_ppm(quantity_mg: u64) -> u64 {
        if quantity_mg <= MILLIGRAMS_PER_GRAM {
            RATE_UP_TO_ONE_GRAM
        } else if quantity_mg <= 10 * MILLIGRAMS_PER_GRAM {
            RATE_UP_TO_TEN_GRAMS
        } else {
            RATE_BULK
        }
    }

    /// Computes the commission for a match.
    ///
    /// The tier rate selected by `quantity_mg` is applied to `notional` (u128 intermediate,
    /// truncating), the result is clamped to the `[min, max]` band, and finally capped at
    /// the notional itself so a clamp floor can never charge more than the traded value.
    pub fn commission(&self, quantity_mg: u64, notional: u64) -> u64 {
        let rate = Self::rate_ppm(quantity_mg);
        let raw = ((notional as u128 * rate as u128) / RATE_PRECISION as u128) as u64;
        raw.max(self.min_commission)
            .min(self.max_commission)
            .min(notional)
    }
}
