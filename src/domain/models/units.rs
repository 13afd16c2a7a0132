//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Fixed-point arithmetic for the two denominations the exchange settles in.
//
// Gold quantities are carried as integer milligrams (three fractional digits of a gram) and
// rial amounts as integer minor units. No floating point touches money anywhere in the core;
// `rust_decimal` appears only at the API boundary where gram values enter and leave as decimals.
//
// | Name                  | Description                                | Return Type           |
// |-----------------------|--------------------------------------------|-----------------------|
// | notional              | rial value of a quantity at a unit price   | u64                   |
// | grams_to_milligrams   | decimal grams -> integer milligrams        | Result<u64, UnitError>|
// | milligrams_to_grams   | integer milligrams -> decimal grams        | Decimal               |
//--------------------------------------------------------------------------------------------------

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Scale factor between the displayed unit (grams) and the stored unit (milligrams).
pub const MILLIGRAMS_PER_GRAM: u64 = 1_000;

/// Errors raised while converting boundary decimals into core integer units.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The value carries more than three fractional digits of a gram.
    #[error("Quantity {0} has sub-milligram precision")]
    PrecisionTooFine(Decimal),

    /// The value is negative.
    #[error("Quantity {0} is negative")]
    Negative(Decimal),

    /// The value does not fit the internal integer representation.
    #[error("Quantity {0} is out of range")]
    OutOfRange(Decimal),
}

/// Computes the rial value of `quantity_mg` milligrams at `price_per_gram` rials per gram.
///
/// Runs in `u128` so the intermediate product cannot overflow, then divides back down by the
/// milligram scale with truncation. Every site that prices a quantity (order reservation,
/// trade execution, cancellation refund) goes through this one function so rounding can
/// never disagree between them.
#[inline]
pub fn notional(quantity_mg: u64, price_per_gram: u64) -> u64 {
    ((quantity_mg as u128 * price_per_gram as u128) / MILLIGRAMS_PER_GRAM as u128) as u64
}

/// Converts a decimal gram quantity into integer milligrams.
///
/// # Errors
///
/// * `Negative` - the input is below zero
/// * `PrecisionTooFine` - the input has more than three fractional digits
/// * `OutOfRange` - the scaled value does not fit in a `u64`
pub fn grams_to_milligrams(grams: Decimal) -> Result<u64, UnitError> {
    if grams.is_sign_negative() {
        return Err(UnitError::Negative(grams));
    }

    let scaled = grams
        .checked_mul(Decimal::from(MILLIGRAMS_PER_GRAM))
        .ok_or(UnitError::OutOfRange(grams))?;

    if scaled.fract() != Decimal::ZERO {
        return Err(UnitError::PrecisionTooFine(grams));
    }

    scaled.to_u64().ok_or(UnitError::OutOfRange(grams))
}

/// Converts integer milligrams back into a decimal gram quantity for presentation.
#[inline]
pub fn milligrams_to_grams(quantity_mg: u64) -> Decimal {
    Decimal::from(quantity_mg) / Decimal::from(MILLIGRAMS_PER_GRAM)
}
