//! # Fee Calculator
//!
//! Pure mapping from `(category, minutes parked, has discount)` to the amount
//! owed. No state, no clock, no failure modes.
//!
//! ## Tariff
//!
//! | Minutes parked | Gross fee |
//! |----------------|-----------|
//! | `0..=120` | base rate |
//! | `> 120` | base rate + `ceil((m - 120) / 15)` × `base / 4` |
//!
//! A discount card takes 15% off the gross fee, rounded down to a whole unit.
//! All arithmetic is integer; nothing here touches floating point.

use crate::category::VehicleCategory;
use crate::primitives::{BASE_WINDOW_MINUTES, DISCOUNT_PERCENT, OVERAGE_BLOCK_MINUTES};
use crate::types::Amount;
use serde::{Deserialize, Serialize};

/// Itemised fee, as printed on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Flat charge for the base window.
    pub base_rate: Amount,
    /// Number of started overage blocks.
    pub overage_blocks: u64,
    /// Price of a single overage block.
    pub block_rate: Amount,
    /// Base rate plus overage, before any discount.
    pub gross: Amount,
    /// Amount taken off by the discount card (zero without one).
    pub discount: Amount,
    /// What the driver pays.
    pub total: Amount,
}

/// The tariff engine.
pub struct FeeCalculator;

impl FeeCalculator {
    /// Amount owed for a stay.
    #[must_use]
    pub fn compute_fee(category: VehicleCategory, minutes: u64, has_discount: bool) -> Amount {
        Self::breakdown(category, minutes, has_discount).total
    }

    /// Itemised version of [`FeeCalculator::compute_fee`].
    #[must_use]
    pub fn breakdown(category: VehicleCategory, minutes: u64, has_discount: bool) -> FeeBreakdown {
        let base_rate = category.base_rate();
        let block_rate = category.block_rate();
        let overage_blocks = Self::overage_blocks(minutes);

        let gross = Amount::new(
            base_rate
                .value()
                .saturating_add(overage_blocks.saturating_mul(block_rate.value())),
        );

        let total = if has_discount {
            Self::apply_discount(gross)
        } else {
            gross
        };

        FeeBreakdown {
            base_rate,
            overage_blocks,
            block_rate,
            gross,
            discount: Amount::new(gross.value() - total.value()),
            total,
        }
    }

    /// Started 15-minute blocks beyond the base window.
    ///
    /// The window boundary is inclusive: exactly 120 minutes yields zero.
    #[must_use]
    pub fn overage_blocks(minutes: u64) -> u64 {
        minutes
            .saturating_sub(BASE_WINDOW_MINUTES)
            .div_ceil(OVERAGE_BLOCK_MINUTES)
    }

    /// Take the discount off and floor to a whole unit.
    fn apply_discount(gross: Amount) -> Amount {
        let kept = 100 - DISCOUNT_PERCENT;
        // Widen so `u64::MAX * 85` cannot overflow.
        let discounted = u128::from(gross.value()) * u128::from(kept) / 100;
        Amount::new(u64::try_from(discounted).unwrap_or(u64::MAX))
    }
}

// =============================================================================
// TESTS
// =============================================================================
