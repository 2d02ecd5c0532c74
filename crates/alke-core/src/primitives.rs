//! # Tariff Primitives
//!
//! Hardcoded constants for the Alke lot.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! Only the lot capacity may be overridden (by configuration); the tariff
//! itself cannot.

/// Number of vehicles a lot admits when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 20;

/// Length of the flat-rate window, in minutes.
///
/// A stay of exactly `BASE_WINDOW_MINUTES` is still billed at the base rate.
pub const BASE_WINDOW_MINUTES: u64 = 120;

/// Length of one overage block, in minutes.
///
/// Partial blocks are billed as full blocks.
pub const OVERAGE_BLOCK_MINUTES: u64 = 15;

/// Each overage block costs `base_rate / OVERAGE_RATE_DIVISOR`.
///
/// The division truncates, so categories whose base rate is not a multiple
/// of four lose the remainder on every block.
pub const OVERAGE_RATE_DIVISOR: u64 = 4;

/// Percentage taken off the gross fee when a discount card is present.
pub const DISCOUNT_PERCENT: u64 = 15;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for a license plate, in bytes.
pub const MAX_PLATE_LENGTH: usize = 16;

/// Maximum length for a discount card token, in bytes.
///
/// The token is never validated against a registry; this only bounds memory.
pub const MAX_DISCOUNT_CARD_LENGTH: usize = 64;
