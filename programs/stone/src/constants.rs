//! Program-wide constants.

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Length of one emission epoch.
pub const EPOCH_DURATION: i64 = 90 * SECONDS_PER_DAY;

/// Whole tokens minted at the first epoch boundary, before scaling by mint decimals.
pub const GENESIS_EPOCH_TOKENS: u64 = 50_000;

/// Per-epoch growth of the emission amount (x1.005), applied with floor division.
pub const GROWTH_NUMERATOR: u128 = 1_005;
pub const GROWTH_DENOMINATOR: u128 = 1_000;

/// Largest mint decimals for which the genesis amount fits in u64
/// (50_000 * 10^14 = 5e18 < u64::MAX; 10^15 overflows).
pub const MAX_MINT_DECIMALS: u8 = 14;
