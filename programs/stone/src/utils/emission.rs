//! Epoch arithmetic for the emission scheduler.
//! - an epoch is `EPOCH_DURATION` seconds; a mint is allowed once at least one full epoch elapsed
//! - the emission amount compounds by GROWTH_NUMERATOR / GROWTH_DENOMINATOR per whole elapsed epoch
//! - every step floors, so results are deterministic across validators

use crate::constants::{
    EPOCH_DURATION, GENESIS_EPOCH_TOKENS, GROWTH_DENOMINATOR, GROWTH_NUMERATOR, MAX_MINT_DECIMALS,
};
use crate::error::StoneError;

/// Base emission in base units for a mint with `decimals` decimals.
pub fn genesis_epoch_amount(decimals: u8) -> Result<u64, StoneError> {
    if decimals > MAX_MINT_DECIMALS {
        return Err(StoneError::InvalidTokenMint);
    }
    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or(StoneError::MathOverflow)?;
    let v = (GENESIS_EPOCH_TOKENS as u128)
        .checked_mul(scale)
        .ok_or(StoneError::MathOverflow)?;
    u64::try_from(v).map_err(|_| StoneError::MathOverflow)
}

/// Number of whole epochs between `epoch_start` and `now`.
/// Fails with `EpochNotElapsed` unless at least one full epoch has passed.
pub fn elapsed_epochs(now_ts: i64, epoch_start: i64) -> Result<u64, StoneError> {
    let elapsed = now_ts
        .checked_sub(epoch_start)
        .ok_or(StoneError::MathOverflow)?;
    if elapsed < EPOCH_DURATION {
        return Err(StoneError::EpochNotElapsed);
    }
    Ok((elapsed / EPOCH_DURATION) as u64)
}

/// Apply one growth step per epoch, flooring after each step.
pub fn compound(amount: u64, epochs: u64) -> Result<u64, StoneError> {
    let mut v = amount as u128;
    for _ in 0..epochs {
        v = v
            .checked_mul(GROWTH_NUMERATOR)
            .ok_or(StoneError::MathOverflow)?
            / GROWTH_DENOMINATOR;
        if v > u64::MAX as u128 {
            return Err(StoneError::MathOverflow);
        }
    }
    Ok(v as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECIMALS: u8 = 9;
    const UNIT: u64 = 1_000_000_000;

    #[test]
    fn genesis_scales_with_decimals() {
        assert_eq!(genesis_epoch_amount(0).unwrap(), 50_000);
        assert_eq!(genesis_epoch_amount(DECIMALS).unwrap(), 50_000 * UNIT);
        assert_eq!(
            genesis_epoch_amount(6).unwrap(),
            50_000 * 1_000_000
        );
    }

    #[test]
    fn genesis_rejects_oversized_decimals() {
        assert_eq!(
            genesis_epoch_amount(MAX_MINT_DECIMALS).unwrap(),
            5_000_000_000_000_000_000
        );
        assert!(matches!(
            genesis_epoch_amount(MAX_MINT_DECIMALS + 1),
            Err(StoneError::InvalidTokenMint)
        ));
        assert!(matches!(
            genesis_epoch_amount(18),
            Err(StoneError::InvalidTokenMint)
        ));
    }

    #[test]
    fn epoch_boundary_inclusive() {
        let start = 1_700_000_000;
        assert!(matches!(
            elapsed_epochs(start, start),
            Err(StoneError::EpochNotElapsed)
        ));
        assert!(matches!(
            elapsed_epochs(start + EPOCH_DURATION - 1, start),
            Err(StoneError::EpochNotElapsed)
        ));
        assert_eq!(elapsed_epochs(start + EPOCH_DURATION, start).unwrap(), 1);
        assert_eq!(
            elapsed_epochs(start + 2 * EPOCH_DURATION - 1, start).unwrap(),
            1
        );
        assert_eq!(elapsed_epochs(start + 2 * EPOCH_DURATION, start).unwrap(), 2);
    }

    #[test]
    fn clock_before_start_is_not_elapsed() {
        assert!(matches!(
            elapsed_epochs(100, 1_000),
            Err(StoneError::EpochNotElapsed)
        ));
    }

    #[test]
    fn one_epoch_grows_by_half_percent() {
        let e0 = genesis_epoch_amount(DECIMALS).unwrap();
        assert_eq!(compound(e0, 0).unwrap(), e0);
        assert_eq!(compound(e0, 1).unwrap(), 50_250 * UNIT);
    }

    #[test]
    fn growth_compounds_per_epoch() {
        let e0 = 50_000 * UNIT;
        // 50_000 * 1.005^2 = 50_501.25
        assert_eq!(compound(e0, 2).unwrap(), 50_501_250_000_000);
        assert_eq!(
            compound(compound(e0, 1).unwrap(), 1).unwrap(),
            compound(e0, 2).unwrap()
        );
    }

    #[test]
    fn growth_floors_each_step() {
        // 999 * 1.005 = 1003.995 -> 1003; 1003 * 1.005 = 1008.015 -> 1008
        assert_eq!(compound(999, 1).unwrap(), 1003);
        assert_eq!(compound(999, 2).unwrap(), 1008);
    }

    #[test]
    fn growth_overflow_is_reported() {
        assert!(matches!(
            compound(u64::MAX, 1),
            Err(StoneError::MathOverflow)
        ));
    }
}
