//! Pre-flight checks for pulling tokens out of a granter's token account.
//!
//! The signer may move tokens either as the account owner or as its SPL delegate; the
//! delegate path is the allowance-based pull (`transferFrom`).

use anchor_lang::prelude::*;
use core::result::Result;

use crate::error::StoneError;

/// Snapshot of the fields of an SPL token account that matter for a pull.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceAccount {
    pub owner: Pubkey,
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
}

/// Verify that `signer` may move `amount` out of `source`.
pub fn ensure_can_pull(source: &SourceAccount, signer: &Pubkey, amount: u64) -> Result<(), StoneError> {
    if source.owner != *signer {
        match source.delegate {
            Some(d) if d == *signer => {
                if source.delegated_amount < amount {
                    return Err(StoneError::InsufficientAllowance);
                }
            }
            _ => return Err(StoneError::InsufficientAllowance),
        }
    }
    if source.amount < amount {
        return Err(StoneError::InsufficientBalance);
    }
    Ok(())
}
