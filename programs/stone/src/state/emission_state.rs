use anchor_lang::prelude::*;
use core::result::Result;

use crate::error::StoneError;
use crate::utils::emission;

/// Emission scheduler singleton PDA. Holds the mint authority of the underlying token.
#[account]
#[derive(Default, Debug)]
pub struct EmissionState {
    /// Set once by `initialize_minter`.
    pub initialized: bool,
    /// May change the treasury.
    pub admin: Pubkey,
    /// Underlying token mint (this PDA is its mint authority).
    pub mint: Pubkey,
    /// Owner of the token account receiving each epoch's emission.
    pub treasury: Pubkey,
    /// Program notified on every mint; default pubkey = plain account, no notification.
    pub treasury_hook: Pubkey,
    /// Start of the current epoch (Unix seconds, UTC).
    pub epoch_start_time: i64,
    /// Amount minted at the next epoch boundary.
    pub epoch_amount: u64,
    /// Number of whole epochs accounted for so far.
    pub epochs_elapsed: u64,
    /// Cumulative supply minted by the scheduler.
    pub total_minted: u64,
    /// Held while external calls are in flight.
    pub entered: bool,
    pub bump: u8,
}

impl EmissionState {
    pub const SEED_PREFIX: &'static [u8] = b"emission_state";

    pub const SIZE: usize =
        1 +  // initialized
        32 + // admin
        32 + // mint
        32 + // treasury
        32 + // treasury_hook
        8 +  // epoch_start_time
        8 +  // epoch_amount
        8 +  // epochs_elapsed
        8 +  // total_minted
        1 +  // entered
        1;   // bump

    pub fn has_hook(&self) -> bool {
        self.treasury_hook != Pubkey::default()
    }

    /// The vesting ledger may only be bound to the scheduler's mint, by its admin.
    pub fn ensure_ledger_binding(&self, mint: &Pubkey, payer: &Pubkey) -> Result<(), StoneError> {
        if !self.initialized {
            return Err(StoneError::NotAuthorized);
        }
        if self.mint != *mint {
            return Err(StoneError::InvalidTokenMint);
        }
        if self.admin != *payer {
            return Err(StoneError::NotAuthorized);
        }
        Ok(())
    }

    /// Work out the next mint without touching state.
    pub fn plan_mint(&self, now_ts: i64) -> Result<EpochAdvance, StoneError> {
        let epochs = emission::elapsed_epochs(now_ts, self.epoch_start_time)?;
        let next_amount = emission::compound(self.epoch_amount, epochs)?;
        Ok(EpochAdvance {
            minted: self.epoch_amount,
            epochs,
            next_start_time: now_ts,
            next_amount,
        })
    }

    pub fn apply(&mut self, adv: &EpochAdvance) -> Result<(), StoneError> {
        self.epoch_start_time = adv.next_start_time;
        self.epoch_amount = adv.next_amount;
        self.epochs_elapsed = self
            .epochs_elapsed
            .checked_add(adv.epochs)
            .ok_or(StoneError::MathOverflow)?;
        self.total_minted = self
            .total_minted
            .checked_add(adv.minted)
            .ok_or(StoneError::MathOverflow)?;
        Ok(())
    }
}

/// Result of one `mint_epoch` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochAdvance {
    /// Amount minted by this call.
    pub minted: u64,
    /// Whole epochs elapsed since the previous epoch start.
    pub epochs: u64,
    pub next_start_time: i64,
    pub next_amount: u64,
}
