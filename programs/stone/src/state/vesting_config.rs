use anchor_lang::prelude::*;
use core::result::Result;

use crate::error::StoneError;

/// Vesting ledger singleton PDA; authority of the custody vault.
#[account]
#[derive(Default, Debug)]
pub struct VestingConfig {
    /// Underlying token mint.
    pub mint: Pubkey,
    /// Custody vault (token account PDA owned by this config).
    pub vault: Pubkey,
    /// Identifier handed to the next created option.
    pub next_option_id: u64,
    /// Sum of `amount` over all live options.
    pub total_locked: u64,
    /// Number of live options.
    pub live_options: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl VestingConfig {
    pub const SEED_PREFIX: &'static [u8] = b"vesting_config";
    pub const VAULT_SEED_PREFIX: &'static [u8] = b"vault";

    pub const SIZE: usize =
        32 + // mint
        32 + // vault
        8 +  // next_option_id
        8 +  // total_locked
        8 +  // live_options
        1 +  // bump
        1;   // vault_bump

    /// Reserve the next option identifier.
    pub fn issue_id(&mut self) -> Result<u64, StoneError> {
        let id = self.next_option_id;
        self.next_option_id = id.checked_add(1).ok_or(StoneError::MathOverflow)?;
        self.live_options = self
            .live_options
            .checked_add(1)
            .ok_or(StoneError::MathOverflow)?;
        Ok(id)
    }

    /// An option left the ledger without its value (merge).
    pub fn retire(&mut self) -> Result<(), StoneError> {
        self.live_options = self
            .live_options
            .checked_sub(1)
            .ok_or(StoneError::MathOverflow)?;
        Ok(())
    }

    pub fn lock(&mut self, amount: u64) -> Result<(), StoneError> {
        self.total_locked = self
            .total_locked
            .checked_add(amount)
            .ok_or(StoneError::MathOverflow)?;
        Ok(())
    }

    /// An option was exercised: its value leaves custody and the record is gone.
    pub fn release(&mut self, amount: u64) -> Result<(), StoneError> {
        self.total_locked = self
            .total_locked
            .checked_sub(amount)
            .ok_or(StoneError::LedgerImbalance)?;
        self.retire()
    }

    /// Custody must always cover every live option.
    pub fn ensure_covered(&self, vault_amount: u64) -> Result<(), StoneError> {
        if vault_amount < self.total_locked {
            return Err(StoneError::LedgerImbalance);
        }
        Ok(())
    }

    /// Supply not locked in custody.
    pub fn circulating(&self, supply: u64, vault_amount: u64) -> u64 {
        supply.saturating_sub(vault_amount)
    }
}
