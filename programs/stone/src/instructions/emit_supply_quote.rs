use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::error::StoneError;
use crate::state::VestingConfig;

pub fn emit_supply_quote(ctx: Context<EmitSupplyQuote>) -> Result<()> {
    let cfg = &ctx.accounts.vesting_config;
    let supply = ctx.accounts.mint.supply;
    let locked = ctx.accounts.vault.amount;

    emit!(SupplyQuote {
        supply,
        locked,
        live_options: cfg.live_options,
        circulating: cfg.circulating(supply, locked),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitSupplyQuote<'info> {
    #[account(seeds = [VestingConfig::SEED_PREFIX], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        seeds = [VestingConfig::VAULT_SEED_PREFIX, vesting_config.key().as_ref()],
        bump = vesting_config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(address = vesting_config.mint @ StoneError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,
}

#[event]
pub struct SupplyQuote {
    pub supply: u64,
    pub locked: u64,
    pub live_options: u64,
    pub circulating: u64,
}
