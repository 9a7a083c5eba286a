use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::state::{EmissionState, VestingConfig};

pub fn initialize_vesting(ctx: Context<InitializeVesting>) -> Result<()> {
    ctx.accounts
        .emission_state
        .ensure_ledger_binding(&ctx.accounts.mint.key(), &ctx.accounts.payer.key())?;

    let cfg = &mut ctx.accounts.vesting_config;
    cfg.mint = ctx.accounts.mint.key();
    cfg.vault = ctx.accounts.vault.key();
    cfg.next_option_id = 0;
    cfg.total_locked = 0;
    cfg.live_options = 0;
    cfg.bump = ctx.bumps.vesting_config;
    cfg.vault_bump = ctx.bumps.vault;

    emit!(VestingInitialized {
        mint: cfg.mint,
        vault: cfg.vault,
        payer: ctx.accounts.payer.key(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVesting<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + VestingConfig::SIZE,
        seeds = [VestingConfig::SEED_PREFIX],
        bump
    )]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        init,
        payer = payer,
        token::mint = mint,
        token::authority = vesting_config,
        seeds = [VestingConfig::VAULT_SEED_PREFIX, vesting_config.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(seeds = [EmissionState::SEED_PREFIX], bump = emission_state.bump)]
    pub emission_state: Account<'info, EmissionState>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingInitialized {
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub payer: Pubkey,
}
