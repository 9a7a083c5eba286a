use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::StoneError;
use crate::state::{OptionTitle, VestingConfig, VestingOption};

pub fn exercise_option(ctx: Context<ExerciseOption>, to: Pubkey, id: u64) -> Result<()> {
    let config_bump = ctx.accounts.vesting_config.bump;
    let config_ai = ctx.accounts.vesting_config.to_account_info();

    // Owner only: an approved delegate may split, merge or move the record, but not redeem it.
    ctx.accounts.title.ensure_owner(&ctx.accounts.caller.key())?;

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.option.ensure_matured(now)?;

    require!(to != Pubkey::default(), StoneError::InvalidAddress);
    require_keys_eq!(
        ctx.accounts.recipient_token_account.owner,
        to,
        StoneError::InvalidTokenAccount
    );

    let amount = ctx.accounts.option.amount;
    ctx.accounts.vesting_config.release(amount)?;

    require!(
        ctx.accounts.vault.amount >= amount,
        StoneError::LedgerImbalance
    );

    let signer_seeds: &[&[&[u8]]] = &[&[VestingConfig::SEED_PREFIX, &[config_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.recipient_token_account.to_account_info(),
                authority: config_ai,
            },
            signer_seeds,
        ),
        amount,
    )?;

    ctx.accounts.vault.reload()?;
    ctx.accounts
        .vesting_config
        .ensure_covered(ctx.accounts.vault.amount)?;

    // Option and title accounts are closed on exit (`close = caller`).
    emit!(OptionExercised {
        id,
        owner: ctx.accounts.title.owner,
        recipient: to,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(to: Pubkey, id: u64)]
pub struct ExerciseOption<'info> {
    #[account(mut, seeds = [VestingConfig::SEED_PREFIX], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [VestingConfig::VAULT_SEED_PREFIX, vesting_config.key().as_ref()],
        bump = vesting_config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        close = caller,
        seeds = [VestingOption::SEED_PREFIX, id.to_le_bytes().as_ref()],
        bump = option.bump,
    )]
    pub option: Account<'info, VestingOption>,

    #[account(
        mut,
        close = caller,
        seeds = [OptionTitle::SEED_PREFIX, id.to_le_bytes().as_ref()],
        bump = title.bump,
    )]
    pub title: Account<'info, OptionTitle>,

    #[account(
        mut,
        constraint = recipient_token_account.mint == vesting_config.mint @ StoneError::InvalidTokenMint,
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct OptionExercised {
    pub id: u64,
    pub owner: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
}
