use anchor_lang::prelude::*;

use crate::error::StoneError;
use crate::state::{OptionTitle, VestingConfig, VestingOption};

pub fn split_option(ctx: Context<SplitOption>, to: Pubkey, id: u64, amount: u64) -> Result<u64> {
    ctx.accounts
        .source_title
        .ensure_authorized(&ctx.accounts.caller.key())?;
    require!(to != Pubkey::default(), StoneError::InvalidAddress);

    let now = Clock::get()?.unix_timestamp;
    let new_id = ctx.accounts.vesting_config.issue_id()?;

    // No tokens move: the sibling is carved out of the source's custodied amount.
    let child = ctx
        .accounts
        .source_option
        .split_off(new_id, amount, now, ctx.bumps.new_option)?;
    let expiration_time = child.expiration_time;
    let remaining = ctx.accounts.source_option.amount;

    ctx.accounts.new_option.set_inner(child);
    ctx.accounts
        .new_title
        .set_inner(OptionTitle::new(new_id, to, ctx.bumps.new_title)?);

    emit!(OptionSplit {
        id,
        new_id,
        new_owner: to,
        amount,
        remaining,
        expiration_time,
    });

    Ok(new_id)
}

#[derive(Accounts)]
#[instruction(to: Pubkey, id: u64)]
pub struct SplitOption<'info> {
    #[account(mut, seeds = [VestingConfig::SEED_PREFIX], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [VestingOption::SEED_PREFIX, id.to_le_bytes().as_ref()],
        bump = source_option.bump,
    )]
    pub source_option: Account<'info, VestingOption>,

    #[account(
        seeds = [OptionTitle::SEED_PREFIX, id.to_le_bytes().as_ref()],
        bump = source_title.bump,
    )]
    pub source_title: Account<'info, OptionTitle>,

    #[account(
        init,
        payer = caller,
        space = 8 + VestingOption::SIZE,
        seeds = [VestingOption::SEED_PREFIX, vesting_config.next_option_id.to_le_bytes().as_ref()],
        bump
    )]
    pub new_option: Account<'info, VestingOption>,

    #[account(
        init,
        payer = caller,
        space = 8 + OptionTitle::SIZE,
        seeds = [OptionTitle::SEED_PREFIX, vesting_config.next_option_id.to_le_bytes().as_ref()],
        bump
    )]
    pub new_title: Account<'info, OptionTitle>,

    #[account(mut)]
    pub caller: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct OptionSplit {
    pub id: u64,
    pub new_id: u64,
    pub new_owner: Pubkey,
    pub amount: u64,
    pub remaining: u64,
    pub expiration_time: i64,
}
