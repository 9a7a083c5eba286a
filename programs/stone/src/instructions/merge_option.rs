use anchor_lang::prelude::*;

use crate::error::StoneError;
use crate::state::{OptionTitle, VestingConfig, VestingOption};

pub fn merge_option(ctx: Context<MergeOption>, to: Pubkey, from_id: u64, to_id: u64) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    ctx.accounts.from_title.ensure_authorized(&caller)?;
    ctx.accounts.to_title.ensure_authorized(&caller)?;
    require!(from_id != to_id, StoneError::SameRecord);

    // Earlier maturity folds into later; the destination keeps its expiration.
    let from: VestingOption = (*ctx.accounts.from_option).clone();
    ctx.accounts.to_option.absorb(&from)?;

    require!(to != Pubkey::default(), StoneError::InvalidAddress);
    let previous_owner = ctx.accounts.to_title.owner;
    ctx.accounts.to_title.transfer_to(to)?;
    ctx.accounts.vesting_config.retire()?;

    // `from` option and title are closed on exit (`close = caller`).
    emit!(OptionMerged {
        from_id,
        to_id,
        previous_owner,
        new_owner: to,
        merged_amount: from.amount,
        amount: ctx.accounts.to_option.amount,
        expiration_time: ctx.accounts.to_option.expiration_time,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(to: Pubkey, from_id: u64, to_id: u64)]
pub struct MergeOption<'info> {
    #[account(mut, seeds = [VestingConfig::SEED_PREFIX], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        mut,
        close = caller,
        seeds = [VestingOption::SEED_PREFIX, from_id.to_le_bytes().as_ref()],
        bump = from_option.bump,
    )]
    pub from_option: Account<'info, VestingOption>,

    #[account(
        mut,
        close = caller,
        seeds = [OptionTitle::SEED_PREFIX, from_id.to_le_bytes().as_ref()],
        bump = from_title.bump,
    )]
    pub from_title: Account<'info, OptionTitle>,

    #[account(
        mut,
        seeds = [VestingOption::SEED_PREFIX, to_id.to_le_bytes().as_ref()],
        bump = to_option.bump,
    )]
    pub to_option: Account<'info, VestingOption>,

    #[account(
        mut,
        seeds = [OptionTitle::SEED_PREFIX, to_id.to_le_bytes().as_ref()],
        bump = to_title.bump,
    )]
    pub to_title: Account<'info, OptionTitle>,

    #[account(mut)]
    pub caller: Signer<'info>,
}

#[event]
pub struct OptionMerged {
    pub from_id: u64,
    pub to_id: u64,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
    pub merged_amount: u64,
    pub amount: u64,
    pub expiration_time: i64,
}
