use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::StoneError;
use crate::state::{OptionTitle, VestingConfig, VestingOption};
use crate::utils::funding::{self, SourceAccount};

pub fn grant_option(
    ctx: Context<GrantOption>,
    to: Pubkey,
    amount: u64,
    expiration_time: i64,
) -> Result<u64> {
    require!(to != Pubkey::default(), StoneError::InvalidAddress);
    require!(amount > 0, StoneError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;
    require!(expiration_time > now, StoneError::InvalidSchedule);

    let source = &ctx.accounts.source;
    let snapshot = SourceAccount {
        owner: source.owner,
        amount: source.amount,
        delegate: source.delegate.into(),
        delegated_amount: source.delegated_amount,
    };
    funding::ensure_can_pull(&snapshot, &ctx.accounts.granter.key(), amount)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.granter.to_account_info(),
            },
        ),
        amount,
    )?;

    let cfg = &mut ctx.accounts.vesting_config;
    let id = cfg.issue_id()?;
    cfg.lock(amount)?;

    let option = VestingOption::new(id, amount, now, expiration_time, ctx.bumps.option)?;
    let title = OptionTitle::new(id, to, ctx.bumps.title)?;
    ctx.accounts.option.set_inner(option);
    ctx.accounts.title.set_inner(title);

    ctx.accounts.vault.reload()?;
    ctx.accounts
        .vesting_config
        .ensure_covered(ctx.accounts.vault.amount)?;

    emit!(OptionGranted {
        id,
        granter: ctx.accounts.granter.key(),
        owner: to,
        amount,
        creation_time: now,
        expiration_time,
    });

    Ok(id)
}

#[derive(Accounts)]
pub struct GrantOption<'info> {
    #[account(mut, seeds = [VestingConfig::SEED_PREFIX], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [VestingConfig::VAULT_SEED_PREFIX, vesting_config.key().as_ref()],
        bump = vesting_config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = granter,
        space = 8 + VestingOption::SIZE,
        seeds = [VestingOption::SEED_PREFIX, vesting_config.next_option_id.to_le_bytes().as_ref()],
        bump
    )]
    pub option: Account<'info, VestingOption>,

    #[account(
        init,
        payer = granter,
        space = 8 + OptionTitle::SIZE,
        seeds = [OptionTitle::SEED_PREFIX, vesting_config.next_option_id.to_le_bytes().as_ref()],
        bump
    )]
    pub title: Account<'info, OptionTitle>,

    #[account(
        mut,
        constraint = source.mint == vesting_config.mint @ StoneError::InvalidTokenMint,
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(mut)]
    pub granter: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct OptionGranted {
    pub id: u64,
    pub granter: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub creation_time: i64,
    pub expiration_time: i64,
}
