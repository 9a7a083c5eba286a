use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

use crate::error::StoneError;
use crate::state::EmissionState;
use crate::utils::hook;

pub fn mint_epoch(ctx: Context<MintEpoch>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // Avoid borrow checker conflicts: capture AccountInfos before taking mutable borrows.
    let emission_state_ai = ctx.accounts.emission_state.to_account_info();
    let treasury_ai = ctx.accounts.treasury_token_account.to_account_info();
    let bump = ctx.accounts.emission_state.bump;

    let hook_program = if ctx.accounts.emission_state.has_hook() {
        let expected = ctx.accounts.emission_state.treasury_hook;
        let program = ctx
            .accounts
            .treasury_program
            .as_ref()
            .ok_or(StoneError::TreasuryHookMismatch)?;
        require_keys_eq!(program.key(), expected, StoneError::TreasuryHookMismatch);
        require!(program.executable, StoneError::TreasuryHookMismatch);
        Some(program.to_account_info())
    } else {
        None
    };

    let st = &mut ctx.accounts.emission_state;
    if st.entered {
        msg!("mint_epoch: reentrant call rejected");
        return Err(StoneError::ReentrantCall.into());
    }
    let advance = st.plan_mint(now)?;

    // Effects first: the clock and the next amount are persisted before any external call,
    // so a treasury observing the state mid-call sees the post-mint schedule.
    st.apply(&advance)?;
    st.entered = true;
    st.exit(&crate::ID)?;

    let signer_seeds: &[&[&[u8]]] = &[&[EmissionState::SEED_PREFIX, &[bump]]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: treasury_ai.clone(),
                authority: emission_state_ai.clone(),
            },
            signer_seeds,
        ),
        advance.minted,
    )?;

    // A rejection fails the instruction, which rolls back the mint above.
    if let Some(program) = hook_program {
        msg!("mint_epoch: notifying treasury hook {}", program.key());
        let acknowledged = hook::notify_mint(
            &program,
            &emission_state_ai,
            &treasury_ai,
            advance.minted,
            signer_seeds,
        )?;
        require!(acknowledged, StoneError::TreasuryRejected);
    }

    let st = &mut ctx.accounts.emission_state;
    st.entered = false;

    emit!(EpochMinted {
        treasury: st.treasury,
        amount: advance.minted,
        epochs: advance.epochs,
        epoch_start_time: st.epoch_start_time,
        next_epoch_amount: st.epoch_amount,
        total_minted: st.total_minted,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct MintEpoch<'info> {
    #[account(mut, seeds = [EmissionState::SEED_PREFIX], bump = emission_state.bump)]
    pub emission_state: Account<'info, EmissionState>,

    #[account(mut, address = emission_state.mint @ StoneError::InvalidTokenMint)]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = treasury_token_account.mint == emission_state.mint @ StoneError::InvalidTokenMint,
        constraint = treasury_token_account.owner == emission_state.treasury @ StoneError::InvalidTokenAccount,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    /// CHECK: Compared against `emission_state.treasury_hook` in-handler; only invoked, never read.
    pub treasury_program: Option<UncheckedAccount<'info>>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct EpochMinted {
    pub treasury: Pubkey,
    pub amount: u64,
    pub epochs: u64,
    pub epoch_start_time: i64,
    pub next_epoch_amount: u64,
    pub total_minted: u64,
}
