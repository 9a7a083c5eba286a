use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, Mint, SetAuthority, Token};

use crate::error::StoneError;
use crate::state::EmissionState;
use crate::utils::emission;

pub fn initialize_minter(
    ctx: Context<InitializeMinter>,
    treasury: Pubkey,
    epoch_start_time: i64,
) -> Result<()> {
    require!(
        !ctx.accounts.emission_state.initialized,
        StoneError::AlreadyInitialized
    );
    require!(
        ctx.accounts.mint.key() != Pubkey::default(),
        StoneError::InvalidAddress
    );
    require!(treasury != Pubkey::default(), StoneError::InvalidAddress);

    let now = Clock::get()?.unix_timestamp;
    require!(epoch_start_time > now, StoneError::InvalidSchedule);

    let current_authority: Option<Pubkey> = ctx.accounts.mint.mint_authority.into();
    require!(
        current_authority == Some(ctx.accounts.mint_authority.key()),
        StoneError::NotAuthorized
    );

    let epoch_amount = emission::genesis_epoch_amount(ctx.accounts.mint.decimals)?;

    // Hand the minting capability to the scheduler PDA; nobody else can mint afterwards.
    let emission_state_key = ctx.accounts.emission_state.key();
    token::set_authority(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            SetAuthority {
                current_authority: ctx.accounts.mint_authority.to_account_info(),
                account_or_mint: ctx.accounts.mint.to_account_info(),
            },
        ),
        AuthorityType::MintTokens,
        Some(emission_state_key),
    )?;

    let st = &mut ctx.accounts.emission_state;
    st.initialized = true;
    st.admin = ctx.accounts.admin.key();
    st.mint = ctx.accounts.mint.key();
    st.treasury = treasury;
    st.treasury_hook = Pubkey::default();
    st.epoch_start_time = epoch_start_time;
    st.epoch_amount = epoch_amount;
    st.epochs_elapsed = 0;
    st.total_minted = 0;
    st.entered = false;
    st.bump = ctx.bumps.emission_state;

    emit!(MinterInitialized {
        admin: st.admin,
        mint: st.mint,
        treasury,
        epoch_start_time,
        epoch_amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeMinter<'info> {
    // init_if_needed so a second call reaches the handler and fails with AlreadyInitialized.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + EmissionState::SIZE,
        seeds = [EmissionState::SEED_PREFIX],
        bump
    )]
    pub emission_state: Account<'info, EmissionState>,

    #[account(mut)]
    pub mint: Account<'info, Mint>,

    pub mint_authority: Signer<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct MinterInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub treasury: Pubkey,
    pub epoch_start_time: i64,
    pub epoch_amount: u64,
}
