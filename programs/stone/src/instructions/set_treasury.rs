use anchor_lang::prelude::*;

use crate::error::StoneError;
use crate::state::EmissionState;

pub fn set_treasury(
    ctx: Context<SetTreasury>,
    new_treasury: Pubkey,
    treasury_hook: Option<Pubkey>,
) -> Result<()> {
    require!(new_treasury != Pubkey::default(), StoneError::InvalidAddress);

    let st = &mut ctx.accounts.emission_state;
    require_keys_eq!(ctx.accounts.admin.key(), st.admin, StoneError::NotAuthorized);
    require!(!st.entered, StoneError::ReentrantCall);

    let hook = treasury_hook.unwrap_or_default();
    require!(hook != crate::ID, StoneError::InvalidAddress);

    let old_treasury = st.treasury;
    st.treasury = new_treasury;
    st.treasury_hook = hook;

    emit!(TreasurySet {
        admin: st.admin,
        old_treasury,
        new_treasury,
        treasury_hook: hook,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetTreasury<'info> {
    #[account(mut, seeds = [EmissionState::SEED_PREFIX], bump = emission_state.bump)]
    pub emission_state: Account<'info, EmissionState>,

    pub admin: Signer<'info>,
}

#[event]
pub struct TreasurySet {
    pub admin: Pubkey,
    pub old_treasury: Pubkey,
    pub new_treasury: Pubkey,
    pub treasury_hook: Pubkey,
}
