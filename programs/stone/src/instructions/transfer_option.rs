use anchor_lang::prelude::*;

use crate::state::OptionTitle;

pub fn transfer_option(ctx: Context<TransferOption>, id: u64, new_owner: Pubkey) -> Result<()> {
    let title = &mut ctx.accounts.title;
    title.ensure_authorized(&ctx.accounts.caller.key())?;

    let previous_owner = title.owner;
    title.transfer_to(new_owner)?;

    emit!(OptionTransferred {
        id,
        previous_owner,
        new_owner,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(id: u64)]
pub struct TransferOption<'info> {
    #[account(
        mut,
        seeds = [OptionTitle::SEED_PREFIX, id.to_le_bytes().as_ref()],
        bump = title.bump,
    )]
    pub title: Account<'info, OptionTitle>,

    pub caller: Signer<'info>,
}

#[event]
pub struct OptionTransferred {
    pub id: u64,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
