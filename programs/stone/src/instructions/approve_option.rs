use anchor_lang::prelude::*;

use crate::state::OptionTitle;

pub fn approve_option(ctx: Context<ApproveOption>, id: u64, delegate: Pubkey) -> Result<()> {
    let title = &mut ctx.accounts.title;
    title.ensure_owner(&ctx.accounts.owner.key())?;
    title.approve(delegate);

    emit!(OptionApproved {
        id,
        owner: title.owner,
        approved: delegate,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(id: u64)]
pub struct ApproveOption<'info> {
    #[account(
        mut,
        seeds = [OptionTitle::SEED_PREFIX, id.to_le_bytes().as_ref()],
        bump = title.bump,
    )]
    pub title: Account<'info, OptionTitle>,

    pub owner: Signer<'info>,
}

#[event]
pub struct OptionApproved {
    pub id: u64,
    pub owner: Pubkey,
    /// Default pubkey when the approval was revoked.
    pub approved: Pubkey,
}
