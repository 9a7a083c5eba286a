use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod stone {
    use super::*;

    // ---- emission scheduler ----

    pub fn initialize_minter(
        ctx: Context<InitializeMinter>,
        treasury: Pubkey,
        epoch_start_time: i64,
    ) -> Result<()> {
        instructions::initialize_minter(ctx, treasury, epoch_start_time)
    }

    pub fn set_treasury(
        ctx: Context<SetTreasury>,
        new_treasury: Pubkey,
        treasury_hook: Option<Pubkey>,
    ) -> Result<()> {
        instructions::set_treasury(ctx, new_treasury, treasury_hook)
    }

    /// Permissionless; mints the current epoch amount once a full epoch has elapsed.
    pub fn mint_epoch(ctx: Context<MintEpoch>) -> Result<()> {
        instructions::mint_epoch(ctx)
    }

    // ---- vesting-option ledger ----

    pub fn initialize_vesting(ctx: Context<InitializeVesting>) -> Result<()> {
        instructions::initialize_vesting(ctx)
    }

    /// Returns the new option id.
    pub fn grant_option(
        ctx: Context<GrantOption>,
        to: Pubkey,
        amount: u64,
        expiration_time: i64,
    ) -> Result<u64> {
        instructions::grant_option(ctx, to, amount, expiration_time)
    }

    pub fn exercise_option(ctx: Context<ExerciseOption>, to: Pubkey, id: u64) -> Result<()> {
        instructions::exercise_option(ctx, to, id)
    }

    /// Returns the id of the newly split-off option.
    pub fn split_option(
        ctx: Context<SplitOption>,
        to: Pubkey,
        id: u64,
        amount: u64,
    ) -> Result<u64> {
        instructions::split_option(ctx, to, id, amount)
    }

    pub fn merge_option(
        ctx: Context<MergeOption>,
        to: Pubkey,
        from_id: u64,
        to_id: u64,
    ) -> Result<()> {
        instructions::merge_option(ctx, to, from_id, to_id)
    }

    pub fn approve_option(ctx: Context<ApproveOption>, id: u64, delegate: Pubkey) -> Result<()> {
        instructions::approve_option(ctx, id, delegate)
    }

    pub fn transfer_option(
        ctx: Context<TransferOption>,
        id: u64,
        new_owner: Pubkey,
    ) -> Result<()> {
        instructions::transfer_option(ctx, id, new_owner)
    }

    pub fn emit_supply_quote(ctx: Context<EmitSupplyQuote>) -> Result<()> {
        instructions::emit_supply_quote(ctx)
    }
}
