//! Treasury notification hook.
//!
//! A treasury program opts in by exposing an Anchor-style `notify_mint(amount: u64) -> bool`
//! instruction. It receives the emission state PDA as signer (proof that the call comes from the
//! scheduler) and the treasury token account, and answers through return data.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::{get_return_data, invoke_signed, set_return_data};

/// sha256("global:notify_mint")[..8]
pub const NOTIFY_MINT_DISCRIMINATOR: [u8; 8] = [135, 19, 194, 225, 172, 216, 72, 41];

pub fn notify_mint_data(amount: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(16);
    data.extend_from_slice(&NOTIFY_MINT_DISCRIMINATOR);
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

/// True only for a Borsh `true` returned by the hook program itself.
pub fn is_acknowledged(hook_program: &Pubkey, return_data: Option<(Pubkey, Vec<u8>)>) -> bool {
    match return_data {
        Some((program_id, data)) => program_id == *hook_program && data == [1u8],
        None => false,
    }
}

/// Invoke `notify_mint` on the hook and report whether it acknowledged the mint.
pub fn notify_mint<'info>(
    hook_program: &AccountInfo<'info>,
    emission_state: &AccountInfo<'info>,
    treasury_token_account: &AccountInfo<'info>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<bool> {
    let ix = Instruction {
        program_id: hook_program.key(),
        accounts: vec![
            AccountMeta::new_readonly(emission_state.key(), true),
            AccountMeta::new_readonly(treasury_token_account.key(), false),
        ],
        data: notify_mint_data(amount),
    };

    // Stale return data from an earlier CPI must not count as an answer.
    set_return_data(&[]);
    invoke_signed(
        &ix,
        &[
            emission_state.clone(),
            treasury_token_account.clone(),
            hook_program.clone(),
        ],
        signer_seeds,
    )?;

    Ok(is_acknowledged(&hook_program.key(), get_return_data()))
}
