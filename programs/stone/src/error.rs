use anchor_lang::prelude::*;

/// Custom error codes for the emission scheduler and the vesting-option ledger.
#[error_code]
pub enum StoneError {
    #[msg("Invalid address (null pubkey)")]
    InvalidAddress,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Invalid schedule")]
    InvalidSchedule,

    #[msg("Insufficient allowance")]
    InsufficientAllowance,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Option has not matured yet")]
    NotMatured,

    #[msg("Caller is neither the owner nor the approved delegate")]
    NotAuthorized,

    #[msg("Source and destination option are the same record")]
    SameRecord,

    #[msg("Current epoch has not elapsed")]
    EpochNotElapsed,

    #[msg("Treasury rejected the mint notification")]
    TreasuryRejected,

    #[msg("Already initialized")]
    AlreadyInitialized,

    #[msg("Treasury hook program missing or mismatched")]
    TreasuryHookMismatch,

    #[msg("Reentrant call")]
    ReentrantCall,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Vault balance does not cover locked options")]
    LedgerImbalance,

    #[msg("Math overflow")]
    MathOverflow,
}
