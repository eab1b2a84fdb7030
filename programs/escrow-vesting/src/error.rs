use anchor_lang::prelude::*;

/// Custom error codes for the escrow vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: upgrade authority or change authority signature required")]
    UnauthorizedToExecute,

    #[msg("Unauthorized: signer is not the registered backend")]
    UnauthorizedBackend,

    #[msg("No vesting session found for this user")]
    SessionNotFound,

    #[msg("Session is cancelled and read-only")]
    CancelledSession,

    #[msg("Insufficient funds")]
    InsufficientFunds,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Invalid or empty metadata field")]
    InvalidMetadataField,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Unsupported token-2022 extension on valued mint")]
    UnsupportedTokenExtension,

    #[msg("Math overflow")]
    MathOverflow,
}
