pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Custodial vesting engine: users exchange a valued token for a 1:1 escrow
/// receipt, lock escrow into time-gated sessions, and redeem valued tokens
/// back as the linear schedule elapses. All session and exchange operations
/// require the registered backend and the user to co-sign.
#[program]
pub mod escrow_vesting {
    use super::*;

    /// Designates the backend operator. Only the program upgrade authority or
    /// the registered change authority may call this.
    pub fn set_backend_account(
        ctx: Context<SetBackendAccount>,
        params: SetBackendAccountParams,
    ) -> Result<()> {
        instructions::set_backend_account::set_backend_account(ctx, params)
    }

    /// Creates the escrow mint with metadata plus the vault ledger entry.
    pub fn init_escrow_token(
        ctx: Context<InitEscrowToken>,
        params: InitEscrowTokenParams,
    ) -> Result<()> {
        instructions::init_escrow_token::init_escrow_token(ctx, params)
    }

    /// Creates the vault's two custody token accounts.
    pub fn init_vault_token_accounts(ctx: Context<InitVaultTokenAccounts>) -> Result<()> {
        instructions::init_vault_token_accounts::init_vault_token_accounts(ctx)
    }

    /// Updates one display-metadata field of the escrow token.
    pub fn change_escrow_metadata(
        ctx: Context<ChangeEscrowMetadata>,
        params: ChangeEscrowMetadataParams,
    ) -> Result<()> {
        instructions::change_escrow_metadata::change_escrow_metadata(ctx, params)
    }

    /// Converts valued tokens into escrow tokens 1:1.
    pub fn exchange(ctx: Context<Exchange>, amount: u64) -> Result<()> {
        instructions::exchange::exchange(ctx, amount)
    }

    /// Locks escrow into a new time-gated vesting session.
    pub fn create_vesting_session(
        ctx: Context<CreateVestingSession>,
        amount: u64,
    ) -> Result<()> {
        instructions::create_vesting_session::create_vesting_session(ctx, amount)
    }

    /// Releases whatever has vested since the session started.
    pub fn session_withdraw(ctx: Context<SessionWithdraw>) -> Result<()> {
        instructions::session_withdraw::session_withdraw(ctx)
    }

    /// Terminal: credits vesting up to now, releases the unvested remainder
    /// back to the vault's recoverable balance.
    pub fn session_cancel(ctx: Context<SessionCancelation>) -> Result<()> {
        instructions::session_cancel::session_cancel(ctx)
    }

    /// Terminal escape hatch: releases the entire remaining locked amount to
    /// the user immediately.
    pub fn session_exit(ctx: Context<SessionCancelation>) -> Result<()> {
        instructions::session_exit::session_exit(ctx)
    }
}
