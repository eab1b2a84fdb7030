use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::instructions::session_cancel::SessionCancelation;
use crate::utils::token::transfer_asset;

/// Fail-safe terminal transition: bypasses the vesting schedule and releases
/// the entire remaining locked amount to the user immediately.
pub fn session_exit(ctx: Context<SessionCancelation>) -> Result<()> {
    let session = &ctx.accounts.vesting_session_account;
    require!(!session.is_cancelled(), VestingError::CancelledSession);

    let now = Clock::get()?.unix_timestamp;
    let remaining = session.remaining();

    if remaining > 0 {
        let creator_key = ctx.accounts.creator.key();
        let backend_key = ctx.accounts.backend.key();
        let valued_mint_key = ctx.accounts.valued_token_mint.key();
        let escrow_mint_key = ctx.accounts.escrow_token_mint.key();
        let vault_seeds = &[
            b"token_vault".as_ref(),
            creator_key.as_ref(),
            backend_key.as_ref(),
            valued_mint_key.as_ref(),
            escrow_mint_key.as_ref(),
            &[ctx.bumps.vault_account],
        ];
        let vault_signer: &[&[&[u8]]] = &[&vault_seeds[..]];

        transfer_asset(
            &ctx.accounts.valued_vault_token_account,
            &ctx.accounts.valued_token_mint,
            &ctx.accounts.user_valued_token_account,
            ctx.accounts.vault_account.to_account_info(),
            ctx.accounts.valued_token_program.to_account_info(),
            remaining,
            Some(vault_signer),
        )?;
    }

    let session = &mut ctx.accounts.vesting_session_account;
    session.amount_withdrawn = session.amount;
    session.last_withdraw_at = now;
    session.cancelled_at = now;

    let vault = &mut ctx.accounts.vault_account;
    vault.locked_amount = vault
        .locked_amount
        .checked_sub(remaining)
        .ok_or(VestingError::MathOverflow)?;

    emit!(SessionExited {
        vault_account: ctx.accounts.vault_account.key(),
        vesting_session: ctx.accounts.vesting_session_account.key(),
        user: ctx.accounts.user.key(),
        amount: remaining,
        time: now,
    });

    Ok(())
}

#[event]
pub struct SessionExited {
    pub vault_account: Pubkey,
    pub vesting_session: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub time: i64,
}
