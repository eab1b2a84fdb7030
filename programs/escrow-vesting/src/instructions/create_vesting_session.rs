use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, Token2022, TokenAccount};

use crate::error::VestingError;
use crate::state::{VaultAccount, VestingSession, VestingSessionsAccount};
use crate::utils::token::transfer_asset;

/// Locks `amount` escrow into a new vesting session. The session id comes
/// from the per-(vault, user) counter, which advances only once the session
/// record exists; the instruction is atomic, so a failed transfer never burns
/// an id.
pub fn create_vesting_session(ctx: Context<CreateVestingSession>, amount: u64) -> Result<()> {
    require!(amount > 0, VestingError::ZeroAmount);
    require!(
        ctx.accounts.user_escrow_token_account.amount >= amount,
        VestingError::InsufficientFunds
    );

    transfer_asset(
        &ctx.accounts.user_escrow_token_account,
        &ctx.accounts.escrow_token_mint,
        &ctx.accounts.escrow_vault_token_account,
        ctx.accounts.user.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        None,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let user_key = ctx.accounts.user.key();

    let sessions = &mut ctx.accounts.vesting_sessions_account;
    let session = &mut ctx.accounts.vesting_session_account;

    session.id = sessions.last_session_id;
    session.user = user_key;
    session.vesting_sessions_account = sessions.key();
    session.amount = amount;
    session.amount_withdrawn = 0;
    session.start_date = now;
    session.last_withdraw_at = 0;
    session.cancelled_at = 0;

    sessions.last_session_id = sessions
        .last_session_id
        .checked_add(1)
        .ok_or(VestingError::MathOverflow)?;
    sessions.user = user_key;

    let vault = &mut ctx.accounts.vault_account;
    vault.locked_amount = vault
        .locked_amount
        .checked_add(amount)
        .ok_or(VestingError::MathOverflow)?;

    emit!(VestingSessionCreated {
        vault_account: ctx.accounts.vault_account.key(),
        vesting_session: ctx.accounts.vesting_session_account.key(),
        user: user_key,
        amount,
        start_date: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CreateVestingSession<'info> {
    /// CHECK: only used as a PDA seed; bound to the vault by `has_one`.
    pub creator: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [
            b"token_vault",
            creator.key().as_ref(),
            backend.key().as_ref(),
            valued_token_mint.key().as_ref(),
            escrow_token_mint.key().as_ref(),
        ],
        bump,
        has_one = creator,
        has_one = backend,
        has_one = valued_token_mint,
        has_one = escrow_token_mint
    )]
    pub vault_account: Box<Account<'info, VaultAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + VestingSessionsAccount::SIZE,
        seeds = [
            b"vesting_sessions",
            vault_account.key().as_ref(),
            user.key().as_ref(),
        ],
        bump
    )]
    pub vesting_sessions_account: Box<Account<'info, VestingSessionsAccount>>,

    #[account(
        init,
        payer = user,
        space = 8 + VestingSession::SIZE,
        seeds = [
            b"vesting_session",
            vesting_sessions_account.key().as_ref(),
            vesting_sessions_account.last_session_id.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub vesting_session_account: Box<Account<'info, VestingSession>>,

    #[account(mut)]
    pub user: Signer<'info>,
    pub backend: Signer<'info>,

    #[account(
        mut,
        associated_token::mint = escrow_token_mint,
        associated_token::authority = vault_account,
        associated_token::token_program = token_program
    )]
    pub escrow_vault_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = escrow_token_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program
    )]
    pub user_escrow_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub valued_token_mint: Box<InterfaceAccount<'info, Mint>>,
    pub escrow_token_mint: Box<InterfaceAccount<'info, Mint>>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct VestingSessionCreated {
    pub vault_account: Pubkey,
    pub vesting_session: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub start_date: i64,
}
