use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::VESTING_DURATION_SECONDS;
use crate::error::VestingError;
use crate::state::{VaultAccount, VestingSession, VestingSessionsAccount};
use crate::utils::token::transfer_asset;
use crate::utils::vesting::claimable_amount;

/// Releases the vested-but-unwithdrawn quantity to the user's valued token
/// account. A zero claimable is a no-op success so that naive caller retries
/// can never double-credit.
pub fn session_withdraw(ctx: Context<SessionWithdraw>) -> Result<()> {
    let session = &ctx.accounts.vesting_session_account;
    require!(!session.is_cancelled(), VestingError::CancelledSession);

    let now = Clock::get()?.unix_timestamp;
    let claimable = claimable_amount(
        session.amount,
        session.amount_withdrawn,
        session.start_date,
        now,
        VESTING_DURATION_SECONDS,
    )?;

    if claimable == 0 {
        return Ok(());
    }

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
        claimable,
        Some(vault_signer),
    )?;

    let session = &mut ctx.accounts.vesting_session_account;
    session.amount_withdrawn = session
        .amount_withdrawn
        .checked_add(claimable)
        .ok_or(VestingError::MathOverflow)?;
    session.last_withdraw_at = now;

    let vault = &mut ctx.accounts.vault_account;
    vault.locked_amount = vault
        .locked_amount
        .checked_sub(claimable)
        .ok_or(VestingError::MathOverflow)?;

    emit!(SessionWithdrawn {
        vault_account: ctx.accounts.vault_account.key(),
        vesting_session: ctx.accounts.vesting_session_account.key(),
        user: ctx.accounts.user.key(),
        amount: claimable,
        time: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SessionWithdraw<'info> {
    /// CHECK: only used as a PDA seed; bound to the vault by `has_one`.
    pub creator: UncheckedAccount<'info>,

    #[account(
        seeds = [
            b"vesting_sessions",
            vault_account.key().as_ref(),
            user.key().as_ref(),
        ],
        bump,
        has_one = user @ VestingError::SessionNotFound
    )]
    pub vesting_sessions_account: Box<Account<'info, VestingSessionsAccount>>,

    /// The session being drawn down. An address with no session record fails
    /// deserialization before these constraints run (`AccountNotInitialized`);
    /// `SessionNotFound` covers an existing session bound to another user or
    /// counter.
    #[account(
        mut,
        seeds = [
            b"vesting_session",
            vesting_sessions_account.key().as_ref(),
            vesting_session_account.id.to_le_bytes().as_ref(),
        ],
        bump,
        has_one = user @ VestingError::SessionNotFound,
        has_one = vesting_sessions_account @ VestingError::SessionNotFound
    )]
    pub vesting_session_account: Box<Account<'info, VestingSession>>,

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
        mut,
        associated_token::mint = valued_token_mint,
        associated_token::authority = vault_account,
        associated_token::token_program = valued_token_program
    )]
    pub valued_vault_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub user: Signer<'info>,

    #[account(
        mut,
        associated_token::mint = valued_token_mint,
        associated_token::authority = user,
        associated_token::token_program = valued_token_program
    )]
    pub user_valued_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub backend: Signer<'info>,

    pub valued_token_mint: Box<InterfaceAccount<'info, Mint>>,
    pub escrow_token_mint: Box<InterfaceAccount<'info, Mint>>,

    pub valued_token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct SessionWithdrawn {
    pub vault_account: Pubkey,
    pub vesting_session: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub time: i64,
}
