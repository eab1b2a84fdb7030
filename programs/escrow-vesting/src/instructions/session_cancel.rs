use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::VESTING_DURATION_SECONDS;
use crate::error::VestingError;
use crate::state::{VaultAccount, VestingSession, VestingSessionsAccount};
use crate::utils::token::transfer_asset;
use crate::utils::vesting::claimable_amount;

/// Terminal transition: credits vesting up to now exactly like a withdraw,
/// then drops the reservation on the unvested remainder. The remainder's
/// escrow stays in the vault token account and becomes recoverable balance
/// (reusable by `exchange`); it is not transferred to the user.
pub fn session_cancel(ctx: Context<SessionCancelation>) -> Result<()> {
    let session = &ctx.accounts.vesting_session_account;
    require!(!session.is_cancelled(), VestingError::CancelledSession);

    let now = Clock::get()?.unix_timestamp;
    let withdrawn_before = session.amount_withdrawn;
    let claimable = claimable_amount(
        session.amount,
        withdrawn_before,
        session.start_date,
        now,
        VESTING_DURATION_SECONDS,
    )?;
    let unvested = session
        .amount
        .checked_sub(withdrawn_before)
        .ok_or(VestingError::MathOverflow)?
        .checked_sub(claimable)
        .ok_or(VestingError::MathOverflow)?;

    if claimable > 0 {
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
    }

    let session = &mut ctx.accounts.vesting_session_account;
    if claimable > 0 {
        session.amount_withdrawn = session
            .amount_withdrawn
            .checked_add(claimable)
            .ok_or(VestingError::MathOverflow)?;
        session.last_withdraw_at = now;
    }
    session.cancelled_at = now;

    // The whole outstanding reservation goes away: the credited part left
    // custody, the unvested part is recoverable again.
    let vault = &mut ctx.accounts.vault_account;
    vault.locked_amount = vault
        .locked_amount
        .checked_sub(
            claimable
                .checked_add(unvested)
                .ok_or(VestingError::MathOverflow)?,
        )
        .ok_or(VestingError::MathOverflow)?;

    emit!(SessionCancelled {
        vault_account: ctx.accounts.vault_account.key(),
        vesting_session: ctx.accounts.vesting_session_account.key(),
        user: ctx.accounts.user.key(),
        valued_amount: claimable,
        escrow_amount: unvested,
        time: now,
    });

    Ok(())
}

/// Shared by `session_cancel` and `session_exit`; both are terminal
/// transitions over the same account set. Note both still demand the backend
/// co-signature, exit included.
#[derive(Accounts)]
pub struct SessionCancelation<'info> {
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

    /// The session being terminated. An address with no session record fails
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
pub struct SessionCancelled {
    pub vault_account: Pubkey,
    pub vesting_session: Pubkey,
    pub user: Pubkey,
    pub valued_amount: u64,
    pub escrow_amount: u64,
    pub time: i64,
}

#[cfg(test)]
mod tests {
    use anchor_lang::prelude::*;
    use anchor_lang::ToAccountMetas;

    // `session_exit` shares this account set, so the escape hatch bypasses
    // the vesting schedule but not the dual-signature requirement.
    #[test]
    fn cancel_and_exit_demand_user_and_backend_signatures() {
        let user = Pubkey::new_unique();
        let backend = Pubkey::new_unique();
        let accounts = crate::accounts::SessionCancelation {
            creator: Pubkey::new_unique(),
            vesting_sessions_account: Pubkey::new_unique(),
            vesting_session_account: Pubkey::new_unique(),
            vault_account: Pubkey::new_unique(),
            valued_vault_token_account: Pubkey::new_unique(),
            user,
            user_valued_token_account: Pubkey::new_unique(),
            backend,
            valued_token_mint: Pubkey::new_unique(),
            escrow_token_mint: Pubkey::new_unique(),
            valued_token_program: Pubkey::new_unique(),
            system_program: Pubkey::new_unique(),
        };

        let signers: Vec<Pubkey> = accounts
            .to_account_metas(None)
            .into_iter()
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect();
        assert_eq!(signers, vec![user, backend]);
    }
}
