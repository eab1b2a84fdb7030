use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, Token2022, TokenAccount, TokenInterface},
};

use crate::state::VaultAccount;

/// Creates the vault's two custody token accounts (valued and escrow), both
/// owned by the vault PDA.
pub fn init_vault_token_accounts(ctx: Context<InitVaultTokenAccounts>) -> Result<()> {
    emit!(VaultTokenAccountsInitialized {
        vault_account: ctx.accounts.vault_account.key(),
        valued_vault_token_account: ctx.accounts.valued_vault_token_account.key(),
        escrow_vault_token_account: ctx.accounts.escrow_vault_token_account.key(),
    });
    Ok(())
}

#[derive(Accounts)]
pub struct InitVaultTokenAccounts<'info> {
    /// CHECK: only used as a PDA seed; bound to the vault by `has_one`.
    pub creator: UncheckedAccount<'info>,
    pub backend: Signer<'info>,

    #[account(
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
        init,
        payer = payer,
        associated_token::mint = valued_token_mint,
        associated_token::authority = vault_account,
        associated_token::token_program = valued_token_program
    )]
    pub valued_vault_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = payer,
        associated_token::mint = escrow_token_mint,
        associated_token::authority = vault_account,
        associated_token::token_program = token_program
    )]
    pub escrow_vault_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub valued_token_mint: Box<InterfaceAccount<'info, Mint>>,
    pub escrow_token_mint: Box<InterfaceAccount<'info, Mint>>,

    pub valued_token_program: Interface<'info, TokenInterface>,
    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct VaultTokenAccountsInitialized {
    pub vault_account: Pubkey,
    pub valued_vault_token_account: Pubkey,
    pub escrow_vault_token_account: Pubkey,
}
