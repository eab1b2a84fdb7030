use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, Token2022, TokenAccount, TokenInterface},
};

use crate::error::VestingError;
use crate::state::VaultAccount;
use crate::utils::token::{pay_escrow_from_vault, transfer_asset};

/// Converts `amount` valued tokens into escrow tokens 1:1. The valued tokens
/// move into the vault's custody; the escrow comes out of the vault's
/// recoverable balance first, with only the shortfall minted. Asset-neutral:
/// no value is created or destroyed.
pub fn exchange(ctx: Context<Exchange>, amount: u64) -> Result<()> {
    require!(amount > 0, VestingError::ZeroAmount);
    require!(
        ctx.accounts.user_valued_token_account.amount >= amount,
        VestingError::InsufficientFunds
    );

    transfer_asset(
        &ctx.accounts.user_valued_token_account,
        &ctx.accounts.valued_token_mint,
        &ctx.accounts.valued_vault_token_account,
        ctx.accounts.user.to_account_info(),
        ctx.accounts.valued_token_program.to_account_info(),
        amount,
        None,
    )?;

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

    pay_escrow_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.vault_account,
        &ctx.accounts.escrow_vault_token_account,
        &ctx.accounts.user_escrow_token_account,
        &ctx.accounts.escrow_token_mint,
        vault_signer,
        amount,
    )?;

    emit!(Exchanged {
        vault_account: ctx.accounts.vault_account.key(),
        user: ctx.accounts.user.key(),
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Exchange<'info> {
    /// CHECK: only used as a PDA seed; bound to the vault by `has_one`.
    pub creator: UncheckedAccount<'info>,

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
        mut,
        associated_token::mint = valued_token_mint,
        associated_token::authority = vault_account,
        associated_token::token_program = valued_token_program
    )]
    pub valued_vault_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = escrow_token_mint,
        associated_token::authority = vault_account,
        associated_token::token_program = token_program
    )]
    pub escrow_vault_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        associated_token::mint = valued_token_mint,
        associated_token::authority = user,
        associated_token::token_program = valued_token_program
    )]
    pub user_valued_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = escrow_token_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program
    )]
    pub user_escrow_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub backend: Signer<'info>,

    pub valued_token_mint: Box<InterfaceAccount<'info, Mint>>,
    #[account(mut)]
    pub escrow_token_mint: Box<InterfaceAccount<'info, Mint>>,

    pub valued_token_program: Interface<'info, TokenInterface>,
    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct Exchanged {
    pub vault_account: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}
