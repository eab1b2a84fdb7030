use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    token_metadata_initialize, Mint, Token2022, TokenMetadataInitialize,
};

use crate::constants::MAX_APP_ID_LEN;
use crate::error::VestingError;
use crate::state::{BackendData, VaultAccount};
use crate::utils::extensions::validate_valued_mint;
use crate::utils::token::ensure_rent_exempt;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitEscrowTokenParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub app_id: String,
}

/// Creates the escrow Token-2022 mint (decimals mirror the valued mint, all
/// authorities held by the vault PDA), writes its token metadata, and records
/// the vault ledger entry.
pub fn init_escrow_token(
    ctx: Context<InitEscrowToken>,
    params: InitEscrowTokenParams,
) -> Result<()> {
    require!(!params.name.is_empty(), VestingError::InvalidMetadataField);
    require!(!params.symbol.is_empty(), VestingError::InvalidMetadataField);
    require!(
        params.app_id.len() <= MAX_APP_ID_LEN,
        VestingError::InvalidConfig
    );

    validate_valued_mint(&ctx.accounts.valued_token_mint.to_account_info())?;

    let payer_key = ctx.accounts.payer.key();
    let backend_key = ctx.accounts.backend.key();
    let valued_mint_key = ctx.accounts.valued_token_mint.key();
    let escrow_mint_key = ctx.accounts.escrow_token_mint.key();
    let vault_seeds = &[
        b"token_vault".as_ref(),
        payer_key.as_ref(),
        backend_key.as_ref(),
        valued_mint_key.as_ref(),
        escrow_mint_key.as_ref(),
        &[ctx.bumps.vault_account],
    ];
    let vault_signer: &[&[&[u8]]] = &[&vault_seeds[..]];

    token_metadata_initialize(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TokenMetadataInitialize {
                token_program_id: ctx.accounts.token_program.to_account_info(),
                mint: ctx.accounts.escrow_token_mint.to_account_info(),
                metadata: ctx.accounts.escrow_token_mint.to_account_info(),
                mint_authority: ctx.accounts.vault_account.to_account_info(),
                update_authority: ctx.accounts.vault_account.to_account_info(),
            },
            vault_signer,
        ),
        params.name,
        params.symbol,
        params.uri,
    )?;

    // Metadata writes grow the mint account beyond what `init` paid for.
    ensure_rent_exempt(
        ctx.accounts.escrow_token_mint.to_account_info(),
        ctx.accounts.payer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
    )?;

    let vault = &mut ctx.accounts.vault_account;
    vault.creator = payer_key;
    vault.backend = backend_key;
    vault.valued_token_mint = valued_mint_key;
    vault.escrow_token_mint = escrow_mint_key;
    vault.app_id = params.app_id.clone();
    vault.locked_amount = 0;

    emit!(EscrowTokenInitialized {
        creator: payer_key,
        backend: backend_key,
        valued_token_mint: valued_mint_key,
        escrow_token_mint: escrow_mint_key,
        vault_account: ctx.accounts.vault_account.key(),
        app_id: params.app_id,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitEscrowToken<'info> {
    #[account(seeds = [b"backend_data"], bump)]
    pub backend_data: Account<'info, BackendData>,

    /// Must be the operator currently registered in `backend_data`.
    #[account(
        constraint = backend.key() == backend_data.backend_account
            @ VestingError::UnauthorizedBackend
    )]
    pub backend: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + VaultAccount::SIZE,
        seeds = [
            b"token_vault",
            payer.key().as_ref(),
            backend.key().as_ref(),
            valued_token_mint.key().as_ref(),
            escrow_token_mint.key().as_ref(),
        ],
        bump
    )]
    pub vault_account: Box<Account<'info, VaultAccount>>,

    #[account(
        init,
        payer = payer,
        seeds = [
            b"escrow_mint",
            valued_token_mint.key().as_ref(),
            payer.key().as_ref(),
            backend.key().as_ref(),
        ],
        bump,
        mint::decimals = valued_token_mint.decimals,
        mint::authority = vault_account,
        mint::freeze_authority = vault_account,
        mint::token_program = token_program,
        extensions::metadata_pointer::authority = vault_account,
        extensions::metadata_pointer::metadata_address = escrow_token_mint
    )]
    pub escrow_token_mint: Box<InterfaceAccount<'info, Mint>>,

    pub valued_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct EscrowTokenInitialized {
    pub creator: Pubkey,
    pub backend: Pubkey,
    pub valued_token_mint: Pubkey,
    pub escrow_token_mint: Pubkey,
    pub vault_account: Pubkey,
    pub app_id: String,
}
