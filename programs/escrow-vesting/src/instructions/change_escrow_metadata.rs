use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    token_metadata_update_field, Mint, Token2022, TokenMetadataUpdateField,
};
use spl_token_metadata_interface::state::Field;

use crate::constants::MAX_METADATA_VALUE_LEN;
use crate::error::VestingError;
use crate::state::VaultAccount;
use crate::utils::token::ensure_rent_exempt;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ChangeEscrowMetadataParams {
    /// One of "name", "symbol", "uri".
    pub param_key: String,
    pub value: String,
}

/// Backend-authorized update of the escrow token's display metadata. No
/// economic effect.
pub fn change_escrow_metadata(
    ctx: Context<ChangeEscrowMetadata>,
    params: ChangeEscrowMetadataParams,
) -> Result<()> {
    require!(!params.value.is_empty(), VestingError::InvalidMetadataField);
    require!(
        params.value.len() <= MAX_METADATA_VALUE_LEN,
        VestingError::InvalidMetadataField
    );

    let field_to_update = match params.param_key.as_str() {
        "name" => Field::Name,
        "symbol" => Field::Symbol,
        "uri" => Field::Uri,
        _ => return err!(VestingError::InvalidMetadataField),
    };

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

    token_metadata_update_field(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TokenMetadataUpdateField {
                token_program_id: ctx.accounts.token_program.to_account_info(),
                metadata: ctx.accounts.escrow_token_mint.to_account_info(),
                update_authority: ctx.accounts.vault_account.to_account_info(),
            },
            vault_signer,
        ),
        field_to_update,
        params.value.clone(),
    )?;

    // A longer value can grow the metadata TLV entry.
    ensure_rent_exempt(
        ctx.accounts.escrow_token_mint.to_account_info(),
        ctx.accounts.payer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
    )?;

    emit!(EscrowMetadataChanged {
        escrow_token_mint: escrow_mint_key,
        field_updated: params.param_key,
        value: params.value,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ChangeEscrowMetadata<'info> {
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

    #[account(mut)]
    pub escrow_token_mint: Box<InterfaceAccount<'info, Mint>>,
    pub valued_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct EscrowMetadataChanged {
    pub escrow_token_mint: Pubkey,
    pub field_updated: String,
    pub value: String,
}
