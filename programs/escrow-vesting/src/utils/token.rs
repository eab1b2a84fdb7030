//! Token CPI helpers shared by the instruction handlers.

use anchor_lang::{
    prelude::*,
    solana_program::{program::invoke, system_instruction},
};
use anchor_spl::token_interface::{
    mint_to, transfer_checked, Mint, MintTo, Token2022, TokenAccount, TransferChecked,
};

use crate::error::VestingError;
use crate::state::VaultAccount;

/// `transfer_checked` wrapper; signs with the vault PDA when `signer_seeds`
/// is provided, otherwise with `authority` directly.
pub fn transfer_asset<'info>(
    from: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    to: &InterfaceAccount<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from: from.to_account_info(),
        mint: mint.to_account_info(),
        to: to.to_account_info(),
        authority,
    };
    let cpi_ctx = match signer_seeds {
        Some(seeds) => CpiContext::new_with_signer(token_program, cpi_accounts, seeds),
        None => CpiContext::new(token_program, cpi_accounts),
    };
    transfer_checked(cpi_ctx, amount, mint.decimals)
}

/// Pays `amount` escrow out of the vault: recoverable balance first (escrow
/// the vault holds beyond active-session reservations), minting only the
/// shortfall. The vault PDA is both the token-account authority and the mint
/// authority.
pub fn pay_escrow_from_vault<'info>(
    token_program: &Program<'info, Token2022>,
    vault_account: &Account<'info, VaultAccount>,
    escrow_vault_token_account: &InterfaceAccount<'info, TokenAccount>,
    destination: &InterfaceAccount<'info, TokenAccount>,
    escrow_token_mint: &InterfaceAccount<'info, Mint>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    let recoverable = escrow_vault_token_account
        .amount
        .saturating_sub(vault_account.locked_amount);
    let amount_to_transfer = recoverable.min(amount);
    let amount_to_mint = amount
        .checked_sub(amount_to_transfer)
        .ok_or(VestingError::MathOverflow)?;

    if amount_to_transfer > 0 {
        transfer_asset(
            escrow_vault_token_account,
            escrow_token_mint,
            destination,
            vault_account.to_account_info(),
            token_program.to_account_info(),
            amount_to_transfer,
            Some(signer_seeds),
        )?;
    }

    if amount_to_mint > 0 {
        mint_to(
            CpiContext::new_with_signer(
                token_program.to_account_info(),
                MintTo {
                    mint: escrow_token_mint.to_account_info(),
                    to: destination.to_account_info(),
                    authority: vault_account.to_account_info(),
                },
                signer_seeds,
            ),
            amount_to_mint,
        )?;
    }

    Ok(())
}

/// Tops an account up to rent exemption. Metadata writes grow the mint
/// account, so the payer covers the difference afterwards.
pub fn ensure_rent_exempt<'info>(
    account: AccountInfo<'info>,
    payer: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
) -> Result<()> {
    let lamports = account.get_lamports();
    let required = Rent::get()?.minimum_balance(account.data_len());
    if lamports < required {
        invoke(
            &system_instruction::transfer(payer.key, account.key, required - lamports),
            &[payer, account, system_program],
        )?;
    }
    Ok(())
}
