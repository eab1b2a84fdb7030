//! Token-2022 extension screening for the valued (foreign) mint.
//!
//! The vault custodies valued tokens 1:1 against escrow receipts, so mints
//! whose transfers can fee away value or invoke arbitrary hook programs would
//! break the accounting. Classic SPL Token mints pass unconditionally.

use anchor_lang::prelude::*;
use anchor_spl::token::spl_token;
use anchor_spl::token_2022::spl_token_2022::{
    self,
    extension::{
        transfer_fee::TransferFeeConfig, transfer_hook::TransferHook, BaseStateWithExtensions,
        ExtensionType, StateWithExtensions,
    },
    state::Mint,
};

use crate::error::VestingError;

pub fn validate_valued_mint(mint_acc_info: &AccountInfo) -> Result<()> {
    if mint_acc_info.owner == &spl_token::id() {
        return Ok(());
    }

    let mint_data = mint_acc_info.data.borrow();
    let mint = StateWithExtensions::<Mint>::unpack(&mint_data)?;
    for ext in mint.get_extension_types()? {
        screen_extension(&mint, ext)?;
    }
    Ok(())
}

fn screen_extension(mint: &StateWithExtensions<'_, Mint>, ext: ExtensionType) -> Result<()> {
    match ext {
        // Conditionally acceptable: only in their inert configurations.
        ExtensionType::TransferFeeConfig => require_zero_transfer_fee(mint),
        ExtensionType::TransferHook => require_inert_transfer_hook(mint),
        // Harmless for custody accounting.
        ExtensionType::MintCloseAuthority
        | ExtensionType::MetadataPointer
        | ExtensionType::PermanentDelegate
        | ExtensionType::TokenMetadata => Ok(()),
        _ => err!(VestingError::UnsupportedTokenExtension),
    }
}

fn require_zero_transfer_fee(mint: &StateWithExtensions<'_, Mint>) -> Result<()> {
    let fee = mint.get_extension::<TransferFeeConfig>()?;
    let older = u16::from(fee.older_transfer_fee.transfer_fee_basis_points);
    let newer = u16::from(fee.newer_transfer_fee.transfer_fee_basis_points);
    require!(
        older == 0 && newer == 0,
        VestingError::UnsupportedTokenExtension
    );
    Ok(())
}

fn require_inert_transfer_hook(mint: &StateWithExtensions<'_, Mint>) -> Result<()> {
    let hook = mint.get_extension::<TransferHook>()?;
    let hook_program: Option<Pubkey> = hook.program_id.into();
    require!(
        hook_program.is_none(),
        VestingError::UnsupportedTokenExtension
    );
    Ok(())
}
