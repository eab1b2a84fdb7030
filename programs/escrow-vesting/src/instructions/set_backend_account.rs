use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::BackendData;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct SetBackendAccountParams {
    pub new_backend_account: Pubkey,
    pub new_authority: Option<Pubkey>,
}

pub fn set_backend_account(
    ctx: Context<SetBackendAccount>,
    params: SetBackendAccountParams,
) -> Result<()> {
    require!(
        params.new_backend_account != Pubkey::default(),
        VestingError::InvalidConfig
    );

    let payer = ctx.accounts.payer.key();
    let upgrade_authority = ctx.accounts.program_data.upgrade_authority_address;
    let backend_data = &mut ctx.accounts.backend_data;

    // On first use the singleton is freshly zeroed, so only the upgrade
    // authority can pass this gate.
    let is_upgrade_authority = upgrade_authority == Some(payer);
    let is_change_authority = backend_data.change_authority == Some(payer);
    require!(
        is_upgrade_authority || is_change_authority,
        VestingError::UnauthorizedToExecute
    );

    let old_backend_account = backend_data.backend_account;
    backend_data.backend_account = params.new_backend_account;
    if params.new_authority.is_some() {
        backend_data.change_authority = params.new_authority;
    }

    emit!(BackendAccountSet {
        old_backend_account,
        new_backend_account: backend_data.backend_account,
        change_authority: backend_data.change_authority,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetBackendAccount<'info> {
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + BackendData::SIZE,
        seeds = [b"backend_data"],
        bump
    )]
    pub backend_data: Account<'info, BackendData>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key())
            @ VestingError::InvalidConfig
    )]
    pub program: Program<'info, crate::program::EscrowVesting>,
    pub program_data: Account<'info, ProgramData>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct BackendAccountSet {
    pub old_backend_account: Pubkey,
    pub new_backend_account: Pubkey,
    pub change_authority: Option<Pubkey>,
}
