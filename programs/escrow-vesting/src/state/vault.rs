use anchor_lang::prelude::*;

use crate::constants::MAX_APP_ID_LEN;

/// Custody aggregate for one (valued mint, escrow mint) pair.
///
/// The vault PDA is the authority over two associated token accounts, one per
/// mint. Solvency invariant: the valued vault balance covers
/// `sum(amount - amount_withdrawn)` over all non-cancelled sessions bound to
/// this vault; `locked_amount` tracks that sum. Escrow held by the vault in
/// excess of `locked_amount` is recoverable and is paid out by `exchange`
/// before any new escrow is minted.
#[account]
pub struct VaultAccount {
    /// Identity that created the vault (root authority for its PDA seeds).
    pub creator: Pubkey,
    /// Backend operator bound to this vault at creation.
    pub backend: Pubkey,
    /// Mint of the primary asset users deposit and ultimately withdraw.
    pub valued_token_mint: Pubkey,
    /// Mint of the 1:1 non-transferable receipt asset.
    pub escrow_token_mint: Pubkey,
    /// Opaque multi-tenant partitioning tag.
    pub app_id: String,
    /// Escrow currently reserved by active vesting sessions.
    pub locked_amount: u64,
}

impl VaultAccount {
    pub const SIZE: usize =
        32 + // creator
        32 + // backend
        32 + // valued_token_mint
        32 + // escrow_token_mint
        4 + MAX_APP_ID_LEN + // app_id (string header + max bytes)
        8; // locked_amount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_covers_max_length_app_id() {
        let vault = VaultAccount {
            creator: Pubkey::new_unique(),
            backend: Pubkey::new_unique(),
            valued_token_mint: Pubkey::new_unique(),
            escrow_token_mint: Pubkey::new_unique(),
            app_id: "a".repeat(MAX_APP_ID_LEN),
            locked_amount: u64::MAX,
        };
        assert_eq!(vault.try_to_vec().unwrap().len(), VaultAccount::SIZE);
    }
}
