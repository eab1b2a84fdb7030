use anchor_lang::prelude::*;

/// Singleton PDA designating the backend operator identity.
///
/// Created once by the program upgrade authority; rotated via
/// `set_backend_account` by the upgrade authority or the registered
/// `change_authority`. Never closed.
#[account]
pub struct BackendData {
    /// Current authorized backend operator.
    pub backend_account: Pubkey,
    /// Optional identity allowed to rotate `backend_account` without the
    /// upgrade authority.
    pub change_authority: Option<Pubkey>,
}

impl BackendData {
    pub const SIZE: usize =
        32 + // backend_account
        1 + 32; // change_authority (option tag + pubkey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_covers_serialized_layout() {
        let populated = BackendData {
            backend_account: Pubkey::new_unique(),
            change_authority: Some(Pubkey::new_unique()),
        };
        assert_eq!(populated.try_to_vec().unwrap().len(), BackendData::SIZE);

        // Freshly initialized singleton (no change authority) fits too.
        let fresh = BackendData {
            backend_account: Pubkey::default(),
            change_authority: None,
        };
        assert!(fresh.try_to_vec().unwrap().len() <= BackendData::SIZE);
    }
}
