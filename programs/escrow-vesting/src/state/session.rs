use anchor_lang::prelude::*;

/// Per-(vault, user) session counter PDA. Sole source of new session
/// addresses; `last_session_id` starts at 0 and only ever increments.
#[account]
pub struct VestingSessionsAccount {
    /// ID assigned to the next session created by this user.
    pub last_session_id: u64,
    /// Depositor this counter belongs to.
    pub user: Pubkey,
}

impl VestingSessionsAccount {
    pub const SIZE: usize =
        8 + // last_session_id
        32; // user
}

/// One locked-amount commitment with its own linear release clock.
///
/// Active while `cancelled_at == 0`; `session_cancel` and `session_exit` are
/// the only terminal transitions and set it exactly once. Terminal sessions
/// are read-only and kept for audit, never closed.
#[account]
pub struct VestingSession {
    /// Identifier within the parent sessions account.
    pub id: u64,
    /// Depositor.
    pub user: Pubkey,
    /// Parent counter account.
    pub vesting_sessions_account: Pubkey,
    /// Escrow quantity locked at creation; fixed for the session's life.
    pub amount: u64,
    /// Monotonically non-decreasing; never exceeds `amount`.
    pub amount_withdrawn: u64,
    /// Creation timestamp (Unix seconds).
    pub start_date: i64,
    /// 0 until the first withdrawal, then the time of the latest one.
    pub last_withdraw_at: i64,
    /// 0 while active; the cancellation/exit timestamp once terminal.
    pub cancelled_at: i64,
}

impl VestingSession {
    pub const SIZE: usize =
        8 + // id
        32 + // user
        32 + // vesting_sessions_account
        8 + // amount
        8 + // amount_withdrawn
        8 + // start_date
        8 + // last_withdraw_at
        8; // cancelled_at

    pub fn is_cancelled(&self) -> bool {
        self.cancelled_at != 0
    }

    /// Remaining locked quantity, i.e. what an exit would release.
    pub fn remaining(&self) -> u64 {
        self.amount.saturating_sub(self.amount_withdrawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(amount: u64, amount_withdrawn: u64, cancelled_at: i64) -> VestingSession {
        VestingSession {
            id: 0,
            user: Pubkey::new_unique(),
            vesting_sessions_account: Pubkey::new_unique(),
            amount,
            amount_withdrawn,
            start_date: 1_700_000_000,
            last_withdraw_at: 0,
            cancelled_at,
        }
    }

    #[test]
    fn sizes_match_serialized_layouts() {
        let sessions = VestingSessionsAccount {
            last_session_id: 7,
            user: Pubkey::new_unique(),
        };
        assert_eq!(
            sessions.try_to_vec().unwrap().len(),
            VestingSessionsAccount::SIZE
        );
        assert_eq!(
            session(5, 2, 0).try_to_vec().unwrap().len(),
            VestingSession::SIZE
        );
    }

    #[test]
    fn exit_remainder_ignores_the_schedule() {
        // The escape hatch releases everything not yet withdrawn no matter
        // how little time has elapsed; only the signer set gates it.
        assert_eq!(session(10, 0, 0).remaining(), 10);
        assert_eq!(session(10, 4, 0).remaining(), 6);
        // A terminal settlement leaves nothing to release.
        assert_eq!(session(10, 10, 99).remaining(), 0);
    }

    #[test]
    fn terminal_marker_flips_once_cancelled_at_is_set() {
        assert!(!session(10, 0, 0).is_cancelled());
        assert!(session(10, 0, 1_700_000_500).is_cancelled());
    }
}
