//! Pure linear-vesting math.
//!
//! `vested(now) = amount * min(max(now - start, 0), duration) / duration`,
//! whole seconds, floor division. The duration is a parameter so handlers can
//! pass the global constant while tests inject short schedules.

use crate::error::VestingError;

/// Total quantity vested by `now` for a session of `amount` started at
/// `start_date`. Clamped to `amount`; returns 0 when the clock reads earlier
/// than the start (skew guard).
pub fn vested_amount(
    amount: u64,
    start_date: i64,
    now: i64,
    duration: i64,
) -> Result<u64, VestingError> {
    if duration <= 0 {
        return Err(VestingError::InvalidConfig);
    }
    let elapsed = now.saturating_sub(start_date).max(0).min(duration);
    let vested = (amount as u128)
        .checked_mul(elapsed as u128)
        .ok_or(VestingError::MathOverflow)?
        .checked_div(duration as u128)
        .ok_or(VestingError::MathOverflow)?;
    u64::try_from(vested).map_err(|_| VestingError::MathOverflow)
}

/// Quantity releasable right now: vested-to-date minus already withdrawn.
/// Never exceeds `amount - amount_withdrawn` because `vested <= amount`.
pub fn claimable_amount(
    amount: u64,
    amount_withdrawn: u64,
    start_date: i64,
    now: i64,
    duration: i64,
) -> Result<u64, VestingError> {
    let vested = vested_amount(amount, start_date, now, duration)?;
    Ok(vested.saturating_sub(amount_withdrawn))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    const DURATION: i64 = 180 * DAY;

    #[test]
    fn nothing_vested_at_start() {
        assert_eq!(vested_amount(1_000, 100, 100, DURATION).unwrap(), 0);
    }

    #[test]
    fn fully_vested_at_duration_and_beyond() {
        let start = 1_700_000_000;
        assert_eq!(
            vested_amount(1_000, start, start + DURATION, DURATION).unwrap(),
            1_000
        );
        assert_eq!(
            vested_amount(1_000, start, start + DURATION * 10, DURATION).unwrap(),
            1_000
        );
    }

    #[test]
    fn vesting_is_monotonic() {
        let start = 0;
        let mut prev = 0;
        for day in 0..=200 {
            let v = vested_amount(999_983, start, day * DAY, DURATION).unwrap();
            assert!(v >= prev, "vested decreased at day {day}");
            prev = v;
        }
        assert_eq!(prev, 999_983);
    }

    #[test]
    fn division_truncates_toward_zero() {
        // 10 units over 180 days: one second in vests 10*1/DURATION = 0.
        assert_eq!(vested_amount(10, 0, 1, DURATION).unwrap(), 0);
        // Half the schedule of an odd amount floors.
        assert_eq!(vested_amount(3, 0, DURATION / 2, DURATION).unwrap(), 1);
    }

    #[test]
    fn clock_skew_before_start_yields_zero() {
        assert_eq!(vested_amount(1_000, 500, 400, DURATION).unwrap(), 0);
        assert_eq!(claimable_amount(1_000, 0, 500, 400, DURATION).unwrap(), 0);
    }

    #[test]
    fn claimable_subtracts_withdrawn() {
        let start = 0;
        let halfway = DURATION / 2;
        let vested = vested_amount(1_000, start, halfway, DURATION).unwrap();
        assert_eq!(vested, 500);
        assert_eq!(
            claimable_amount(1_000, 200, start, halfway, DURATION).unwrap(),
            300
        );
        // Withdrawn ahead of schedule (e.g. right after a credit): zero, not underflow.
        assert_eq!(
            claimable_amount(1_000, 500, start, halfway, DURATION).unwrap(),
            0
        );
    }

    #[test]
    fn withdraw_is_idempotent_within_same_instant() {
        let start = 0;
        let now = 37 * DAY;
        let first = claimable_amount(1_000, 0, start, now, DURATION).unwrap();
        assert!(first > 0);
        // After crediting `first`, a retry at the same instant claims nothing.
        assert_eq!(
            claimable_amount(1_000, first, start, now, DURATION).unwrap(),
            0
        );
    }

    #[test]
    fn lifetime_withdrawals_never_exceed_amount() {
        let amount = 777_777;
        let start = 0;
        let mut withdrawn = 0u64;
        for day in [1, 30, 90, 179, 180, 365] {
            let c = claimable_amount(amount, withdrawn, start, day * DAY, DURATION).unwrap();
            withdrawn += c;
            assert!(withdrawn <= amount);
        }
        assert_eq!(withdrawn, amount);
    }

    #[test]
    fn locked_three_of_five_releases_exactly_three() {
        // A user who exchanged 5 and locked 3 can claim exactly 3 once the
        // full schedule elapses, and nothing more afterwards.
        let start = 1_700_000_000;
        let locked = 3;
        let c = claimable_amount(locked, 0, start, start + DURATION, DURATION).unwrap();
        assert_eq!(c, 3);
        assert_eq!(
            claimable_amount(locked, c, start, start + DURATION + DAY, DURATION).unwrap(),
            0
        );
    }

    #[test]
    fn no_overflow_at_u64_max() {
        let v = vested_amount(u64::MAX, 0, DURATION, DURATION).unwrap();
        assert_eq!(v, u64::MAX);
        assert!(vested_amount(u64::MAX, 0, DURATION / 3, DURATION).unwrap() < u64::MAX);
    }

    #[test]
    fn zero_or_negative_duration_is_rejected() {
        assert!(matches!(
            vested_amount(1, 0, 1, 0),
            Err(VestingError::InvalidConfig)
        ));
        assert!(matches!(
            vested_amount(1, 0, 1, -5),
            Err(VestingError::InvalidConfig)
        ));
    }
}
