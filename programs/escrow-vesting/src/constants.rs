//! Program-wide constants.

/// Linear vesting duration shared by all sessions, in seconds (180 days).
/// The math layer takes the duration as a parameter; this is the value the
/// handlers pass in.
pub const VESTING_DURATION_SECONDS: i64 = 180 * 24 * 60 * 60;

/// Max byte length of the vault's multi-tenant `app_id` tag.
pub const MAX_APP_ID_LEN: usize = 64;

/// Max byte length accepted for an escrow token metadata value.
pub const MAX_METADATA_VALUE_LEN: usize = 200;
