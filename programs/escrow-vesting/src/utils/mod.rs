pub mod extensions;
pub mod token;
pub mod vesting;
