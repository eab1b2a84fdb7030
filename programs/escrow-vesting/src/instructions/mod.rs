pub mod set_backend_account;
pub mod init_escrow_token;
pub mod init_vault_token_accounts;
pub mod change_escrow_metadata;
pub mod exchange;
pub mod create_vesting_session;
pub mod session_withdraw;
pub mod session_cancel;
pub mod session_exit;

pub use set_backend_account::*;
pub use init_escrow_token::*;
pub use init_vault_token_accounts::*;
pub use change_escrow_metadata::*;
pub use exchange::*;
pub use create_vesting_session::*;
pub use session_withdraw::*;
pub use session_cancel::*;
pub use session_exit::*;
