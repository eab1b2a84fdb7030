pub mod backend;
pub mod session;
pub mod vault;

pub use backend::*;
pub use session::*;
pub use vault::*;
