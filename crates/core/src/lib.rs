pub mod config;
pub mod error;
pub mod session;

pub use config::Config;
pub use error::*;
pub use session::*;
