//! Cookie-session authentication: password hashing, token storage, the
//! `CurrentUser` extractor, and the register/login/logout/user handlers.

pub mod extract;
pub mod handlers;
pub mod password;
pub mod store;

pub use extract::CurrentUser;
pub use store::AuthSessionStore;
