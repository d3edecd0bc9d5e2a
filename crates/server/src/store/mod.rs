//! sqlx-backed stores for the `users` and `pomodoro_sessions` tables.
//!
//! Stores are stateless unit structs with async methods that take a
//! `&PgPool`. Each has a typed error enum carrying an HTTP status mapping.

pub mod sessions;
pub mod users;

pub use sessions::{
    CreateSessionRequest, DailyStat, SessionRecord, SessionStore, SessionStoreError,
};
pub use users::{User, UserStore, UserStoreError};
