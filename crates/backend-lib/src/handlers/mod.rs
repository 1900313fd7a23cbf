// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers for the auth API.

pub mod health;
pub mod login;
pub mod register;

pub use health::health;
pub use login::login;
pub use register::register;
