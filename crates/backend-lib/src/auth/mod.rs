// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module: password hashing, credential store, login throttle.

pub mod password;
pub mod store;
pub mod throttle;

pub use password::{hash_password, verify_password, verify_password_blocking};
pub use store::{MemoryUserStore, User, UserStore};
pub use throttle::AttemptThrottle;
