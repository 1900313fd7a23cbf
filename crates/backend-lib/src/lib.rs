// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the authapp backend.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod validation;

use crate::auth::{AttemptThrottle, MemoryUserStore, UserStore};
use crate::config::Settings;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Credential store
    pub users: Arc<dyn UserStore>,
    /// Failed-login throttle
    pub throttle: AttemptThrottle,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create application state with the in-memory store
    pub fn new(settings: Settings) -> Self {
        Self::with_store(Arc::new(MemoryUserStore::new()), settings)
    }

    /// Create application state with an injected store. Tests pass a store
    /// with cheap hashing parameters; a persistent backend slots in here
    /// later.
    pub fn with_store(users: Arc<dyn UserStore>, settings: Settings) -> Self {
        let throttle = AttemptThrottle::new(
            settings.throttle.max_attempts,
            settings.throttle.cooldown(),
        );
        Self {
            users,
            throttle,
            settings: Arc::new(settings),
        }
    }
}
