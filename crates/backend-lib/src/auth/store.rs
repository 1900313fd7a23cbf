// ============================
// crates/backend-lib/src/auth/store.rs
// ============================
//! Credential store abstraction with in-memory implementation.
use crate::auth::password;
use crate::error::AppError;
use async_trait::async_trait;
use authapp_common::PublicUser;
use parking_lot::RwLock;
use scrypt::Params;

/// A registered user. Never leaves the server whole; API responses carry
/// the [`PublicUser`] projection.
#[derive(Debug, Clone)]
pub struct User {
    /// Sequential id, assigned at creation ("1", "2", ...)
    pub id: String,
    /// Unique key; uniqueness is checked by the caller before `create`
    pub email: String,
    pub name: String,
    /// PHC-encoded scrypt hash
    pub password_hash: String,
    /// No upload path exists yet, so this stays `None`
    pub avatar_url: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Trait for credential store backends
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email. Case-sensitive exact match.
    async fn find_by_email(&self, email: &str) -> Option<User>;

    /// Hash the password, assign the next sequential id and append the
    /// record. Returns `EmailTaken` if the email is already registered: the
    /// handler's pre-check and the append straddle the hash await, so the
    /// store re-checks atomically with the append. A hashing failure
    /// propagates; nothing is written before the append, so there is no
    /// rollback.
    async fn create(&self, email: &str, name: &str, password: &str) -> Result<User, AppError>;
}

/// In-memory implementation of the `UserStore` trait
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
    params: Params,
}

impl MemoryUserStore {
    /// Store hashing with the recommended scrypt work factor
    pub fn new() -> Self {
        Self::with_params(Params::recommended())
    }

    /// Store hashing with an explicit work factor (tests use cheap params)
    pub fn with_params(params: Params) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            params,
        }
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.read().iter().find(|u| u.email == email).cloned()
    }

    async fn create(&self, email: &str, name: &str, password: &str) -> Result<User, AppError> {
        // The KDF is expensive; keep it off the async runtime and wipe the
        // plaintext copy once hashed.
        let params = self.params.clone();
        let mut plain = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || {
            password::hash_password_secure(&mut plain, params)
        })
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))?;

        // Duplicate check, id assignment and append happen under one write
        // lock: two concurrent registrations of the same email both pass the
        // handler's pre-check while one of them is still hashing.
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailTaken);
        }
        let user = User {
            id: (users.len() + 1).to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash,
            avatar_url: None,
        };
        users.push(user.clone());
        Ok(user)
    }
}
