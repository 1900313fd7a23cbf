// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};
use zeroize::Zeroize;

/// Hash a password using scrypt with the recommended parameters
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    hash_password_with(plain, Params::recommended())
}

/// Hash a password with an explicit work factor.
///
/// Production callers use [`Params::recommended`]; tests pass cheap
/// parameters so the suite does not spend seconds in the KDF.
pub fn hash_password_with(plain: &str, params: Params) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, salt.as_salt())?
        .to_string();
    Ok(hash)
}

/// Hash a password and wipe the plaintext buffer afterwards
pub fn hash_password_secure(plain: &mut String, params: Params) -> anyhow::Result<String> {
    let hash = hash_password_with(plain, params)?;
    plain.zeroize();
    Ok(hash)
}

/// Verify a password against a PHC-encoded hash.
///
/// An unparseable hash verifies as `false`; constant-time comparison is the
/// scrypt crate's job.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Verify a password on the blocking thread pool.
///
/// The KDF is the one expensive call in the login path and must not stall the
/// async runtime.
pub async fn verify_password_blocking(hash: &str, plain: &str) -> bool {
    let hash = hash.to_string();
    let plain = plain.to_string();
    tokio::task::spawn_blocking(move || verify_password(&hash, &plain))
        .await
        .unwrap_or(false)
}

/// Cheap scrypt parameters for tests.
#[cfg(test)]
pub(crate) fn test_params() -> Params {
    Params::new(5, 8, 1, 32).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password_with("correct horse", test_params()).unwrap();
        assert!(hash.starts_with("$scrypt$"));
        assert!(verify_password(&hash, "correct horse"));
        assert!(!verify_password(&hash, "correct horsf"));
        assert!(!verify_password(&hash, ""));
    }

    #[test]
    fn distinct_salts_per_hash() {
        let a = hash_password_with("same input", test_params()).unwrap();
        let b = hash_password_with("same input", test_params()).unwrap();
        assert_ne!(a, b);
        assert!(verify_password(&a, "same input"));
        assert!(verify_password(&b, "same input"));
    }

    #[test]
    fn garbage_hash_verifies_false() {
        assert!(!verify_password("not a phc string", "anything"));
        assert!(!verify_password("", "anything"));
    }

    #[test]
    fn secure_hash_wipes_plaintext() {
        let mut plain = String::from("password123");
        let hash = hash_password_secure(&mut plain, test_params()).unwrap();
        assert!(plain.is_empty());
        assert!(verify_password(&hash, "password123"));
    }

    #[tokio::test]
    async fn blocking_verify_matches_sync() {
        let hash = hash_password_with("password123", test_params()).unwrap();
        assert!(verify_password_blocking(&hash, "password123").await);
        assert!(!verify_password_blocking(&hash, "password124").await);
    }
}
