use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::shared::validation::ValidationError;

/// Hash a password with argon2 and a random salt (PHC string format)
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Form-level checks for a password change
pub fn validate_new_password(
    new_password: &str,
    confirm_password: &str,
    min_length: usize,
) -> Result<(), ValidationError> {
    if new_password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if new_password.chars().count() < min_length {
        return Err(ValidationError::PasswordTooShort { min: min_length });
    }
    Ok(())
}
