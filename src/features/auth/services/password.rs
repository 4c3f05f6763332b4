//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Stored format: `pbkdf2-sha256$<iterations>$<salt-hex>$<hash-hex>`.

use lazy_static::lazy_static;
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use thiserror::Error;

const SCHEME: &str = "pbkdf2-sha256";
const DEFAULT_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

lazy_static! {
    /// Hash checked when a login names an unknown user, so both paths cost the same
    static ref DUMMY_HASH: String = hash_password("codecraft-dummy-password");
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("malformed password hash")]
    MalformedHash,
}

pub fn hash_password(password: &str) -> String {
    hash_password_with(password, DEFAULT_ITERATIONS)
}

pub fn hash_password_with(password: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let hash = derive(password.as_bytes(), &salt, iterations);

    format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        hex::encode(salt),
        hex::encode(hash)
    )
}

/// Check a password against a stored hash; the iteration count comes from the hash.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(PasswordError::MalformedHash);
    };

    let iterations = iterations
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(PasswordError::MalformedHash)?;
    let salt = hex::decode(salt).map_err(|_| PasswordError::MalformedHash)?;
    let expected = hex::decode(expected).map_err(|_| PasswordError::MalformedHash)?;

    let actual = derive(password.as_bytes(), &salt, iterations);
    Ok(constant_time_eq(&actual, &expected))
}

/// Spend the same work as a real check, for logins that match no account
pub fn verify_against_dummy(password: &str) {
    let _ = verify_password(password, &DUMMY_HASH);
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; HASH_LEN] {
    let mut output = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut output);
    output
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
