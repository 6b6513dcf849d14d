use anyhow::Context;
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::warn;

/// Argon2id credential hashing. Work runs on the blocking pool so a login
/// burst does not stall the request executor.
#[derive(Clone, Default)]
pub struct Passwords {
    argon: Argon2<'static>,
}

impl Passwords {
    /// Returns a PHC string (`$argon2id$...`) with a fresh per-call salt.
    pub async fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let argon = self.argon.clone();
        let plain = plain.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon
                .hash_password(plain.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| anyhow::anyhow!("hashing user password: {e}"))
        })
        .await
        .context("password hashing task")?
    }

    /// `Ok(false)` for a mismatch. A stored hash that does not parse is an
    /// error, since it means the users table holds something we never wrote.
    pub async fn verify(&self, plain: &str, stored: &str) -> anyhow::Result<bool> {
        let argon = self.argon.clone();
        let plain = plain.to_owned();
        let stored = stored.to_owned();
        tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
            let parsed = PasswordHash::new(&stored).map_err(|e| {
                warn!(error = %e, "stored password hash is malformed");
                anyhow::anyhow!("parsing stored password hash: {e}")
            })?;
            match argon.verify_password(plain.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(anyhow::anyhow!("verifying user password: {e}")),
            }
        })
        .await
        .context("password verification task")?
    }
}
