//! # rt-auth-simple
//!
//! Digest-based implementation of `PrincipalResolver`.
//! Bearer tokens are issued by another service; this plugin only hashes the
//! presented token and looks the digest up through a `UserRepo`.

use async_trait::async_trait;
use rt_core::models::Principal;
use rt_core::traits::{PrincipalResolver, UserRepo};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a raw bearer token, as stored next to the user.
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

pub struct TokenAuthProvider {
    users: Box<dyn UserRepo>,
}

impl TokenAuthProvider {
    pub fn new(users: Box<dyn UserRepo>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl PrincipalResolver for TokenAuthProvider {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Principal>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        let user = self.users.find_by_token_digest(&token_digest(token)).await?;
        if user.is_none() {
            log::debug!("bearer token did not match any user");
        }
        Ok(user.as_ref().map(Principal::from))
    }
}
