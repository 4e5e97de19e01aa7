//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use crate::models::{Principal, Trip, User};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Document persistence contract for trips.
///
/// A trip is stored as one document together with its activities. There is
/// no version token: concurrent saves of the same trip race and the last one
/// wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Trip>>;
    /// Trips owned by `guide`, oldest first.
    async fn find_by_guide(&self, guide: Uuid) -> anyhow::Result<Vec<Trip>>;
    async fn list_all(&self) -> anyhow::Result<Vec<Trip>>;

    /// Inserts a new document. The store stamps `created_at` and `updated_at`.
    async fn create(&self, trip: Trip) -> anyhow::Result<Trip>;
    /// Overwrites the whole document and refreshes `updated_at`.
    /// Fails if the trip no longer exists.
    async fn save(&self, trip: Trip) -> anyhow::Result<Trip>;
    /// Removes the document, and with it every nested activity.
    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
}

/// Account lookup contract. Tokens are issued elsewhere; only their digest
/// is ever stored.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, user: User, token_digest: &str) -> anyhow::Result<User>;
    async fn find_by_token_digest(&self, digest: &str) -> anyhow::Result<Option<User>>;
}

/// Identity contract: maps request credentials to the acting principal.
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    /// Returns `None` when the token does not belong to any user.
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Principal>>;
}

// Lets one store instance back several services.
#[async_trait]
impl<T: TripRepo + ?Sized> TripRepo for Arc<T> {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Trip>> {
        (**self).find_by_id(id).await
    }

    async fn find_by_guide(&self, guide: Uuid) -> anyhow::Result<Vec<Trip>> {
        (**self).find_by_guide(guide).await
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Trip>> {
        (**self).list_all().await
    }

    async fn create(&self, trip: Trip) -> anyhow::Result<Trip> {
        (**self).create(trip).await
    }

    async fn save(&self, trip: Trip) -> anyhow::Result<Trip> {
        (**self).save(trip).await
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        (**self).delete(id).await
    }
}

#[async_trait]
impl<T: UserRepo + ?Sized> UserRepo for Arc<T> {
    async fn create(&self, user: User, token_digest: &str) -> anyhow::Result<User> {
        (**self).create(user, token_digest).await
    }

    async fn find_by_token_digest(&self, digest: &str) -> anyhow::Result<Option<User>> {
        (**self).find_by_token_digest(digest).await
    }
}
