//! # Ownership Guard
//!
//! Decides whether a principal may act on an owned resource. Pure: no I/O,
//! no logging. Callers evaluate it after the resource is loaded and before
//! anything is written.

use crate::error::{AppError, Result};
use crate::models::{Principal, Trip};
use uuid::Uuid;

/// Resources with a single owning user.
pub trait OwnedByUser {
    fn owner_id(&self) -> Uuid;

    fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id() == user_id
    }
}

impl OwnedByUser for Trip {
    fn owner_id(&self) -> Uuid {
        self.guide
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl Decision {
    /// Maps a denial onto [`AppError::Unauthorized`].
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied => Err(AppError::Unauthorized(
                "only the owner may access this resource".to_string(),
            )),
        }
    }
}

/// Allowed exactly when a principal is present and owns `resource`.
pub fn authorize<R: OwnedByUser + ?Sized>(principal: Option<&Principal>, resource: &R) -> Decision {
    match principal {
        Some(p) if resource.is_owner(p.user_id) => Decision::Allowed,
        _ => Decision::Denied,
    }
}
