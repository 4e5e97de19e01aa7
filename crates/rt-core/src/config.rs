//! Access policy switches consumed by [`crate::service::TripService`].

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessPolicy {
    /// When off, trips can be listed, read, updated and deleted by any
    /// caller. Creating a trip still needs a principal.
    pub enforce_ownership: bool,
    /// Also require ownership for activity create/update/delete.
    /// Has no effect while `enforce_ownership` is off.
    pub guard_activity_mutations: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            enforce_ownership: true,
            guard_activity_mutations: false,
        }
    }
}

impl AccessPolicy {
    pub fn open() -> Self {
        Self {
            enforce_ownership: false,
            guard_activity_mutations: false,
        }
    }

    pub fn strict() -> Self {
        Self {
            enforce_ownership: true,
            guard_activity_mutations: true,
        }
    }

    pub(crate) fn guards_trips(&self) -> bool {
        self.enforce_ownership
    }

    pub(crate) fn guards_activity_mutations(&self) -> bool {
        self.enforce_ownership && self.guard_activity_mutations
    }
}
