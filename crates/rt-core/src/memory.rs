//! # In-memory store
//!
//! `TripRepo` and `UserRepo` over concurrent maps. Used as the test double
//! and as the `db-memory` backend of the binary. Contents die with the
//! process.

use crate::models::{Trip, User};
use crate::traits::{TripRepo, UserRepo};
use anyhow::bail;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
    trips: DashMap<Uuid, Trip>,
    users: DashMap<Uuid, (User, String)>,
    emails: DashMap<String, Uuid>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }
}

fn oldest_first(mut trips: Vec<Trip>) -> Vec<Trip> {
    trips.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    trips
}

#[async_trait]
impl TripRepo for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Trip>> {
        Ok(self.trips.get(&id).map(|t| t.value().clone()))
    }

    async fn find_by_guide(&self, guide: Uuid) -> anyhow::Result<Vec<Trip>> {
        Ok(oldest_first(
            self.trips
                .iter()
                .filter(|t| t.guide == guide)
                .map(|t| t.value().clone())
                .collect(),
        ))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Trip>> {
        Ok(oldest_first(
            self.trips.iter().map(|t| t.value().clone()).collect(),
        ))
    }

    async fn create(&self, mut trip: Trip) -> anyhow::Result<Trip> {
        let now = Utc::now();
        trip.created_at = now;
        trip.updated_at = now;
        match self.trips.entry(trip.id) {
            Entry::Occupied(_) => bail!("trip {} already exists", trip.id),
            Entry::Vacant(slot) => {
                slot.insert(trip.clone());
            }
        }
        Ok(trip)
    }

    async fn save(&self, mut trip: Trip) -> anyhow::Result<Trip> {
        let Some(mut stored) = self.trips.get_mut(&trip.id) else {
            bail!("trip {} no longer exists", trip.id);
        };
        trip.created_at = stored.created_at;
        trip.updated_at = Utc::now();
        *stored = trip.clone();
        Ok(trip)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.trips.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UserRepo for InMemoryStore {
    async fn create(&self, user: User, token_digest: &str) -> anyhow::Result<User> {
        match self.emails.entry(user.email.to_lowercase()) {
            Entry::Occupied(_) => bail!("email {} is already registered", user.email),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.users
            .insert(user.id, (user.clone(), token_digest.to_string()));
        Ok(user)
    }

    async fn find_by_token_digest(&self, digest: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.value().1 == digest)
            .map(|u| u.value().0.clone()))
    }
}
