//! # Resource Operation Orchestrator
//!
//! The ten trip and activity operations. Each one runs the same pipeline:
//! load the trip, authorize, mutate in memory, persist once. The first
//! failing step ends the operation; store errors surface as
//! [`AppError::StoreFailure`] and nothing is retried.

use crate::activities;
use crate::config::AccessPolicy;
use crate::error::{AppError, Result};
use crate::guard;
use crate::models::{Activity, ActivityInput, ActivityPatch, Principal, Trip, TripInput, TripPatch};
use crate::traits::TripRepo;
use crate::trips;
use uuid::Uuid;

pub struct TripService {
    repo: Box<dyn TripRepo>,
    policy: AccessPolicy,
}

impl TripService {
    pub fn new(repo: Box<dyn TripRepo>, policy: AccessPolicy) -> Self {
        Self { repo, policy }
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    // ── Trips ────────────────────────────────────────────────────────────────

    /// The principal's own trips, or every trip in open mode.
    pub async fn list_trips(&self, principal: Option<&Principal>) -> Result<Vec<Trip>> {
        if !self.policy.guards_trips() {
            return Ok(self.repo.list_all().await?);
        }
        let principal = principal
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_string()))?;
        Ok(self.repo.find_by_guide(principal.user_id).await?)
    }

    pub async fn show_trip(&self, principal: Option<&Principal>, trip_id: Uuid) -> Result<Trip> {
        let trip = self.load(trip_id).await?;
        if self.policy.guards_trips() {
            self.authorize(principal, &trip)?;
        }
        Ok(trip)
    }

    /// Creates a trip owned by `principal`, whatever the input claims.
    pub async fn create_trip(&self, principal: &Principal, input: &TripInput) -> Result<Trip> {
        let trip = trips::build(principal.user_id, input)?;
        let created = self.repo.create(trip).await?;
        log::info!("trip {} created by {}", created.id, principal.user_id);
        Ok(created)
    }

    pub async fn update_trip(
        &self,
        principal: Option<&Principal>,
        trip_id: Uuid,
        patch: &TripPatch,
    ) -> Result<Trip> {
        let trip = self.load(trip_id).await?;
        if self.policy.guards_trips() {
            self.authorize(principal, &trip)?;
        }
        let merged = trips::merge(&trip, patch)?;
        let saved = self.repo.save(merged).await?;
        log::info!("trip {} updated", saved.id);
        Ok(saved)
    }

    /// Deletes the trip document; its activities go with it.
    pub async fn delete_trip(&self, principal: Option<&Principal>, trip_id: Uuid) -> Result<()> {
        let trip = self.load(trip_id).await?;
        if self.policy.guards_trips() {
            self.authorize(principal, &trip)?;
        }
        self.repo.delete(trip.id).await?;
        log::info!(
            "trip {} deleted with {} activities",
            trip.id,
            trip.activities.len()
        );
        Ok(())
    }

    // ── Activities ───────────────────────────────────────────────────────────
    // Reads are open to any caller who can name the trip.

    /// The trip whose activity sequence is being listed, activities in
    /// insertion order.
    pub async fn list_activities(&self, trip_id: Uuid) -> Result<Trip> {
        let trip = self.load(trip_id).await?;
        log::debug!(
            "trip {trip_id} lists {} activities",
            activities::list(&trip).len()
        );
        Ok(trip)
    }

    pub async fn show_activity(&self, trip_id: Uuid, activity_id: Uuid) -> Result<Activity> {
        let trip = self.load(trip_id).await?;
        activities::find(&trip, activity_id).cloned()
    }

    pub async fn create_activity(
        &self,
        principal: Option<&Principal>,
        trip_id: Uuid,
        input: &ActivityInput,
    ) -> Result<Activity> {
        let mut trip = self.load_for_activity_mutation(principal, trip_id).await?;
        let created = activities::insert(&mut trip, input)?;
        self.repo.save(trip).await?;
        log::info!("activity {} added to trip {}", created.id, trip_id);
        Ok(created)
    }

    /// Returns the parent trip as persisted after the update.
    pub async fn update_activity(
        &self,
        principal: Option<&Principal>,
        trip_id: Uuid,
        activity_id: Uuid,
        patch: &ActivityPatch,
    ) -> Result<Trip> {
        let mut trip = self.load_for_activity_mutation(principal, trip_id).await?;
        activities::apply_partial_update(&mut trip, activity_id, patch)?;
        let saved = self.repo.save(trip).await?;
        log::info!("activity {} of trip {} updated", activity_id, trip_id);
        Ok(saved)
    }

    /// Returns the parent trip as persisted after the removal.
    pub async fn delete_activity(
        &self,
        principal: Option<&Principal>,
        trip_id: Uuid,
        activity_id: Uuid,
    ) -> Result<Trip> {
        let mut trip = self.load_for_activity_mutation(principal, trip_id).await?;
        activities::remove(&mut trip, activity_id)?;
        let saved = self.repo.save(trip).await?;
        log::info!("activity {} removed from trip {}", activity_id, trip_id);
        Ok(saved)
    }

    // ── Steps ────────────────────────────────────────────────────────────────

    async fn load(&self, trip_id: Uuid) -> Result<Trip> {
        self.repo
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| AppError::trip_not_found(trip_id))
    }

    async fn load_for_activity_mutation(
        &self,
        principal: Option<&Principal>,
        trip_id: Uuid,
    ) -> Result<Trip> {
        let trip = self.load(trip_id).await?;
        if self.policy.guards_activity_mutations() {
            self.authorize(principal, &trip)?;
        }
        Ok(trip)
    }

    fn authorize(&self, principal: Option<&Principal>, trip: &Trip) -> Result<()> {
        guard::authorize(principal, trip).into_result().inspect_err(|_| {
            log::warn!(
                "denied access to trip {} for {:?}",
                trip.id,
                principal.map(|p| p.user_id)
            );
        })
    }
}
