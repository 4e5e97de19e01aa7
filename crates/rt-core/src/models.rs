//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Trips.
//! A Trip owns its Activities by containment: they live inside the trip
//! document and are never stored or addressed on their own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role assigned to users that never picked one.
pub const DEFAULT_ROLE: &str = "Tourist";

/// A registered account. Owns trips as their "guide".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, first_name: &str, last_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: DEFAULT_ROLE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The identity a request acts as, as resolved from its credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: Uuid,
    pub role: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role.clone(),
        }
    }
}

/// Kind of bookable item an activity describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Adventure,
    Restaurant,
    Culture,
    Shopping,
    Sports,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Adventure,
        Category::Restaurant,
        Category::Culture,
        Category::Shopping,
        Category::Sports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Adventure => "Adventure",
            Category::Restaurant => "Restaurant",
            Category::Culture => "Culture",
            Category::Shopping => "Shopping",
            Category::Sports => "Sports",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// One entry of a trip's itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique within the parent trip, stable for the activity's lifetime
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// An itinerary owned by a single guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Owner. Set once from the creating principal, never patched.
    pub guide: Uuid,
    /// Insertion order is the canonical order.
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub included_in_trip: Vec<String>,
    #[serde(default)]
    pub what_to_bring: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client payload for creating a trip.
///
/// There is no `guide` field: a `guide` key sent by a client is dropped
/// during deserialization, the owner always comes from the principal.
/// Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub recommendation: Option<String>,
    pub city: Option<String>,
    pub included_in_trip: Option<Vec<String>>,
    pub what_to_bring: Option<Vec<String>>,
}

/// Partial trip update. Only the present, non-blank fields are applied.
pub type TripPatch = TripInput;

/// Client payload for creating an activity. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub address: Option<String>,
}

/// Partial activity update. Only the present, non-blank fields are applied.
pub type ActivityPatch = ActivityInput;
