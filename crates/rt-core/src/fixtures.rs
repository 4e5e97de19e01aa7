//! Builders shared by the unit tests of this crate.

use crate::models::{ActivityInput, Trip, TripInput};
use crate::trips;
use uuid::Uuid;

pub fn trip_input(title: &str) -> TripInput {
    TripInput {
        title: Some(title.to_string()),
        description: Some("Five days across the high passes".to_string()),
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-01-06".to_string()),
        ..Default::default()
    }
}

pub fn trip_owned_by(guide: Uuid) -> Trip {
    trips::build(guide, &trip_input("Andes Trek")).unwrap()
}

pub fn activity_input(title: &str) -> ActivityInput {
    ActivityInput {
        title: Some(title.to_string()),
        category: Some("Adventure".to_string()),
        description: Some("...".to_string()),
        image: Some("https://img.example/hike.jpg".to_string()),
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-01-02".to_string()),
        ..Default::default()
    }
}
