//! # Activity Collection Manager
//!
//! Operations on the activity list of an already loaded trip. Everything
//! here works on the in-memory copy; persisting the parent is up to the
//! caller and happens once per logical operation.
//!
//! A failing call never leaves the trip half-modified: inputs are parsed
//! and validated before the list is touched.

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityInput, ActivityPatch, Category, Trip};
use crate::validate::{
    check_date_order, check_price, non_blank, optional_date, required, required_date,
};
use uuid::Uuid;

/// The trip's activities, in insertion order.
pub fn list(trip: &Trip) -> &[Activity] {
    &trip.activities
}

pub fn find(trip: &Trip, activity_id: Uuid) -> Result<&Activity> {
    trip.activities
        .iter()
        .find(|a| a.id == activity_id)
        .ok_or_else(|| AppError::activity_not_found(activity_id))
}

/// Validates `input`, appends the new activity and returns it.
pub fn insert(trip: &mut Trip, input: &ActivityInput) -> Result<Activity> {
    let start_date = required_date("startDate", &input.start_date)?;
    let end_date = required_date("endDate", &input.end_date)?;
    check_date_order(start_date, end_date)?;

    let activity = Activity {
        id: fresh_id(trip),
        title: required("title", &input.title)?.to_string(),
        category: parse_category(required("category", &input.category)?)?,
        description: required("description", &input.description)?.to_string(),
        image: required("image", &input.image)?.to_string(),
        price: check_price(input.price.unwrap_or(0.0))?,
        start_date,
        end_date,
        address: non_blank(&input.address).map(str::to_string),
    };

    trip.activities.push(activity.clone());
    Ok(activity)
}

/// Overwrites the fields present in `patch` on the matching activity and
/// returns its new state. Absent or blank fields are left as they are;
/// `price: 0` counts as present.
pub fn apply_partial_update(
    trip: &mut Trip,
    activity_id: Uuid,
    patch: &ActivityPatch,
) -> Result<Activity> {
    let slot = trip
        .activities
        .iter_mut()
        .find(|a| a.id == activity_id)
        .ok_or_else(|| AppError::activity_not_found(activity_id))?;

    let mut updated = slot.clone();
    if let Some(title) = non_blank(&patch.title) {
        updated.title = title.to_string();
    }
    if let Some(category) = non_blank(&patch.category) {
        updated.category = parse_category(category)?;
    }
    if let Some(description) = non_blank(&patch.description) {
        updated.description = description.to_string();
    }
    if let Some(image) = non_blank(&patch.image) {
        updated.image = image.to_string();
    }
    if let Some(price) = patch.price {
        updated.price = check_price(price)?;
    }
    if let Some(start) = optional_date("startDate", &patch.start_date)? {
        updated.start_date = start;
    }
    if let Some(end) = optional_date("endDate", &patch.end_date)? {
        updated.end_date = end;
    }
    if let Some(address) = non_blank(&patch.address) {
        updated.address = Some(address.to_string());
    }
    check_date_order(updated.start_date, updated.end_date)?;

    *slot = updated.clone();
    Ok(updated)
}

/// Drops the matching activity, keeping the others in order.
pub fn remove(trip: &mut Trip, activity_id: Uuid) -> Result<()> {
    let index = trip
        .activities
        .iter()
        .position(|a| a.id == activity_id)
        .ok_or_else(|| AppError::activity_not_found(activity_id))?;
    trip.activities.remove(index);
    Ok(())
}

fn parse_category(raw: &str) -> Result<Category> {
    raw.parse().map_err(AppError::ValidationError)
}

// v7 ids are time-ordered and random, so a clash is practically impossible,
// but uniqueness within the parent is checked anyway.
fn fresh_id(trip: &Trip) -> Uuid {
    loop {
        let id = Uuid::now_v7();
        if trip.activities.iter().all(|a| a.id != id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{activity_input, trip_owned_by};
    use std::collections::HashSet;

    #[test]
    fn inserted_activity_is_found_by_its_id() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let created = insert(&mut trip, &activity_input("Hike")).unwrap();

        assert_eq!(find(&trip, created.id).unwrap(), &created);
        assert_eq!(created.price, 0.0);
        assert_eq!(created.category, Category::Adventure);
    }

    #[test]
    fn ids_are_unique_and_order_is_insertion_order() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let titles = ["Hike", "Lunch", "Museum", "Market", "Climb"];
        for title in titles {
            insert(&mut trip, &activity_input(title)).unwrap();
        }

        let ids: HashSet<_> = list(&trip).iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), titles.len());
        let listed: Vec<_> = list(&trip).iter().map(|a| a.title.as_str()).collect();
        assert_eq!(listed, titles);
    }

    #[test]
    fn missing_required_field_leaves_trip_untouched() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let input = ActivityInput {
            image: Some("  ".into()),
            ..activity_input("Hike")
        };

        let err = insert(&mut trip, &input).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("image")));
        assert!(trip.activities.is_empty());
    }

    #[test]
    fn unknown_category_is_a_validation_error() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let input = ActivityInput {
            category: Some("Skydiving".into()),
            ..activity_input("Jump")
        };
        assert!(matches!(
            insert(&mut trip, &input),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn end_before_start_is_rejected_on_insert() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let input = ActivityInput {
            start_date: Some("2024-01-05".into()),
            end_date: Some("2024-01-02".into()),
            ..activity_input("Hike")
        };
        assert!(insert(&mut trip, &input).is_err());
        assert!(trip.activities.is_empty());
    }

    #[test]
    fn partial_update_only_touches_present_fields() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let original = insert(
            &mut trip,
            &ActivityInput {
                price: Some(40.0),
                ..activity_input("Hike")
            },
        )
        .unwrap();

        let patch = ActivityPatch {
            price: Some(55.5),
            title: Some(String::new()),
            ..Default::default()
        };
        let updated = apply_partial_update(&mut trip, original.id, &patch).unwrap();

        assert_eq!(updated.price, 55.5);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.image, original.image);
        assert_eq!(updated.start_date, original.start_date);
        assert_eq!(find(&trip, original.id).unwrap(), &updated);
    }

    #[test]
    fn price_of_zero_is_applied() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let original = insert(
            &mut trip,
            &ActivityInput {
                price: Some(25.0),
                ..activity_input("Dinner")
            },
        )
        .unwrap();

        let patch = ActivityPatch {
            price: Some(0.0),
            ..Default::default()
        };
        let updated = apply_partial_update(&mut trip, original.id, &patch).unwrap();
        assert_eq!(updated.price, 0.0);
    }

    #[test]
    fn invalid_patch_is_not_partially_applied() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let original = insert(&mut trip, &activity_input("Hike")).unwrap();

        let patch = ActivityPatch {
            title: Some("Renamed".into()),
            end_date: Some("2023-12-01".into()),
            ..Default::default()
        };
        assert!(apply_partial_update(&mut trip, original.id, &patch).is_err());
        assert_eq!(find(&trip, original.id).unwrap(), &original);
    }

    #[test]
    fn update_of_unknown_activity_is_not_found() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let err = apply_partial_update(&mut trip, Uuid::now_v7(), &ActivityPatch::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(entity, _) if entity == "Activity"));
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        let a = insert(&mut trip, &activity_input("A")).unwrap();
        let b = insert(&mut trip, &activity_input("B")).unwrap();
        let c = insert(&mut trip, &activity_input("C")).unwrap();

        remove(&mut trip, b.id).unwrap();

        let ids: Vec<_> = list(&trip).iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
        assert!(find(&trip, b.id).is_err());
    }

    #[test]
    fn removing_unknown_activity_keeps_length() {
        let mut trip = trip_owned_by(Uuid::now_v7());
        insert(&mut trip, &activity_input("Hike")).unwrap();

        assert!(matches!(
            remove(&mut trip, Uuid::now_v7()),
            Err(AppError::NotFound(_, _))
        ));
        assert_eq!(trip.activities.len(), 1);
    }
}
