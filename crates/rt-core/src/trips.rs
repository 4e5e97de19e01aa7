//! Trip construction and patch merging.

use crate::error::Result;
use crate::models::{Trip, TripInput, TripPatch};
use crate::validate::{check_date_order, non_blank, optional_date, required, required_date};
use chrono::Utc;
use uuid::Uuid;

/// Builds a new trip owned by `guide`. Timestamps are provisional; the
/// store overwrites them on insert.
pub fn build(guide: Uuid, input: &TripInput) -> Result<Trip> {
    let start_date = required_date("startDate", &input.start_date)?;
    let end_date = required_date("endDate", &input.end_date)?;
    check_date_order(start_date, end_date)?;

    let now = Utc::now();
    Ok(Trip {
        id: Uuid::now_v7(),
        title: required("title", &input.title)?.to_string(),
        description: required("description", &input.description)?.to_string(),
        image: non_blank(&input.image).map(str::to_string),
        start_date,
        end_date,
        recommendation: non_blank(&input.recommendation).map(str::to_string),
        city: non_blank(&input.city).map(str::to_string),
        guide,
        activities: Vec::new(),
        included_in_trip: tags(input.included_in_trip.as_deref()),
        what_to_bring: tags(input.what_to_bring.as_deref()),
        created_at: now,
        updated_at: now,
    })
}

/// Returns `trip` with every present, non-blank patch field applied.
/// `guide`, `id`, activities and timestamps are never touched.
pub fn merge(trip: &Trip, patch: &TripPatch) -> Result<Trip> {
    let mut merged = trip.clone();
    if let Some(title) = non_blank(&patch.title) {
        merged.title = title.to_string();
    }
    if let Some(description) = non_blank(&patch.description) {
        merged.description = description.to_string();
    }
    if let Some(image) = non_blank(&patch.image) {
        merged.image = Some(image.to_string());
    }
    if let Some(start) = optional_date("startDate", &patch.start_date)? {
        merged.start_date = start;
    }
    if let Some(end) = optional_date("endDate", &patch.end_date)? {
        merged.end_date = end;
    }
    if let Some(recommendation) = non_blank(&patch.recommendation) {
        merged.recommendation = Some(recommendation.to_string());
    }
    if let Some(city) = non_blank(&patch.city) {
        merged.city = Some(city.to_string());
    }
    // A list with no non-blank entry is treated like a blank string.
    let included = tags(patch.included_in_trip.as_deref());
    if !included.is_empty() {
        merged.included_in_trip = included;
    }
    let bring = tags(patch.what_to_bring.as_deref());
    if !bring.is_empty() {
        merged.what_to_bring = bring;
    }
    check_date_order(merged.start_date, merged.end_date)?;
    Ok(merged)
}

fn tags(values: Option<&[String]>) -> Vec<String> {
    values
        .unwrap_or_default()
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::fixtures::{trip_input, trip_owned_by};

    #[test]
    fn build_assigns_owner_and_empty_activity_list() {
        let guide = Uuid::now_v7();
        let trip = build(guide, &trip_input("Andes Trek")).unwrap();

        assert_eq!(trip.guide, guide);
        assert_eq!(trip.title, "Andes Trek");
        assert!(trip.activities.is_empty());
    }

    #[test]
    fn build_requires_description() {
        let input = TripInput {
            description: None,
            ..trip_input("Andes Trek")
        };
        assert!(matches!(
            build(Uuid::now_v7(), &input),
            Err(AppError::ValidationError(msg)) if msg.contains("description")
        ));
    }

    #[test]
    fn tags_drop_blank_entries() {
        let input = TripInput {
            included_in_trip: Some(vec!["Guide".into(), " ".into(), "Food".into()]),
            ..trip_input("Andes Trek")
        };
        let trip = build(Uuid::now_v7(), &input).unwrap();
        assert_eq!(trip.included_in_trip, vec!["Guide", "Food"]);
        assert!(trip.what_to_bring.is_empty());
    }

    #[test]
    fn merge_skips_blank_fields() {
        let trip = trip_owned_by(Uuid::now_v7());
        let patch = TripPatch {
            title: Some(String::new()),
            city: Some("Cusco".into()),
            ..Default::default()
        };
        let merged = merge(&trip, &patch).unwrap();

        assert_eq!(merged.title, trip.title);
        assert_eq!(merged.city.as_deref(), Some("Cusco"));
        assert_eq!(merged.guide, trip.guide);
    }

    #[test]
    fn merge_keeps_tags_when_patch_lists_are_empty() {
        let input = TripInput {
            included_in_trip: Some(vec!["Guide".into()]),
            what_to_bring: Some(vec!["Boots".into()]),
            ..trip_input("Andes Trek")
        };
        let trip = build(Uuid::now_v7(), &input).unwrap();

        let cleared = TripPatch {
            included_in_trip: Some(vec![]),
            what_to_bring: Some(vec![" ".into()]),
            ..Default::default()
        };
        let merged = merge(&trip, &cleared).unwrap();
        assert_eq!(merged.included_in_trip, vec!["Guide"]);
        assert_eq!(merged.what_to_bring, vec!["Boots"]);

        let replaced = TripPatch {
            what_to_bring: Some(vec!["Poncho".into()]),
            ..Default::default()
        };
        assert_eq!(merge(&trip, &replaced).unwrap().what_to_bring, vec!["Poncho"]);
    }

    #[test]
    fn merge_rejects_reversed_dates_without_touching_source() {
        let trip = trip_owned_by(Uuid::now_v7());
        let patch = TripPatch {
            start_date: Some("2030-01-01".into()),
            ..Default::default()
        };
        assert!(merge(&trip, &patch).is_err());
    }
}
