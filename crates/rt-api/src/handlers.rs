//! # rt-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! `TripService`. Handlers only unwrap the request and shape the response;
//! every decision is made in rt-core.

use crate::auth::{AuthenticatedUser, MaybePrincipal};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use rt_core::models::{ActivityInput, ActivityPatch, TripInput, TripPatch};
use rt_core::service::TripService;
use rt_core::traits::PrincipalResolver;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub service: TripService,
    pub auth: Box<dyn PrincipalResolver>,
}

type HandlerResult = Result<HttpResponse, ApiError>;

/// `{"trip": {...}}` request envelope.
#[derive(Debug, Default, Deserialize)]
pub struct TripBody {
    #[serde(default)]
    pub trip: TripInput,
}

/// `{"activity": {...}}` request envelope.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityBody {
    #[serde(default)]
    pub activity: ActivityInput,
}

// ── Trips ────────────────────────────────────────────────────────────────────

/// GET /trips
pub async fn list_trips(data: web::Data<AppState>, who: MaybePrincipal) -> HandlerResult {
    let trips = data.service.list_trips(who.principal()).await?;
    Ok(HttpResponse::Ok().json(json!({ "trips": trips })))
}

/// GET /trips/{id}
pub async fn show_trip(
    data: web::Data<AppState>,
    who: MaybePrincipal,
    path: web::Path<Uuid>,
) -> HandlerResult {
    let trip = data
        .service
        .show_trip(who.principal(), path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "trip": trip })))
}

/// POST /trips
pub async fn create_trip(
    data: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<TripBody>,
) -> HandlerResult {
    let trip = data.service.create_trip(&user.0, &body.trip).await?;
    Ok(HttpResponse::Created().json(json!({ "trip": trip })))
}

/// PATCH /trips/{id}
pub async fn update_trip(
    data: web::Data<AppState>,
    who: MaybePrincipal,
    path: web::Path<Uuid>,
    body: web::Json<TripBody>,
) -> HandlerResult {
    let patch: &TripPatch = &body.trip;
    data.service
        .update_trip(who.principal(), path.into_inner(), patch)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /trips/{id}
pub async fn delete_trip(
    data: web::Data<AppState>,
    who: MaybePrincipal,
    path: web::Path<Uuid>,
) -> HandlerResult {
    data.service
        .delete_trip(who.principal(), path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

// ── Activities ───────────────────────────────────────────────────────────────

/// GET /trips/{id}/activities
pub async fn list_activities(data: web::Data<AppState>, path: web::Path<Uuid>) -> HandlerResult {
    let trip = data.service.list_activities(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "trip": trip })))
}

/// GET /trips/{id}/activities/{aid}
pub async fn show_activity(
    data: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> HandlerResult {
    let (trip_id, activity_id) = path.into_inner();
    let activity = data.service.show_activity(trip_id, activity_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "activity": activity })))
}

/// POST /trips/{id}/activities
pub async fn create_activity(
    data: web::Data<AppState>,
    who: MaybePrincipal,
    path: web::Path<Uuid>,
    body: web::Json<ActivityBody>,
) -> HandlerResult {
    let activity = data
        .service
        .create_activity(who.principal(), path.into_inner(), &body.activity)
        .await?;
    Ok(HttpResponse::Created().json(json!({ "activity": activity })))
}

/// PATCH /trips/{id}/activities/{aid}
pub async fn update_activity(
    data: web::Data<AppState>,
    who: MaybePrincipal,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<ActivityBody>,
) -> HandlerResult {
    let (trip_id, activity_id) = path.into_inner();
    let patch: &ActivityPatch = &body.activity;
    let trip = data
        .service
        .update_activity(who.principal(), trip_id, activity_id, patch)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "trip": trip })))
}

/// DELETE /trips/{id}/activities/{aid}
pub async fn delete_activity(
    data: web::Data<AppState>,
    who: MaybePrincipal,
    path: web::Path<(Uuid, Uuid)>,
) -> HandlerResult {
    let (trip_id, activity_id) = path.into_inner();
    let trip = data
        .service
        .delete_activity(who.principal(), trip_id, activity_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "trip": trip })))
}
