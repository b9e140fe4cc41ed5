use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Local;
use savora_domain::{Hold, Reservation};
use savora_reserve::{ReservationFilter, ReservationPatch, ReservationView, Slot};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub restaurant_id: String,
    pub date: String,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
}

fn default_party_size() -> u32 {
    2
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub restaurant_id: String,
    pub date: String,
    pub available_slots: Vec<Slot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHoldRequest {
    pub user_id: String,
    pub restaurant_id: String,
    pub date: String,
    pub time: String,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
}

#[derive(Debug, Serialize)]
pub struct HoldResponse {
    pub success: bool,
    pub hold: Hold,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveHoldQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActiveHoldResponse {
    pub hold: Option<Hold>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub hold_id: String,
    pub user_id: Option<String>,
    pub payment_method: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub success: bool,
    pub reservation: Reservation,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub reservations: Vec<ReservationView>,
    pub count: usize,
    pub filter: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyRequest {
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub patch: ReservationPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub success: bool,
    pub message: &'static str,
    pub reservation: Reservation,
    pub refund: savora_domain::Refund,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reservations/availability", post(check_availability))
        .route("/api/reservations/hold", post(create_hold))
        .route("/api/reservations/hold/active", get(active_hold))
        .route("/api/reservations/confirm", post(confirm_reservation))
        .route("/api/reservations/user/{user_id}", get(list_reservations))
        .route(
            "/api/reservations/{id}",
            get(get_reservation).patch(modify_reservation),
        )
        .route("/api/reservations/{id}/cancel", delete(cancel_reservation))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/reservations/availability
async fn check_availability(
    State(state): State<AppState>,
    Json(req): Json<AvailabilityRequest>,
) -> Json<AvailabilityResponse> {
    let slots = state
        .availability
        .slots_for(&req.restaurant_id, &req.date, req.party_size)
        .await;

    Json(AvailabilityResponse {
        restaurant_id: req.restaurant_id,
        date: req.date,
        available_slots: slots,
    })
}

/// POST /api/reservations/hold
async fn create_hold(
    State(state): State<AppState>,
    Json(req): Json<CreateHoldRequest>,
) -> Result<(StatusCode, Json<HoldResponse>), AppError> {
    let hold = state
        .holds
        .create_hold(req.user_id, req.restaurant_id, req.date, req.time, req.party_size)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(HoldResponse {
            success: true,
            hold,
        }),
    ))
}

/// GET /api/reservations/hold/active?userId=
async fn active_hold(
    State(state): State<AppState>,
    Query(query): Query<ActiveHoldQuery>,
) -> Result<Json<ActiveHoldResponse>, AppError> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::ValidationError("userId required".to_string()))?;

    let hold = state.holds.active_hold(&user_id).await;
    Ok(Json(ActiveHoldResponse { hold }))
}

/// POST /api/reservations/confirm
async fn confirm_reservation(
    State(state): State<AppState>,
    Json(req): Json<ConfirmRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let reservation = state
        .reservations
        .confirm(
            &req.hold_id,
            req.user_id,
            req.payment_method,
            req.special_requests,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse {
            success: true,
            reservation,
        }),
    ))
}

/// GET /api/reservations/user/{userId}?filter=upcoming|past|all
async fn list_reservations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    let filter = ReservationFilter::parse(query.filter.as_deref());
    let reservations = state.reservations.list(&user_id, filter).await;

    Json(ListResponse {
        count: reservations.len(),
        reservations,
        filter: filter.as_str(),
    })
}

/// GET /api/reservations/{id}?userId=
async fn get_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Reservation>, AppError> {
    let reservation = state
        .reservations
        .get(&reservation_id, query.user_id.as_deref())
        .await?;
    Ok(Json(reservation))
}

/// PATCH /api/reservations/{id}
async fn modify_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    Json(req): Json<ModifyRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let user_id = req
        .user_id
        .ok_or_else(|| AppError::ValidationError("userId required for authorization".to_string()))?;

    let reservation = state
        .reservations
        .modify(&reservation_id, &user_id, &req.patch)
        .await?;

    Ok(Json(ReservationResponse {
        success: true,
        reservation,
    }))
}

/// DELETE /api/reservations/{id}/cancel
async fn cancel_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<CancelResponse>, AppError> {
    let user_id = req
        .user_id
        .ok_or_else(|| AppError::ValidationError("userId required".to_string()))?;

    // Refunds are tiered on restaurant-local wall-clock hours.
    let now = Local::now().naive_local();
    let (reservation, refund) = state
        .reservations
        .cancel(&reservation_id, &user_id, now)
        .await?;

    Ok(Json(CancelResponse {
        success: true,
        message: "Reservation cancelled",
        reservation,
        refund,
    }))
}
