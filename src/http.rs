use crate::backend::SchedulingBackend;
use crate::errors::SchedulingError;
use crate::types::{Booking, CancelOutcome, DeletedSlot, SlotId, UserId};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreateUserRequest {
    name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSlotRequest {
    date: String,
    start_time: String,
    end_time: String,
    timezone_offset: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SlotView {
    Available,
    Booked,
}

#[derive(Debug, Clone, Deserialize)]
struct ListSlotsParams {
    #[serde(rename = "type")]
    view: SlotView,
}

// There is no authentication; callers say who they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequesterBody {
    user_id: UserId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverlapParams {
    user_id_1: UserId,
    user_id_2: UserId,
}

#[derive(Debug, Clone, Serialize)]
struct BookingConfirmation {
    #[serde(flatten)]
    booking: Booking,
    booked: bool,
}

#[derive(Debug, Clone, Serialize)]
struct DeletionConfirmation {
    message: &'static str,
    result: DeletedSlot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CancellationMessage {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted_booking: Option<Booking>,
}

pub fn create_app<B: SchedulingBackend>(state: AppState<B>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/user", post(create_user))
        .route("/user/:user_id/slot", post(create_slot).get(list_slots))
        .route("/book/slot/:slot_id", post(book_slot))
        .route("/slot/:slot_id", delete(delete_slot))
        .route("/booking/:slot_id", delete(cancel_booking))
        .route("/overlap", get(find_overlaps));

    Router::new().nest("/v1", api).with_state(state).layer(cors)
}

pub async fn start_server<B: SchedulingBackend>(state: AppState<B>, port: &str) {
    let app = create_app(state);
    let address = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap();
    info!("listening on {address}");
    axum::serve(listener, app).await.unwrap();
}

// Storage detail goes to the log, never into a response body.
fn error_response(error: SchedulingError) -> Response {
    let status = match &error {
        SchedulingError::UserNotFound
        | SchedulingError::SlotNotFound
        | SchedulingError::BookingNotFound => StatusCode::NOT_FOUND,
        SchedulingError::Storage(detail) => {
            error!("request failed on storage: {detail}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response();
        }
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

async fn create_user<B: SchedulingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<CreateUserRequest>,
) -> Response {
    match state.scheduler.create_user(&request.name) {
        Ok(user) => Json(user).into_response(),
        Err(error) => error_response(error),
    }
}

async fn create_slot<B: SchedulingBackend>(
    State(state): State<AppState<B>>,
    Path(user_id): Path<UserId>,
    Json(request): Json<CreateSlotRequest>,
) -> Response {
    match state.scheduler.create_slot(
        user_id,
        &request.date,
        &request.start_time,
        &request.end_time,
        request.timezone_offset,
    ) {
        Ok(slot) => Json(slot).into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_slots<B: SchedulingBackend>(
    State(state): State<AppState<B>>,
    Path(user_id): Path<UserId>,
    Query(params): Query<ListSlotsParams>,
) -> Response {
    let result = match params.view {
        SlotView::Available => state
            .scheduler
            .available_slots(user_id)
            .map(|slots| Json(slots).into_response()),
        SlotView::Booked => state
            .scheduler
            .booked_slots(user_id)
            .map(|slots| Json(slots).into_response()),
    };
    result.unwrap_or_else(error_response)
}

async fn book_slot<B: SchedulingBackend>(
    State(state): State<AppState<B>>,
    Path(slot_id): Path<SlotId>,
    Json(request): Json<RequesterBody>,
) -> Response {
    match state.scheduler.book_slot(slot_id, request.user_id) {
        Ok(booking) => Json(BookingConfirmation {
            booking,
            booked: true,
        })
        .into_response(),
        Err(error) => error_response(error),
    }
}

async fn delete_slot<B: SchedulingBackend>(
    State(state): State<AppState<B>>,
    Path(slot_id): Path<SlotId>,
    Json(request): Json<RequesterBody>,
) -> Response {
    match state.scheduler.delete_slot(slot_id, request.user_id) {
        Ok(result) => Json(DeletionConfirmation {
            message: "Slot and its booking (if any) have been deleted",
            result,
        })
        .into_response(),
        Err(error) => error_response(error),
    }
}

async fn cancel_booking<B: SchedulingBackend>(
    State(state): State<AppState<B>>,
    Path(slot_id): Path<SlotId>,
    Json(request): Json<RequesterBody>,
) -> Response {
    match state.scheduler.cancel_booking(slot_id, request.user_id) {
        Ok(CancelOutcome::Canceled(booking)) => Json(CancellationMessage {
            message: "Meeting canceled",
            deleted_booking: Some(booking),
        })
        .into_response(),
        Ok(CancelOutcome::Unauthorized) => Json(CancellationMessage {
            message: "Unauthorized user",
            deleted_booking: None,
        })
        .into_response(),
        Err(error) => error_response(error),
    }
}

async fn find_overlaps<B: SchedulingBackend>(
    State(state): State<AppState<B>>,
    Query(params): Query<OverlapParams>,
) -> Response {
    match state
        .scheduler
        .find_overlaps(params.user_id_1, params.user_id_2)
    {
        Ok(pairs) => Json(pairs).into_response(),
        Err(error) => error_response(error),
    }
}
