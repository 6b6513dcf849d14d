use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CreateRepairRequest, ReplyRequest},
    repo_types::{RequestWithUser, SupportRequest},
};
use crate::{
    auth::{
        middleware::{admin_only, authenticate, customer_only},
        Identity,
    },
    error::{AppError, AppResult},
    state::AppState,
};

pub fn repair_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/repair", get(list_all_requests))
        .route("/repair/:id/reply", put(reply_to_request))
        .route_layer(middleware::from_fn(admin_only));

    let customer = Router::new()
        .route("/repair", post(create_request))
        .route("/my-requests", get(list_own_requests))
        .route_layer(middleware::from_fn(customer_only));

    admin
        .merge(customer)
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

#[instrument(skip(state, identity, payload), fields(user_id = %identity.id))]
pub async fn create_request(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<CreateRepairRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SupportRequest>)> {
    let Json(payload) = payload?;
    let Some(new) = payload.into_new() else {
        warn!("support request with missing fields");
        return Err(AppError::BadRequest("All fields are required".into()));
    };

    let request = state.db.create_request(new).await?;
    info!(request_id = %request.id, "support request created");
    Ok((StatusCode::CREATED, Json(request)))
}

#[instrument(skip(state))]
pub async fn list_all_requests(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RequestWithUser>>> {
    Ok(Json(state.db.list_requests_with_user().await?))
}

#[instrument(skip(state, identity), fields(user_id = %identity.id))]
pub async fn list_own_requests(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Vec<SupportRequest>>> {
    Ok(Json(state.db.list_requests_by_user(identity.id).await?))
}

/// Replying always approves; there is no separate approve action.
#[instrument(skip_all)]
pub async fn reply_to_request(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ReplyRequest>, JsonRejection>,
) -> AppResult<Json<SupportRequest>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let message = payload
        .admin_message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("adminMessage is required".into()))?;

    let request = state
        .db
        .reply_to_request(id, &message)
        .await?
        .ok_or_else(|| AppError::NotFound("Support request not found".into()))?;

    info!(request_id = %request.id, "support request answered and approved");
    Ok(Json(request))
}
