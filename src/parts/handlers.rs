use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::StatusCode,
    middleware,
    routing::{get, put},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument, warn};

use super::{
    dto::{CreatePartForm, UpdateStockRequest},
    repo_types::{NewSparePart, SparePart},
};
use crate::{
    auth::middleware::{admin_only, authenticate, customer_only},
    error::{AppError, AppResult},
    state::AppState,
};

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024; // 20MB

pub fn part_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/parts", get(list_parts).post(create_part))
        .route("/parts/:id", put(update_stock))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .route_layer(middleware::from_fn(admin_only));

    let customer = Router::new()
        .route("/customer/parts", get(list_parts))
        .route_layer(middleware::from_fn(customer_only));

    admin
        .merge(customer)
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

struct UploadedImage {
    file_name: String,
    body: Bytes,
}

/// POST /parts (multipart): `name`, `stock`, optional `image` file.
#[instrument(skip_all)]
pub async fn create_part(
    State(state): State<AppState>,
    mp: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<SparePart>)> {
    let mut mp = mp?;
    let mut form = CreatePartForm::default();
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = mp.next_field().await? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("name") => form.name = Some(field.text().await?),
            Some("stock") => form.stock = Some(field.text().await?),
            Some("image") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let body = field.bytes().await?;
                if !body.is_empty() {
                    image = Some(UploadedImage { file_name, body });
                }
            }
            other => warn!(field = ?other, "ignoring unknown multipart field"),
        }
    }

    let (name, stock) = form.validate().map_err(|e| AppError::BadRequest(e.into()))?;

    let image = match image {
        Some(img) => Some(state.storage.put_object(&img.file_name, img.body).await?),
        None => None,
    };

    let part = state
        .db
        .create_part(NewSparePart { name, stock, image })
        .await?;
    info!(part_id = part.id, name = %part.name, stock = part.stock, "spare part created");
    Ok((StatusCode::CREATED, Json(part)))
}

#[instrument(skip(state))]
pub async fn list_parts(State(state): State<AppState>) -> AppResult<Json<Vec<SparePart>>> {
    Ok(Json(state.db.list_parts().await?))
}

/// Overwrites stock; no bounds check.
#[instrument(skip_all)]
pub async fn update_stock(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateStockRequest>, JsonRejection>,
) -> AppResult<Json<SparePart>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let stock = payload
        .stock
        .ok_or_else(|| AppError::BadRequest("stock is required".into()))?;

    let part = state
        .db
        .update_stock(id, stock)
        .await?
        .ok_or_else(|| AppError::NotFound("Spare part not found".into()))?;

    info!(part_id = part.id, stock = part.stock, "stock updated");
    Ok(Json(part))
}
