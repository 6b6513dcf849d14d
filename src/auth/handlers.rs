use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{is_valid_email, AuthResponse, LoginRequest, PublicUser, SignupRequest},
        jwt::JwtKeys,
        password::Passwords,
        repo_types::NewUser,
    },
    error::{AppError, AppResult},
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(signup))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let Json(mut payload) = payload?;
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".into()));
    }

    // Best-effort: a concurrent signup can still race past this to the unique index.
    if state.db.find_user_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let password_hash = Passwords::default().hash(&payload.password).await?;
    let user = state
        .db
        .create_user(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
            contact: payload.contact,
            address: payload.address,
            role: payload.role.unwrap_or_default(),
        })
        .await?;

    let token = JwtKeys::from_ref(&state).issue_token(user.id, &user.email, user.role)?;

    info!(user_id = %user.id, email = %user.email, role = %user.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully",
            token,
            data: PublicUser::from(user),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(mut payload) = payload?;
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "login malformed email");
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    let Some(user) = state.db.find_user_by_email(&payload.email).await? else {
        warn!(email = %payload.email, "login unknown email");
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    };

    if !Passwords::default()
        .verify(&payload.password, &user.password_hash)
        .await?
    {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    let token = JwtKeys::from_ref(&state).issue_token(user.id, &user.email, user.role)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        data: PublicUser::from(user),
    }))
}
