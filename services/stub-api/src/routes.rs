//! Stub API routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use common::models::{CommentDraft, HootDraft, SignInForm, SignUpForm, TokenResponse, UserIdentity};
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::auth_middleware,
    state::AppState,
};

/// Create the router for the stub API
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/hoots", get(list_hoots).post(create_hoot))
        .route(
            "/hoots/:id",
            get(get_hoot).put(update_hoot).delete(delete_hoot),
        )
        .route("/hoots/:id/comments", post(create_comment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "stub-api"
    }))
}

fn issue_token(state: &AppState, user: &UserIdentity) -> ApiResult<Json<TokenResponse>> {
    let token = state.jwt_service.generate_token(user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;
    Ok(Json(TokenResponse { token }))
}

/// Register a new user
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpForm>,
) -> ApiResult<impl IntoResponse> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required.".to_string(),
        ));
    }
    if payload.password != payload.password_conf {
        return Err(ApiError::BadRequest("Passwords do not match.".to_string()));
    }

    let user = state
        .user_repository
        .create(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, issue_token(&state, &user)?))
}

/// Sign in an existing user
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInForm>,
) -> ApiResult<impl IntoResponse> {
    info!("Sign-in attempt for user: {}", payload.username);

    let user = state
        .user_repository
        .verify(&payload.username, &payload.password)
        .await
        .ok_or_else(|| ApiError::BadRequest("Invalid credentials.".to_string()))?;

    issue_token(&state, &user)
}

/// List all hoots, newest first
pub async fn list_hoots(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.hoot_repository.list().await)
}

/// Get a hoot by ID
pub async fn get_hoot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.hoot_repository.find_by_id(&id).await?))
}

/// Create a hoot as the current user
pub async fn create_hoot(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<HootDraft>,
) -> impl IntoResponse {
    let hoot = state.hoot_repository.create(&user, payload).await;
    (StatusCode::CREATED, Json(hoot))
}

/// Update a hoot
pub async fn update_hoot(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<String>,
    Json(payload): Json<HootDraft>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(
        state.hoot_repository.update(&user, &id, payload).await?,
    ))
}

/// Delete a hoot, echoing the deleted document
pub async fn delete_hoot(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.hoot_repository.delete(&user, &id).await?))
}

/// Add a comment to a hoot
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<String>,
    Json(payload): Json<CommentDraft>,
) -> ApiResult<impl IntoResponse> {
    let comment = state
        .hoot_repository
        .add_comment(&user, &id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
