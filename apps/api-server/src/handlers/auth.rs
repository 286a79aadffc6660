//! Account handlers: signup, login, and the status field.

use actix_web::{HttpResponse, web};

use feedr_shared::dto::{LoginRequest, LoginResponse, SignupRequest, SignupResponse, StatusPayload};

use crate::middleware::auth::AuthUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .credentials
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        message: "User created!".to_string(),
        user_id: user.id,
    }))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state.credentials.authenticate(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: session.token,
        user_id: session.user.id,
        expires_in: session.expires_in,
    }))
}

/// GET /status - the caller's own status.
pub async fn get_status(state: web::Data<AppState>, auth: AuthUser) -> AppResult<HttpResponse> {
    let status = state.accounts.status(auth.0.user_id).await?;

    Ok(HttpResponse::Ok().json(StatusPayload { status }))
}

/// PATCH /status - only ever the caller's own status.
pub async fn update_status(
    state: web::Data<AppState>,
    auth: AuthUser,
    body: web::Json<StatusPayload>,
) -> AppResult<HttpResponse> {
    let user = state
        .accounts
        .set_status(auth.0.user_id, &body.status)
        .await?;

    Ok(HttpResponse::Ok().json(StatusPayload {
        status: user.status,
    }))
}
