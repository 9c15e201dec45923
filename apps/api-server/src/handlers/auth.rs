//! Authentication handlers.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use quill_core::domain::User;
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::MessageBody;
use quill_shared::dto::{LoginRequest, RegisterRequest, TokenResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<(String, String), AppError> {
    match (username, password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Ok((username, password))
        }
        _ => Err(AppError::BadRequest(
            "Missing username or password".to_string(),
        )),
    }
}

/// POST /api/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (username, password) = credentials(req.username, req.password)?;

    let password_hash = password_service
        .hash(&password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    state.users.insert(User::new(username, password_hash)).await?;

    Ok(HttpResponse::Created().json(MessageBody::new("User registered successfully")))
}

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (username, password) = credentials(req.username, req.password)?;

    // An unknown username and a wrong password produce the same response
    let user = state
        .users
        .find(&username)
        .await
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password_service
        .verify(&password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let access_token = token_service
        .generate_token(&user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(TokenResponse { access_token }))
}
