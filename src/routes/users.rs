use std::sync::LazyLock;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{ProfilePatch, User, UserProfile, UserType};
use crate::state::SharedState;
use crate::store::StoreError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

pub async fn register(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let email = normalize_email(&req.email);
    if !EMAIL_RE.is_match(&email) {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }

    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash,
        user_type: req.user_type,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        location: req.location,
        is_verified: false,
        rating: 0.0,
        created_at: now,
        updated_at: now,
    };

    state.users.insert(&user).await.map_err(|e| match e {
        StoreError::Conflict(_) => AppError::Conflict("Email already registered".to_string()),
        other => AppError::Store(other),
    })?;

    tracing::info!(user_id = %user.id, user_type = user.user_type.as_str(), "User registered");

    Ok((StatusCode::CREATED, Json(UserProfile::from(user))))
}

/// Every rejection answers with the same "Invalid credentials" error so
/// callers cannot tell unknown emails from wrong passwords.
pub async fn login(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = normalize_email(&req.email);

    if state.login_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = state.users.find_by_email(&email).await.unwrap_or_else(|e| {
        tracing::warn!("Credential lookup failed: {e}");
        None
    });

    let verified = match &user {
        Some(user) => password::verify(&req.password, &user.password_hash).unwrap_or_else(|e| {
            tracing::warn!(user_id = %user.id, "Stored hash unusable: {e}");
            false
        }),
        None => {
            password::verify_dummy(&req.password);
            false
        }
    };

    let Some(user) = user.filter(|_| verified) else {
        state.login_limiter.record_failure(&email);
        tracing::info!("Login rejected");
        return Err(AppError::invalid_credentials());
    };

    state.login_limiter.clear(&email);

    let claims = Claims::new(user.id, user.user_type, state.config.jwt_ttl());
    let token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user: UserProfile::from(user),
        token,
    }))
}

pub async fn get_profile(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| user_not_found())?;

    let profile = state
        .users
        .find_profile(id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ProfilePatch>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| user_not_found())?;

    let updated = state.users.update_profile(id, &patch, Utc::now()).await?;
    if !updated {
        return Err(user_not_found());
    }

    tracing::info!(user_id = %id, "Profile updated");

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}
