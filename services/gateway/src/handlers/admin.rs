use crate::auth::{self, AdminUser};
use crate::error::AppError;
use crate::models::{LoginRequest, LoginResponse, SettingsPayload, SuccessResponse};
use crate::state::AppState;
use axum::{extract::State, Json};
use types::errors::VoteError;
use types::settings::EventSettings;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.username != state.config.admin_username
        || payload.password != state.config.admin_password
    {
        tracing::warn!(username = %payload.username, "rejected admin login");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = auth::issue_token(&payload.username, &state.config.jwt_secret)?;
    Ok(Json(LoginResponse { token }))
}

/// Zero every tally, clear the vote log, and tell voter clients to forget
/// their local voted state.
pub async fn reset(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<SuccessResponse>, AppError> {
    tracing::info!(admin = %admin.username, "full reset requested");
    state.ledger.reset_all();
    Ok(Json(SuccessResponse::ok()))
}

pub async fn get_settings(State(state): State<AppState>) -> Json<EventSettings> {
    Json(state.settings.current())
}

pub async fn update_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<SettingsPayload>,
) -> Result<Json<EventSettings>, AppError> {
    if payload.event_title.trim().is_empty() {
        return Err(VoteError::InvalidRequest(
            "event title must not be empty".to_string(),
        )
        .into());
    }

    let settings = state.settings.update(EventSettings {
        event_title: payload.event_title.trim().to_string(),
    });
    state.hub.broadcast_settings_change(settings.clone());
    Ok(Json(settings))
}
