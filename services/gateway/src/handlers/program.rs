use crate::auth::AdminUser;
use crate::error::AppError;
use crate::models::{ProgramPayload, SuccessResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use types::errors::VoteError;
use types::ids::ProgramId;
use types::program::Program;

pub async fn list_programs(State(state): State<AppState>) -> Json<Vec<Program>> {
    Json(state.ledger.programs())
}

pub async fn create_program(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<ProgramPayload>,
) -> Result<(StatusCode, Json<Program>), AppError> {
    let program = state.ledger.create_program(&payload.name, &payload.category)?;
    Ok((StatusCode::CREATED, Json(program)))
}

pub async fn update_program(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<u64>,
    Json(payload): Json<ProgramPayload>,
) -> Result<Json<Program>, AppError> {
    let votes = match payload.votes {
        Some(votes) if votes < 0 => {
            return Err(VoteError::InvalidRequest(
                "votes must be non-negative".to_string(),
            )
            .into());
        }
        Some(votes) => Some(votes as u64),
        None => None,
    };

    let program = state.ledger.update_program(
        ProgramId::new(id),
        &payload.name,
        &payload.category,
        votes,
    )?;
    Ok(Json(program))
}

pub async fn delete_program(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<u64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.ledger.delete_program(ProgramId::new(id))?;
    Ok(Json(SuccessResponse::ok()))
}
