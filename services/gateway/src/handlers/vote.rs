use crate::error::AppError;
use crate::models::{RevokeRequest, StatusQuery, SuccessResponse, VoteRequest, VoteResponse};
use crate::state::AppState;
use axum::{
    extract::{ConnectInfo, Query, State},
    http::HeaderMap,
    Json,
};
use std::net::SocketAddr;
use types::errors::VoteError;
use types::ids::ProgramId;
use types::vote::VoteStatus;
use vote_ledger::VoterIdentity;

/// Fold request body material and transport attributes into the raw
/// identity the resolver consumes.
///
/// Many venues sit behind a reverse proxy, so `x-forwarded-for` (first
/// hop) wins over the socket peer address.
fn voter_identity(
    headers: &HeaderMap,
    peer: SocketAddr,
    user_token: Option<String>,
    fingerprint: Option<String>,
) -> VoterIdentity {
    let origin_addr = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| peer.ip().to_string());

    let client_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    VoterIdentity {
        user_token,
        fingerprint: fingerprint.unwrap_or_default(),
        origin_addr,
        client_agent,
    }
}

pub async fn cast_vote(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    let identity = voter_identity(&headers, peer, payload.user_id, payload.fingerprint);
    let key = state.resolver.resolve(&identity)?;

    let programs = state.ledger.cast_vote(
        ProgramId::new(payload.program_id),
        &key,
        identity.user_token(),
    )?;

    Ok(Json(VoteResponse {
        success: true,
        programs,
    }))
}

pub async fn revoke_vote(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<RevokeRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let identity = voter_identity(&headers, peer, payload.user_id, payload.fingerprint);

    // A revoke may arrive with only one of the two signals (e.g. the
    // token survived a fingerprint change); either is enough to find the
    // caller's own record.
    let key = state.resolver.resolve(&identity).ok();
    if key.is_none() && identity.user_token().is_none() {
        return Err(VoteError::InvalidRequest(
            "fingerprint or user token is required".to_string(),
        )
        .into());
    }

    state
        .ledger
        .revoke_vote(key.as_ref(), identity.user_token())?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn vote_status(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> Result<Json<VoteStatus>, AppError> {
    let identity = voter_identity(&headers, peer, query.user_id, query.fingerprint);
    let key = state.resolver.resolve(&identity)?;

    Ok(Json(state.ledger.vote_status(&key, identity.user_token())))
}
