use serde::{Deserialize, Serialize};
use types::program::Program;

#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub program_id: u64,
    /// Opaque token kept in the client's local storage
    pub user_id: Option<String>,
    /// Optional in the DTO so its absence surfaces as InvalidRequest (400)
    /// instead of a deserialization failure
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub success: bool,
    pub programs: Vec<Program>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevokeRequest {
    pub user_id: Option<String>,
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    pub user_id: Option<String>,
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramPayload {
    pub name: String,
    pub category: String,
    /// Admin override for the displayed count; negative values are rejected
    pub votes: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsPayload {
    pub event_title: String,
}
