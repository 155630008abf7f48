//! Identity resolution
//!
//! Derives one deduplication key from client-supplied material plus
//! request-visible transport attributes. The composite exists because any
//! single signal is spoofable or shared; it raises the bar against casual
//! repeat voting without pretending to be real identity. The strategy sits
//! behind a trait so it can be strengthened later without touching the
//! ledger's atomicity logic.

use types::errors::VoteError;
use types::vote::IdentityKey;

/// Raw identity material extracted from one request
#[derive(Debug, Clone)]
pub struct VoterIdentity {
    /// Opaque token minted by the client and kept in its local storage
    pub user_token: Option<String>,
    /// Device fingerprint computed by the client
    pub fingerprint: String,
    /// Origin address as seen by the server (forwarded-for aware)
    pub origin_addr: String,
    /// Client-agent string from the request
    pub client_agent: String,
}

impl VoterIdentity {
    /// The user token with empty strings normalized away.
    pub fn user_token(&self) -> Option<&str> {
        self.user_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// Strategy for folding request material into a deduplication key
///
/// Implementations must be pure: same inputs, same key, no side effects.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, identity: &VoterIdentity) -> Result<IdentityKey, VoteError>;
}

/// Default strategy: fingerprint + origin address + client agent,
/// concatenated in fixed order
pub struct CompositeResolver;

impl IdentityResolver for CompositeResolver {
    fn resolve(&self, identity: &VoterIdentity) -> Result<IdentityKey, VoteError> {
        if identity.fingerprint.trim().is_empty() {
            return Err(VoteError::InvalidRequest(
                "device fingerprint is required".to_string(),
            ));
        }

        Ok(IdentityKey::new(format!(
            "{}_{}_{}",
            identity.fingerprint, identity.origin_addr, identity.client_agent
        )))
    }
}
