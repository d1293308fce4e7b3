//! Advertising platform gateway abstraction.
//!
//! The conversation never talks to the platform directly. Every external
//! effect goes through [`AdsGateway`], so tests can force each failure class
//! deterministically and production code can swap transports freely.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ad::AdCampaign;
use crate::error::CollaboratorFailure;

/// Operation name for [`AdsGateway::authenticate`].
pub const AUTHENTICATE: &str = "authenticate";
/// Operation name for [`AdsGateway::validate_music_id`].
pub const VALIDATE_MUSIC_ID: &str = "validate_music_id";
/// Operation name for [`AdsGateway::upload_custom_music`].
pub const UPLOAD_CUSTOM_MUSIC: &str = "upload_custom_music";
/// Operation name for [`AdsGateway::submit_ad`].
pub const SUBMIT_AD: &str = "submit_ad";

/// Status reported for a successful submission.
pub const SUBMISSION_SUCCESS: &str = "SUCCESS";

/// Bearer token returned by authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens end up in tracing fields; never print the secret itself.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Result of a successful ad submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Platform status string, e.g. [`SUBMISSION_SUCCESS`].
    pub status: String,
    /// Identifier of the created ad.
    pub ad_id: String,
}

/// External collaborator contract. Each call is one request/response pair.
#[async_trait]
pub trait AdsGateway: Send + Sync {
    /// Obtains an access token.
    async fn authenticate(&self) -> Result<AccessToken, CollaboratorFailure>;

    /// Checks that `music_id` is approved for use in ads.
    async fn validate_music_id(
        &self,
        token: &AccessToken,
        music_id: &str,
    ) -> Result<(), CollaboratorFailure>;

    /// Uploads the user's custom track and returns its generated identifier.
    async fn upload_custom_music(&self, token: &AccessToken) -> Result<String, CollaboratorFailure>;

    /// Submits the final campaign payload.
    async fn submit_ad(
        &self,
        token: &AccessToken,
        payload: &AdCampaign,
    ) -> Result<SubmissionReceipt, CollaboratorFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert_eq!(token.as_str(), "secret-value");
    }
}
