//! In-process stand-in for the advertising platform API.

use std::sync::Mutex;

use adcraft_core::ad::AdCampaign;
use adcraft_core::error::CollaboratorFailure;
use adcraft_core::gateway::{AccessToken, AdsGateway, SUBMISSION_SUCCESS, SubmissionReceipt};
use adcraft_core::rng::DeterministicRng;
use async_trait::async_trait;
use tracing::{debug, info};

/// Token issued by a successful simulated authentication.
pub const SIMULATED_ACCESS_TOKEN: &str = "mock_access_token_123";

/// Music identifiers with this prefix are never approved.
pub const REJECTED_MUSIC_PREFIX: &str = "invalid";

/// Simulated platform. Failure rolls pick uniformly between success and each
/// failure mode of the operation.
pub struct SimulatedAdsGateway {
    rng: Mutex<Box<dyn DeterministicRng>>,
    inject_failures: bool,
}

impl SimulatedAdsGateway {
    /// Creates a gateway that injects random failures using `rng`.
    #[must_use]
    pub fn new(rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            rng: Mutex::new(rng),
            inject_failures: true,
        }
    }

    /// Creates a gateway whose authentication and submission always succeed.
    /// `rng` is still used to mint identifiers.
    #[must_use]
    pub fn reliable(rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            rng: Mutex::new(rng),
            inject_failures: false,
        }
    }

    /// Draws one value in `[min, max]`.
    ///
    /// The lock is held only for the draw and never across an await.
    fn draw(&self, min: u32, max: u32) -> Result<u32, CollaboratorFailure> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| CollaboratorFailure::api(500, format!("RNG mutex poisoned: {e}")))?;
        Ok(rng.next_u32_range(min, max))
    }

    /// Rolls one of `modes + 1` outcomes; 0 is success. Always 0 when failure
    /// injection is off.
    fn roll_failure(&self, modes: u32) -> Result<u32, CollaboratorFailure> {
        if self.inject_failures {
            self.draw(0, modes)
        } else {
            Ok(0)
        }
    }
}

#[async_trait]
impl AdsGateway for SimulatedAdsGateway {
    async fn authenticate(&self) -> Result<AccessToken, CollaboratorFailure> {
        match self.roll_failure(2)? {
            1 => Err(CollaboratorFailure::api(401, "Access token expired")),
            2 => Err(CollaboratorFailure::api(403, "Missing ads permission scope")),
            _ => {
                info!("simulated token issued");
                Ok(AccessToken::new(SIMULATED_ACCESS_TOKEN))
            }
        }
    }

    async fn validate_music_id(
        &self,
        _token: &AccessToken,
        music_id: &str,
    ) -> Result<(), CollaboratorFailure> {
        if music_id.starts_with(REJECTED_MUSIC_PREFIX) {
            debug!(music_id, "simulated music rejection");
            return Err(CollaboratorFailure::api(
                400,
                "Music ID is not approved for ads",
            ));
        }
        Ok(())
    }

    async fn upload_custom_music(&self, _token: &AccessToken) -> Result<String, CollaboratorFailure> {
        let suffix = self.draw(1000, 9999)?;
        Ok(format!("music_{suffix}"))
    }

    async fn submit_ad(
        &self,
        _token: &AccessToken,
        payload: &AdCampaign,
    ) -> Result<SubmissionReceipt, CollaboratorFailure> {
        debug!(payload = %payload.to_payload(), "simulated submission");
        match self.roll_failure(2)? {
            1 => Err(CollaboratorFailure::api(403, "Geo restriction")),
            2 => Err(CollaboratorFailure::api(401, "Invalid token")),
            _ => {
                let suffix = self.draw(10000, 99999)?;
                Ok(SubmissionReceipt {
                    status: SUBMISSION_SUCCESS.to_owned(),
                    ad_id: format!("ad_{suffix}"),
                })
            }
        }
    }
}
