//! Recording gateway — a configurable `AdsGateway` that records every call.

use std::sync::Mutex;
use std::time::Duration;

use adcraft_core::ad::AdCampaign;
use adcraft_core::error::CollaboratorFailure;
use adcraft_core::gateway::{AccessToken, AdsGateway, SUBMISSION_SUCCESS, SubmissionReceipt};
use async_trait::async_trait;

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// `authenticate()`
    Authenticate,
    /// `validate_music_id(id)`
    ValidateMusicId(String),
    /// `upload_custom_music()`
    UploadCustomMusic,
    /// `submit_ad(payload)`, recorded by campaign name.
    SubmitAd(String),
}

/// A gateway whose per-operation results are fixed up front. Every call is
/// recorded, including calls that fail, so tests can assert both which
/// collaborators ran and in what order.
#[derive(Debug)]
pub struct RecordingGateway {
    auth: Result<String, CollaboratorFailure>,
    music_failure: Option<CollaboratorFailure>,
    upload: Result<String, CollaboratorFailure>,
    submit: Result<SubmissionReceipt, CollaboratorFailure>,
    delay: Option<Duration>,
    calls: Mutex<Vec<GatewayCall>>,
    submitted: Mutex<Vec<AdCampaign>>,
}

impl RecordingGateway {
    /// A gateway on which every call succeeds.
    #[must_use]
    pub fn succeeding() -> Self {
        Self {
            auth: Ok("test_access_token".to_owned()),
            music_failure: None,
            upload: Ok("music_1234".to_owned()),
            submit: Ok(SubmissionReceipt {
                status: SUBMISSION_SUCCESS.to_owned(),
                ad_id: "ad_10001".to_owned(),
            }),
            delay: None,
            calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Make `authenticate` fail.
    #[must_use]
    pub fn with_auth_failure(mut self, code: u16, message: &str) -> Self {
        self.auth = Err(CollaboratorFailure::api(code, message));
        self
    }

    /// Make `validate_music_id` reject every identifier.
    #[must_use]
    pub fn with_music_failure(mut self, code: u16, message: &str) -> Self {
        self.music_failure = Some(CollaboratorFailure::api(code, message));
        self
    }

    /// Set the identifier returned by `upload_custom_music`.
    #[must_use]
    pub fn with_uploaded_music_id(mut self, music_id: &str) -> Self {
        self.upload = Ok(music_id.to_owned());
        self
    }

    /// Make `upload_custom_music` fail.
    #[must_use]
    pub fn with_upload_failure(mut self, code: u16, message: &str) -> Self {
        self.upload = Err(CollaboratorFailure::api(code, message));
        self
    }

    /// Set the ad identifier returned by `submit_ad`.
    #[must_use]
    pub fn with_ad_id(mut self, ad_id: &str) -> Self {
        self.submit = Ok(SubmissionReceipt {
            status: SUBMISSION_SUCCESS.to_owned(),
            ad_id: ad_id.to_owned(),
        });
        self
    }

    /// Make `submit_ad` fail.
    #[must_use]
    pub fn with_submit_failure(mut self, code: u16, message: &str) -> Self {
        self.submit = Err(CollaboratorFailure::api(code, message));
        self
    }

    /// Sleep for `delay` before answering each call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns a copy of the recorded calls, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns every payload passed to `submit_ad`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn submitted(&self) -> Vec<AdCampaign> {
        self.submitted.lock().unwrap().clone()
    }

    async fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl AdsGateway for RecordingGateway {
    async fn authenticate(&self) -> Result<AccessToken, CollaboratorFailure> {
        self.record(GatewayCall::Authenticate).await;
        self.auth.clone().map(AccessToken::new)
    }

    async fn validate_music_id(
        &self,
        _token: &AccessToken,
        music_id: &str,
    ) -> Result<(), CollaboratorFailure> {
        self.record(GatewayCall::ValidateMusicId(music_id.to_owned()))
            .await;
        match &self.music_failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    async fn upload_custom_music(
        &self,
        _token: &AccessToken,
    ) -> Result<String, CollaboratorFailure> {
        self.record(GatewayCall::UploadCustomMusic).await;
        self.upload.clone()
    }

    async fn submit_ad(
        &self,
        _token: &AccessToken,
        payload: &AdCampaign,
    ) -> Result<SubmissionReceipt, CollaboratorFailure> {
        self.record(GatewayCall::SubmitAd(payload.campaign_name.clone()))
            .await;
        self.submitted.lock().unwrap().push(payload.clone());
        self.submit.clone()
    }
}
