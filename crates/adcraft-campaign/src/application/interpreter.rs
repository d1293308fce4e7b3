//! Human-readable explanations for classified collaborator failures.

use adcraft_core::error::CollaboratorFailure;

/// Maps a collaborator failure to the message shown to the user.
///
/// Presentation only; the orchestrator's control flow never depends on it.
#[must_use]
pub fn interpret_failure(failure: &CollaboratorFailure) -> String {
    match failure {
        CollaboratorFailure::Api { code: 401, .. } => {
            "Authentication failed. Your access token is invalid or expired. \
             Please re-authenticate."
                .to_owned()
        }
        CollaboratorFailure::Api { code: 403, .. } => {
            "This action is not allowed in your region (geo-restriction).".to_owned()
        }
        CollaboratorFailure::Api { code: 400, message } => format!("Bad request: {message}"),
        CollaboratorFailure::Api { .. } => {
            "An unknown error occurred while communicating with the ads platform API.".to_owned()
        }
        CollaboratorFailure::Timeout { timeout_ms, .. } => format!(
            "The ads platform did not respond within {timeout_ms} ms. Please try again later."
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_401_asks_to_reauthenticate() {
        let message = interpret_failure(&CollaboratorFailure::api(401, "Invalid token"));
        assert_eq!(
            message,
            "Authentication failed. Your access token is invalid or expired. Please re-authenticate."
        );
    }

    #[test]
    fn test_403_reports_geo_restriction() {
        let message = interpret_failure(&CollaboratorFailure::api(403, "Geo restriction"));
        assert_eq!(
            message,
            "This action is not allowed in your region (geo-restriction)."
        );
    }

    #[test]
    fn test_400_includes_original_message() {
        let message = interpret_failure(&CollaboratorFailure::api(
            400,
            "Music ID is not approved for ads",
        ));
        assert_eq!(message, "Bad request: Music ID is not approved for ads");
    }

    #[test]
    fn test_other_codes_are_generic() {
        for code in [404, 429, 500, 503] {
            let message = interpret_failure(&CollaboratorFailure::api(code, "boom"));
            assert_eq!(
                message,
                "An unknown error occurred while communicating with the ads platform API."
            );
            assert!(!message.contains("boom"));
        }
    }

    #[test]
    fn test_timeout_names_the_limit() {
        let failure = CollaboratorFailure::timeout("submit_ad", Duration::from_millis(1500));
        assert_eq!(
            interpret_failure(&failure),
            "The ads platform did not respond within 1500 ms. Please try again later."
        );
    }
}
