use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please select both start and end locations";
pub const CATALOG_FAILURE_MESSAGE: &str = "Failed to load locations";
pub const ROUTE_FAILURE_MESSAGE: &str = "Failed to calculate route";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no authenticated session")]
    Unauthenticated,
    #[error("backend responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status carried by the failure. A missing session counts as 401.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthenticated => Some(401),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }
}

/// Which externally driven operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    CatalogFetch,
    Submission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Session missing or expired; the host must redirect to login.
    AuthRequired,
    /// Submission rejected because an endpoint was not chosen.
    ValidationFailed,
    /// Any other transport or status failure.
    Generic,
}

impl ErrorClass {
    /// User-facing text, or `None` when the failure is handled by a redirect.
    pub fn user_message(self, phase: RequestPhase) -> Option<&'static str> {
        match (self, phase) {
            (ErrorClass::AuthRequired, _) => None,
            (ErrorClass::ValidationFailed, _) => Some(VALIDATION_MESSAGE),
            (ErrorClass::Generic, RequestPhase::CatalogFetch) => Some(CATALOG_FAILURE_MESSAGE),
            (ErrorClass::Generic, RequestPhase::Submission) => Some(ROUTE_FAILURE_MESSAGE),
        }
    }
}

pub fn classify(status: Option<u16>, phase: RequestPhase) -> ErrorClass {
    match (status, phase) {
        (Some(401), _) => ErrorClass::AuthRequired,
        (Some(422), RequestPhase::Submission) => ErrorClass::ValidationFailed,
        _ => ErrorClass::Generic,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("start location not selected")]
    MissingStart,
    #[error("end location not selected")]
    MissingEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_in_any_phase() {
        assert_eq!(
            classify(Some(401), RequestPhase::CatalogFetch),
            ErrorClass::AuthRequired
        );
        assert_eq!(
            classify(Some(401), RequestPhase::Submission),
            ErrorClass::AuthRequired
        );
    }

    #[test]
    fn test_unprocessable_only_during_submission() {
        assert_eq!(
            classify(Some(422), RequestPhase::Submission),
            ErrorClass::ValidationFailed
        );
        assert_eq!(
            classify(Some(422), RequestPhase::CatalogFetch),
            ErrorClass::Generic
        );
    }

    #[test]
    fn test_everything_else_is_generic() {
        assert_eq!(classify(Some(500), RequestPhase::Submission), ErrorClass::Generic);
        assert_eq!(classify(Some(400), RequestPhase::Submission), ErrorClass::Generic);
        assert_eq!(classify(None, RequestPhase::CatalogFetch), ErrorClass::Generic);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(ErrorClass::AuthRequired.user_message(RequestPhase::Submission), None);
        assert_eq!(
            ErrorClass::ValidationFailed.user_message(RequestPhase::Submission),
            Some("Please select both start and end locations")
        );
        assert_eq!(
            ErrorClass::Generic.user_message(RequestPhase::CatalogFetch),
            Some("Failed to load locations")
        );
        assert_eq!(
            ErrorClass::Generic.user_message(RequestPhase::Submission),
            Some("Failed to calculate route")
        );
    }

    #[test]
    fn test_status_extraction() {
        assert_eq!(ClientError::Unauthenticated.status(), Some(401));
        let err = ClientError::Status {
            status: 503,
            body: "maintenance".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "backend responded with status 503: maintenance"
        );
        let decode = serde_json::from_str::<u8>("nope").unwrap_err();
        assert_eq!(ClientError::from(decode).status(), None);
    }
}
