//! Error taxonomy for identity verification operations, and the
//! classification rules that funnel every failure path into it.
//!
//! Two classification paths exist. A transport call that fails outright is
//! classified by [`classify_transport_error`]; a call that completes but
//! whose response carries error entries is classified by
//! [`classify_response_error`]. Every failing operation surfaces exactly
//! one [`VerificationError`], constructed once and never retried.

use crate::transport::{BoxError, GraphQlErrorItem, TransportError};

/// `httpStatus` value the gateway reports for rejected credentials.
const UNAUTHORIZED: i64 = 401;

/// Lowest `httpStatus` value in the server-error range.
const SERVER_ERROR_FLOOR: i64 = 500;

// Backend error-type markers. Matched by substring containment rather than
// equality: the service has shipped prefixed and decorated variants of
// these values across versions.
const MARKER_SERVER_ERROR: &str = "ServerError";
const MARKER_SERVICE_ERROR: &str = "ServiceError";
const MARKER_RECORD_NOT_FOUND: &str = "IdentityVerificationRecordNotFoundError";
const MARKER_UPDATE_FAILED: &str = "IdentityVerificationUpdateFailedError";
const MARKER_UNSUPPORTED_VERIFICATION_METHOD: &str = "UnsupportedVerificationMethodError";
const MARKER_IMPLAUSIBLE_AGE: &str = "ImplausibleAgeError";
const MARKER_INVALID_AGE: &str = "InvalidAgeError";
const MARKER_UNSUPPORTED_COUNTRY: &str = "UnsupportedCountryError";
const MARKER_UNSUPPORTED_NETWORK_LOCATION: &str = "UnsupportedNetworkLocationError";
const MARKER_REQUIRED_IDENTITY_INFORMATION_NOT_PROVIDED: &str =
    "RequiredIdentityInformationNotProvidedError";
const MARKER_IDENTITY_ALREADY_VERIFIED: &str = "IdentityAlreadyVerifiedError";
const MARKER_IDENTITY_CAPTURE_RETRIES_EXCEEDED: &str = "IdentityCaptureRetriesExceededError";
const MARKER_IDENTITY_CAPTURE_RETRY_BLOCKED: &str = "IdentityCaptureRetryBlockedError";
const MARKER_IDENTITY_DATA_REDACTED: &str = "IdentityDataRedactedError";

/// Error surfaced by every operation of
/// [`crate::IdentityVerificationClient`].
///
/// The taxonomy is closed: callers can match exhaustively to discriminate
/// failure kinds. Message fields carry the service's literal error string
/// where one was reported.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    /// An operation was invoked while no user is signed in. Raised before
    /// any transport call is attempted.
    #[error("no user is signed in")]
    NotSignedIn,

    /// The identity provider or gateway rejected the caller's credentials.
    #[error("authentication rejected")]
    Authentication {
        message: Option<String>,
        #[source]
        source: Option<BoxError>,
    },

    /// The verification service reported an internal error.
    #[error("identity verification service error: {message}")]
    InternalServer { message: String },

    /// No verification record exists for the signed-in user.
    #[error("verification record not found: {message}")]
    RecordNotFound { message: String },

    /// An attempt to update the verification record failed.
    #[error("verification record update failed: {message}")]
    UpdateFailed { message: String },

    /// The requested verification method is not supported.
    #[error("unsupported verification method: {message}")]
    UnsupportedVerificationMethod { message: String },

    /// The date of birth provided implies an implausible age.
    #[error("implausible age: {message}")]
    ImplausibleAge { message: String },

    /// The date of birth provided implies an invalid age.
    #[error("invalid age: {message}")]
    InvalidAge { message: String },

    /// The identity's country is not supported for verification.
    #[error("unsupported country: {message}")]
    UnsupportedCountry { message: String },

    /// The attempt originated from an unsupported network location.
    #[error("unsupported network location: {message}")]
    UnsupportedNetworkLocation { message: String },

    /// Identity information the service requires was not provided.
    #[error("required identity information not provided: {message}")]
    RequiredIdentityInformationNotProvided { message: String },

    /// The identity has already been verified.
    #[error("identity already verified: {message}")]
    IdentityAlreadyVerified { message: String },

    /// No document capture attempts remain for this identity.
    #[error("document capture retries exceeded: {message}")]
    IdentityCaptureRetriesExceeded { message: String },

    /// Document capture retries are currently blocked for this identity.
    #[error("document capture retry blocked: {message}")]
    IdentityCaptureRetryBlocked { message: String },

    /// The identity's data has been redacted and can no longer be used.
    #[error("identity data redacted: {message}")]
    IdentityDataRedacted { message: String },

    /// The service reported an error this client does not recognize, or a
    /// response completed without a usable payload.
    #[error("identity verification request failed: {message}")]
    Failed {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Catch-all for transport failures with no mapping of their own.
    #[error("unexpected identity verification failure")]
    Unknown {
        #[source]
        source: BoxError,
    },

    /// The caller's cancellation signal, surfaced unchanged. Never produced
    /// by reclassifying any other failure.
    #[error("operation cancelled")]
    Cancelled,
}

impl VerificationError {
    pub(crate) fn no_payload(context: &str) -> Self {
        Self::Failed {
            message: format!("{context} succeeded but returned no data"),
            source: None,
        }
    }
}

/// Classify a failed transport call.
///
/// Cancellation passes through untouched, an authorization rejection maps
/// to [`VerificationError::Authentication`], and every other transport
/// failure surfaces as [`VerificationError::Unknown`] carrying the original
/// failure as its source. Already-classified [`VerificationError`] values
/// never re-enter this function; the type system keeps classification
/// idempotent.
pub(crate) fn classify_transport_error(err: TransportError) -> VerificationError {
    match err {
        TransportError::Cancelled => VerificationError::Cancelled,
        TransportError::NotAuthorized { message } => VerificationError::Authentication {
            message: Some(message),
            source: None,
        },
        other => VerificationError::Unknown {
            source: Box::new(other),
        },
    }
}

/// Classify one error entry from an error-bearing response.
///
/// An `httpStatus` extension takes precedence over error-type inspection:
/// `401` maps to [`VerificationError::Authentication`] and the server-error
/// range maps to [`VerificationError::Failed`] even when a recognizable
/// marker is also present. Otherwise the error-type string is matched
/// against the marker catalog in order, first match winning, and an
/// unmatched entry falls back to [`VerificationError::Failed`] with the
/// stringified entry as its message.
pub(crate) fn classify_response_error(item: &GraphQlErrorItem) -> VerificationError {
    if let Some(status) = item.http_status() {
        if status == UNAUTHORIZED {
            return VerificationError::Authentication {
                message: Some(item.to_string()),
                source: None,
            };
        }
        if status >= SERVER_ERROR_FLOOR {
            return VerificationError::Failed {
                message: item.to_string(),
                source: None,
            };
        }
    }

    let error_type = item.error_type().unwrap_or_default();
    if error_type.contains(MARKER_SERVER_ERROR) || error_type.contains(MARKER_SERVICE_ERROR) {
        return VerificationError::InternalServer {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_RECORD_NOT_FOUND) {
        return VerificationError::RecordNotFound {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_UPDATE_FAILED) {
        return VerificationError::UpdateFailed {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_UNSUPPORTED_VERIFICATION_METHOD) {
        return VerificationError::UnsupportedVerificationMethod {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_IMPLAUSIBLE_AGE) {
        return VerificationError::ImplausibleAge {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_INVALID_AGE) {
        return VerificationError::InvalidAge {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_UNSUPPORTED_COUNTRY) {
        return VerificationError::UnsupportedCountry {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_UNSUPPORTED_NETWORK_LOCATION) {
        return VerificationError::UnsupportedNetworkLocation {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_REQUIRED_IDENTITY_INFORMATION_NOT_PROVIDED) {
        return VerificationError::RequiredIdentityInformationNotProvided {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_IDENTITY_ALREADY_VERIFIED) {
        return VerificationError::IdentityAlreadyVerified {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_IDENTITY_CAPTURE_RETRIES_EXCEEDED) {
        return VerificationError::IdentityCaptureRetriesExceeded {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_IDENTITY_CAPTURE_RETRY_BLOCKED) {
        return VerificationError::IdentityCaptureRetryBlocked {
            message: error_type.to_owned(),
        };
    }
    if error_type.contains(MARKER_IDENTITY_DATA_REDACTED) {
        return VerificationError::IdentityDataRedacted {
            message: error_type.to_owned(),
        };
    }

    VerificationError::Failed {
        message: item.to_string(),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn item_with_error_type(error_type: &str) -> GraphQlErrorItem {
        serde_json::from_value(json!({
            "message": "request rejected",
            "extensions": {"errorType": error_type}
        }))
        .unwrap()
    }

    fn item_with_status(status: i64, error_type: Option<&str>) -> GraphQlErrorItem {
        let mut extensions = json!({"httpStatus": status});
        if let Some(t) = error_type {
            extensions["errorType"] = json!(t);
        }
        serde_json::from_value(json!({
            "message": "request rejected",
            "extensions": extensions
        }))
        .unwrap()
    }

    #[test]
    fn every_marker_maps_to_its_own_kind() {
        let cases: Vec<(&str, fn(&VerificationError) -> bool)> = vec![
            ("ServerError", |e| {
                matches!(e, VerificationError::InternalServer { .. })
            }),
            ("ServiceError", |e| {
                matches!(e, VerificationError::InternalServer { .. })
            }),
            ("IdentityVerificationRecordNotFoundError", |e| {
                matches!(e, VerificationError::RecordNotFound { .. })
            }),
            ("IdentityVerificationUpdateFailedError", |e| {
                matches!(e, VerificationError::UpdateFailed { .. })
            }),
            ("UnsupportedVerificationMethodError", |e| {
                matches!(e, VerificationError::UnsupportedVerificationMethod { .. })
            }),
            ("ImplausibleAgeError", |e| {
                matches!(e, VerificationError::ImplausibleAge { .. })
            }),
            ("InvalidAgeError", |e| {
                matches!(e, VerificationError::InvalidAge { .. })
            }),
            ("UnsupportedCountryError", |e| {
                matches!(e, VerificationError::UnsupportedCountry { .. })
            }),
            ("UnsupportedNetworkLocationError", |e| {
                matches!(e, VerificationError::UnsupportedNetworkLocation { .. })
            }),
            ("RequiredIdentityInformationNotProvidedError", |e| {
                matches!(
                    e,
                    VerificationError::RequiredIdentityInformationNotProvided { .. }
                )
            }),
            ("IdentityAlreadyVerifiedError", |e| {
                matches!(e, VerificationError::IdentityAlreadyVerified { .. })
            }),
            ("IdentityCaptureRetriesExceededError", |e| {
                matches!(e, VerificationError::IdentityCaptureRetriesExceeded { .. })
            }),
            ("IdentityCaptureRetryBlockedError", |e| {
                matches!(e, VerificationError::IdentityCaptureRetryBlocked { .. })
            }),
            ("IdentityDataRedactedError", |e| {
                matches!(e, VerificationError::IdentityDataRedacted { .. })
            }),
        ];

        for (marker, is_expected_kind) in cases {
            let classified = classify_response_error(&item_with_error_type(marker));
            assert!(
                is_expected_kind(&classified),
                "marker {marker} classified as {classified:?}"
            );
        }
    }

    #[test]
    fn marker_classification_carries_error_type_as_message() {
        let classified =
            classify_response_error(&item_with_error_type("UnsupportedCountryError"));
        match classified {
            VerificationError::UnsupportedCountry { message } => {
                assert_eq!(message, "UnsupportedCountryError");
            }
            other => panic!("expected UnsupportedCountry, got: {other:?}"),
        }
    }

    #[test]
    fn unmatched_error_type_falls_back_to_failed_with_stringified_item() {
        let item = item_with_error_type("SomethingNewError");
        let classified = classify_response_error(&item);
        match classified {
            VerificationError::Failed { message, .. } => {
                assert_eq!(message, item.to_string());
                assert!(message.contains("SomethingNewError"));
            }
            other => panic!("expected Failed, got: {other:?}"),
        }
    }

    #[test]
    fn missing_error_type_falls_back_to_failed() {
        let item: GraphQlErrorItem =
            serde_json::from_value(json!({"message": "opaque failure"})).unwrap();
        match classify_response_error(&item) {
            VerificationError::Failed { message, .. } => assert_eq!(message, "opaque failure"),
            other => panic!("expected Failed, got: {other:?}"),
        }
    }

    #[test]
    fn status_401_wins_over_marker() {
        let item = item_with_status(401, Some("UnsupportedCountryError"));
        assert!(matches!(
            classify_response_error(&item),
            VerificationError::Authentication { .. }
        ));
    }

    #[test]
    fn server_error_status_wins_over_marker() {
        let item = item_with_status(500, Some("IdentityVerificationRecordNotFoundError"));
        assert!(matches!(
            classify_response_error(&item),
            VerificationError::Failed { .. }
        ));

        let item = item_with_status(503, Some("UnsupportedCountryError"));
        assert!(matches!(
            classify_response_error(&item),
            VerificationError::Failed { .. }
        ));
    }

    #[test]
    fn client_error_status_still_consults_markers() {
        let item = item_with_status(400, Some("InvalidAgeError"));
        assert!(matches!(
            classify_response_error(&item),
            VerificationError::InvalidAge { .. }
        ));
    }

    #[test]
    fn cancellation_passes_through_unchanged() {
        assert!(matches!(
            classify_transport_error(TransportError::Cancelled),
            VerificationError::Cancelled
        ));
    }

    #[test]
    fn authorization_rejection_classifies_as_authentication() {
        let classified = classify_transport_error(TransportError::NotAuthorized {
            message: "token expired".into(),
        });
        match classified {
            VerificationError::Authentication { message, .. } => {
                assert_eq!(message.as_deref(), Some("token expired"));
            }
            other => panic!("expected Authentication, got: {other:?}"),
        }
    }

    #[test]
    fn other_transport_failures_classify_as_unknown_with_source() {
        let classified = classify_transport_error(TransportError::Network {
            message: "connection refused".into(),
            source: None,
        });
        match classified {
            VerificationError::Unknown { source } => {
                assert!(source.to_string().contains("connection refused"));
            }
            other => panic!("expected Unknown, got: {other:?}"),
        }
    }

    proptest! {
        // Decoration around a marker never changes its classification.
        #[test]
        fn marker_matching_tolerates_decoration(
            prefix in "[a-z0-9:. ]{0,24}",
            suffix in "[a-z0-9:. ]{0,24}",
        ) {
            let decorated = format!("{prefix}UnsupportedCountryError{suffix}");
            let classified = classify_response_error(&item_with_error_type(&decorated));
            let is_expected = matches!(
                classified,
                VerificationError::UnsupportedCountry { .. }
            );
            prop_assert!(is_expected);
        }

        #[test]
        fn any_server_range_status_classifies_as_failed(status in 500i64..600) {
            let classified = classify_response_error(&item_with_status(status, None));
            let is_expected = matches!(classified, VerificationError::Failed { .. });
            prop_assert!(is_expected);
        }
    }
}
