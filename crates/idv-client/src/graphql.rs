//! GraphQL operation documents and the raw wire shapes they return.
//!
//! The structs here mirror the service schema field-for-field and stay
//! loosely typed (enum-like fields as `String`, timestamps as epoch
//! numbers). [`crate::transform`] turns them into domain entities.

use serde::{Deserialize, Serialize};

use crate::transport::{Operation, OperationKind};

/// Wire value submitted as the verification method for knowledge-of-PII
/// verification.
pub(crate) const METHOD_KNOWLEDGE_OF_PII: &str = "KNOWLEDGE_OF_PII";

/// Wire value submitted as the verification method for document
/// verification.
pub(crate) const METHOD_GOVERNMENT_ID: &str = "GOVERNMENT_ID";

macro_rules! identity_document {
    ($header:literal, $field:literal) => {
        concat!(
            $header,
            " {\n  ",
            $field,
            " {\n",
            "      owner\n",
            "      verified\n",
            "      verifiedAtEpochMs\n",
            "      verificationMethod\n",
            "      canAttemptVerificationAgain\n",
            "      idScanUrl\n",
            "      requiredVerificationMethod\n",
            "      acceptableDocumentTypes\n",
            "      documentVerificationStatus\n",
            "  }\n}"
        )
    };
}

pub(crate) const GET_CAPABILITIES: Operation = Operation {
    name: "GetIdentityVerificationCapabilities",
    kind: OperationKind::Query,
    document: "\
query GetIdentityVerificationCapabilities {
  getIdentityVerificationCapabilities {
    supportedCountries
    faceImageRequiredWithDocument
  }
}",
};

pub(crate) const CHECK_IDENTITY_VERIFICATION: Operation = Operation {
    name: "CheckIdentityVerification",
    kind: OperationKind::Query,
    document: identity_document!(
        "query CheckIdentityVerification",
        "checkIdentityVerification"
    ),
};

pub(crate) const VERIFY_IDENTITY: Operation = Operation {
    name: "VerifyIdentity",
    kind: OperationKind::Mutation,
    document: identity_document!(
        "mutation VerifyIdentity($input: VerifyIdentityInput!)",
        "verifyIdentity(input: $input)"
    ),
};

pub(crate) const VERIFY_IDENTITY_DOCUMENT: Operation = Operation {
    name: "VerifyIdentityDocument",
    kind: OperationKind::Mutation,
    document: identity_document!(
        "mutation VerifyIdentityDocument($input: VerifyIdentityDocumentInput!)",
        "verifyIdentityDocument(input: $input)"
    ),
};

pub(crate) const CAPTURE_AND_VERIFY_IDENTITY_DOCUMENT: Operation = Operation {
    name: "CaptureAndVerifyIdentityDocument",
    kind: OperationKind::Mutation,
    document: identity_document!(
        "mutation CaptureAndVerifyIdentityDocument($input: VerifyIdentityDocumentInput!)",
        "captureAndVerifyIdentityDocument(input: $input)"
    ),
};

pub(crate) const INITIATE_IDENTITY_DOCUMENT_CAPTURE: Operation = Operation {
    name: "InitiateIdentityDocumentCapture",
    kind: OperationKind::Mutation,
    document: "\
mutation InitiateIdentityDocumentCapture {
  initiateIdentityDocumentCapture {
    documentCaptureUrl
    expiryAtEpochSeconds
  }
}",
};

pub(crate) const PROVIDE_DATA_PROCESSING_CONSENT: Operation = Operation {
    name: "ProvideIdentityDataProcessingConsent",
    kind: OperationKind::Mutation,
    document: "\
mutation ProvideIdentityDataProcessingConsent($input: IdentityDataProcessingConsentInput!) {
  provideIdentityDataProcessingConsent(input: $input) {
    consented
    consentedAtEpochMs
    consentWithdrawnAtEpochMs
    content
    contentType
    language
  }
}",
};

pub(crate) const WITHDRAW_DATA_PROCESSING_CONSENT: Operation = Operation {
    name: "WithdrawIdentityDataProcessingConsent",
    kind: OperationKind::Mutation,
    document: "\
mutation WithdrawIdentityDataProcessingConsent($input: IdentityDataProcessingConsentInput!) {
  withdrawIdentityDataProcessingConsent(input: $input) {
    consented
    consentedAtEpochMs
    consentWithdrawnAtEpochMs
    content
    contentType
    language
  }
}",
};

pub(crate) const GET_DATA_PROCESSING_CONSENT_CONTENT: Operation = Operation {
    name: "GetIdentityDataProcessingConsentContent",
    kind: OperationKind::Query,
    document: "\
query GetIdentityDataProcessingConsentContent($input: IdentityDataProcessingConsentContentInput!) {
  getIdentityDataProcessingConsentContent(input: $input) {
    content
    contentType
    locale
  }
}",
};

pub(crate) const GET_DATA_PROCESSING_CONSENT_STATUS: Operation = Operation {
    name: "GetIdentityDataProcessingConsentStatus",
    kind: OperationKind::Query,
    document: "\
query GetIdentityDataProcessingConsentStatus {
  getIdentityDataProcessingConsentStatus {
    consented
    consentedAtEpochMs
    consentWithdrawnAtEpochMs
    content
    contentType
    language
  }
}",
};

// -- Raw wire shapes -----------------------------------------------------------

/// Raw verified-identity record as transmitted by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawVerifiedIdentity {
    pub owner: String,
    pub verified: bool,
    #[serde(default)]
    pub verified_at_epoch_ms: Option<f64>,
    pub verification_method: String,
    pub can_attempt_verification_again: bool,
    #[serde(default)]
    pub id_scan_url: Option<String>,
    #[serde(default)]
    pub required_verification_method: Option<String>,
    #[serde(default)]
    pub acceptable_document_types: Vec<String>,
    pub document_verification_status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCapabilities {
    #[serde(default)]
    pub supported_countries: Option<Vec<String>>,
    #[serde(default)]
    pub face_image_required_with_document: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCaptureInitiation {
    pub document_capture_url: String,
    pub expiry_at_epoch_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConsentContent {
    pub content: String,
    pub content_type: String,
    pub locale: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConsentStatus {
    pub consented: bool,
    #[serde(default)]
    pub consented_at_epoch_ms: Option<f64>,
    #[serde(default)]
    pub consent_withdrawn_at_epoch_ms: Option<f64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

// -- Per-operation data envelopes ---------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CapabilitiesData {
    #[serde(default)]
    pub get_identity_verification_capabilities: Option<RawCapabilities>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckIdentityVerificationData {
    #[serde(default)]
    pub check_identity_verification: Option<RawVerifiedIdentity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyIdentityData {
    #[serde(default)]
    pub verify_identity: Option<RawVerifiedIdentity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyIdentityDocumentData {
    #[serde(default)]
    pub verify_identity_document: Option<RawVerifiedIdentity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaptureAndVerifyIdentityDocumentData {
    #[serde(default)]
    pub capture_and_verify_identity_document: Option<RawVerifiedIdentity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InitiateIdentityDocumentCaptureData {
    #[serde(default)]
    pub initiate_identity_document_capture: Option<RawCaptureInitiation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProvideConsentData {
    #[serde(default)]
    pub provide_identity_data_processing_consent: Option<RawConsentStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WithdrawConsentData {
    #[serde(default)]
    pub withdraw_identity_data_processing_consent: Option<RawConsentStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConsentContentData {
    #[serde(default)]
    pub get_identity_data_processing_consent_content: Option<RawConsentContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConsentStatusData {
    #[serde(default)]
    pub get_identity_data_processing_consent_status: Option<RawConsentStatus>,
}

// -- Mutation variable shapes --------------------------------------------------

/// Variables for `VerifyIdentity`, submitted under the `input` key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyIdentityRequest<'a> {
    pub verification_method: &'static str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'a str>,
    pub postal_code: &'a str,
    pub country: &'a str,
    pub date_of_birth: &'a str,
}

/// Variables for the document verification mutations, submitted under the
/// `input` key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyIdentityDocumentRequest<'a> {
    pub verification_method: &'static str,
    pub image_base64: &'a str,
    pub back_image_base64: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_image_base64: Option<&'a str>,
    pub country: &'a str,
    pub document_type: &'static str,
}

/// Variables for the consent mutations, submitted under the `input` key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConsentRequest<'a> {
    pub content: &'a str,
    pub content_type: &'a str,
    pub language: &'a str,
}

/// Variables for consent content retrieval, submitted under the `input`
/// key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConsentContentRequest<'a> {
    pub preferred_content_type: &'a str,
    pub preferred_language: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::OperationKind;

    const VERIFIED_IDENTITY_FIELDS: [&str; 9] = [
        "owner",
        "verified",
        "verifiedAtEpochMs",
        "verificationMethod",
        "canAttemptVerificationAgain",
        "idScanUrl",
        "requiredVerificationMethod",
        "acceptableDocumentTypes",
        "documentVerificationStatus",
    ];

    #[test]
    fn identity_operations_select_every_entity_field() {
        for operation in [
            CHECK_IDENTITY_VERIFICATION,
            VERIFY_IDENTITY,
            VERIFY_IDENTITY_DOCUMENT,
            CAPTURE_AND_VERIFY_IDENTITY_DOCUMENT,
        ] {
            for field in VERIFIED_IDENTITY_FIELDS {
                assert!(
                    operation.document.contains(field),
                    "{} is missing {field}",
                    operation.name
                );
            }
        }
    }

    #[test]
    fn operation_kinds_match_their_documents() {
        for operation in [
            GET_CAPABILITIES,
            CHECK_IDENTITY_VERIFICATION,
            GET_DATA_PROCESSING_CONSENT_CONTENT,
            GET_DATA_PROCESSING_CONSENT_STATUS,
        ] {
            assert_eq!(operation.kind, OperationKind::Query);
            assert!(operation.document.starts_with("query"));
        }
        for operation in [
            VERIFY_IDENTITY,
            VERIFY_IDENTITY_DOCUMENT,
            CAPTURE_AND_VERIFY_IDENTITY_DOCUMENT,
            INITIATE_IDENTITY_DOCUMENT_CAPTURE,
            PROVIDE_DATA_PROCESSING_CONSENT,
            WITHDRAW_DATA_PROCESSING_CONSENT,
        ] {
            assert_eq!(operation.kind, OperationKind::Mutation);
            assert!(operation.document.starts_with("mutation"));
        }
    }

    #[test]
    fn verify_identity_request_serializes_camel_case_with_method() {
        let request = VerifyIdentityRequest {
            verification_method: METHOD_KNOWLEDGE_OF_PII,
            first_name: "Ada",
            last_name: "Lovelace",
            address: "1 Analytical Way",
            city: None,
            state: None,
            postal_code: "12345",
            country: "US",
            date_of_birth: "1815-12-10",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["verificationMethod"], "KNOWLEDGE_OF_PII");
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["dateOfBirth"], "1815-12-10");
        assert!(value.get("city").is_none());
    }
}
