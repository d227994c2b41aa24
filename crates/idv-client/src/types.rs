//! Domain entities, enumerations, and operation inputs for identity
//! verification.
//!
//! Enumerations transmitted as free-text strings by the service carry a
//! forward-compatible `Unknown` member: a wire value this client version
//! does not recognize resolves to `Unknown`, never to an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// -- Typed enums matching service wire values ---------------------------------

/// Method used to verify an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationMethod {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "KNOWLEDGE_OF_PII")]
    KnowledgeOfPii,
    #[serde(rename = "GOVERNMENT_ID")]
    GovernmentId,
    /// Forward-compatible catch-all.
    #[serde(rename = "UNKNOWN", other)]
    Unknown,
}

impl VerificationMethod {
    /// Wire value transmitted by the service for this member.
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::KnowledgeOfPii => "KNOWLEDGE_OF_PII",
            Self::GovernmentId => "GOVERNMENT_ID",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Resolve a service wire value to a member. Unrecognized values resolve
    /// to [`VerificationMethod::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "NONE" => Self::None,
            "KNOWLEDGE_OF_PII" => Self::KnowledgeOfPii,
            "GOVERNMENT_ID" => Self::GovernmentId,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

/// Type of government ID document presented for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdDocumentType {
    #[serde(rename = "driverLicense")]
    DriverLicense,
    #[serde(rename = "passport")]
    Passport,
    #[serde(rename = "idCard")]
    IdCard,
    /// Forward-compatible catch-all.
    #[serde(rename = "Unknown", other)]
    Unknown,
}

impl IdDocumentType {
    /// Wire value transmitted by the service for this member.
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::DriverLicense => "driverLicense",
            Self::Passport => "passport",
            Self::IdCard => "idCard",
            Self::Unknown => "Unknown",
        }
    }

    /// Resolve a service wire value to a member. Unrecognized values resolve
    /// to [`IdDocumentType::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "driverLicense" => Self::DriverLicense,
            "passport" => Self::Passport,
            "idCard" => Self::IdCard,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for IdDocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

/// Progress of the document verification workflow for an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentVerificationStatus {
    #[serde(rename = "notRequired")]
    NotRequired,
    #[serde(rename = "notAttempted")]
    NotAttempted,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "documentUnreadable")]
    DocumentUnreadable,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "succeeded")]
    Succeeded,
    /// Forward-compatible catch-all.
    #[serde(rename = "Unknown", other)]
    Unknown,
}

impl DocumentVerificationStatus {
    /// Wire value transmitted by the service for this member.
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::NotRequired => "notRequired",
            Self::NotAttempted => "notAttempted",
            Self::Pending => "pending",
            Self::DocumentUnreadable => "documentUnreadable",
            Self::Failed => "failed",
            Self::Succeeded => "succeeded",
            Self::Unknown => "Unknown",
        }
    }

    /// Resolve a service wire value to a member. Unrecognized values resolve
    /// to [`DocumentVerificationStatus::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "notRequired" => Self::NotRequired,
            "notAttempted" => Self::NotAttempted,
            "pending" => Self::Pending,
            "documentUnreadable" => Self::DocumentUnreadable,
            "failed" => Self::Failed,
            "succeeded" => Self::Succeeded,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for DocumentVerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

// -- Domain entities -----------------------------------------------------------

/// The verification state of the signed-in user's identity.
///
/// Rebuilt fresh from the service response on every successful operation;
/// never mutated or cached by this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// User ID of the user who provided identity details for verification.
    pub owner: String,
    /// Whether the identity was verified successfully.
    pub verified: bool,
    /// When the identity was verified. Absent if verification has not
    /// completed.
    pub verified_at: Option<DateTime<Utc>>,
    /// Method used for the most recent verification.
    pub verification_method: VerificationMethod,
    /// Whether verification may be attempted again. `false` once the
    /// maximum number of attempts has been reached or a finding rules out
    /// another attempt.
    pub can_attempt_verification_again: bool,
    /// URL for uploading scanned documents, when the service requires them.
    pub id_scan_url: Option<String>,
    /// Method the service requires for the next verification attempt.
    pub required_verification_method: Option<VerificationMethod>,
    /// Document types the service will accept, in the service's order of
    /// preference.
    pub acceptable_document_types: Vec<IdDocumentType>,
    /// Progress of document verification for this identity.
    pub document_verification_status: DocumentVerificationStatus,
}

/// Details for uploading identity documents out of band, obtained via
/// [`crate::IdentityVerificationClient::initiate_identity_document_capture`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCaptureInitiation {
    /// URL for uploading identity document information.
    pub document_capture_url: String,
    /// When the document capture URL stops being usable.
    pub expiry_at: DateTime<Utc>,
}

/// Localized consent document presented to the user before identity data
/// processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProcessingConsentContent {
    /// The consent document itself.
    pub content: String,
    /// MIME type of `content`.
    pub content_type: String,
    /// Locale the document is written in.
    pub locale: String,
}

/// Current state of the signed-in user's identity data processing consent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProcessingConsentStatus {
    /// Whether consent is currently in effect.
    pub consented: bool,
    /// When consent was given.
    pub consented_at: Option<DateTime<Utc>>,
    /// When consent was withdrawn.
    pub consent_withdrawn_at: Option<DateTime<Utc>>,
    /// The consent document the user agreed to.
    pub content: Option<String>,
    /// MIME type of `content`.
    pub content_type: Option<String>,
    /// Language of `content`.
    pub language: Option<String>,
}

// -- Operation inputs ----------------------------------------------------------

/// Personally identifiable information submitted for knowledge-of-PII
/// verification.
///
/// Field format and range validation (date-of-birth format, country code
/// membership) is performed by the service, not by this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyIdentityInput {
    /// First name. Case insensitive.
    pub first_name: String,
    /// Last name. Case insensitive.
    pub last_name: String,
    /// Street address. Case insensitive.
    pub address: String,
    /// City name.
    pub city: Option<String>,
    /// Abbreviated state name, e.g. `NY` rather than `New York`.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code. Must be one of the countries
    /// returned by
    /// [`crate::IdentityVerificationClient::list_supported_countries`].
    pub country: String,
    /// Date of birth formatted as `yyyy-MM-dd`.
    pub date_of_birth: String,
}

/// Government ID document images submitted for document verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyIdentityDocumentInput {
    /// Base64-encoded image of the front of the document.
    pub image_base64: String,
    /// Base64-encoded image of the back of the document.
    pub back_image_base64: String,
    /// Base64-encoded face image, required when
    /// [`crate::IdentityVerificationClient::is_face_image_required`]
    /// reports `true`.
    pub face_image_base64: Option<String>,
    /// ISO 3166-1 alpha-2 country code, e.g. `US`.
    pub country: String,
    /// Type of document being presented.
    pub document_type: IdDocumentType,
}

/// Consent grant or withdrawal submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProcessingConsentInput {
    /// The consent document the user acted on.
    pub content: String,
    /// MIME type of `content`.
    pub content_type: String,
    /// Language of `content`.
    pub language: String,
}

/// Preferences for retrieving consent content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProcessingConsentContentInput {
    /// Preferred MIME type of the returned document.
    pub preferred_content_type: String,
    /// Preferred language of the returned document.
    pub preferred_language: String,
}
