//! Transforms raw service records into domain entities.
//!
//! The verified-identity transform is total: unrecognized enum wire values
//! resolve to each enumeration's `Unknown` member, absent optional fields
//! stay absent, and list order is preserved verbatim.

use chrono::{DateTime, Utc};

use crate::graphql::{RawCaptureInitiation, RawConsentContent, RawConsentStatus, RawVerifiedIdentity};
use crate::types::{
    DataProcessingConsentContent, DataProcessingConsentStatus, DocumentCaptureInitiation,
    DocumentVerificationStatus, IdDocumentType, VerificationMethod, VerifiedIdentity,
};

/// `verifiedAtEpochMs` and the consent timestamps carry whole milliseconds
/// since epoch, transmitted as a GraphQL Double.
fn from_epoch_ms(ms: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms as i64)
}

pub(crate) fn verified_identity(raw: RawVerifiedIdentity) -> VerifiedIdentity {
    VerifiedIdentity {
        owner: raw.owner,
        verified: raw.verified,
        verified_at: raw.verified_at_epoch_ms.and_then(from_epoch_ms),
        verification_method: VerificationMethod::from_wire(&raw.verification_method),
        can_attempt_verification_again: raw.can_attempt_verification_again,
        id_scan_url: raw.id_scan_url,
        required_verification_method: raw
            .required_verification_method
            .as_deref()
            .map(VerificationMethod::from_wire),
        acceptable_document_types: raw
            .acceptable_document_types
            .iter()
            .map(|wire| IdDocumentType::from_wire(wire))
            .collect(),
        document_verification_status: DocumentVerificationStatus::from_wire(
            &raw.document_verification_status,
        ),
    }
}

/// `expiryAtEpochSeconds` carries whole seconds since epoch. Returns `None`
/// when the value is outside the representable range, which the caller
/// treats as a violated service contract.
pub(crate) fn capture_initiation(raw: RawCaptureInitiation) -> Option<DocumentCaptureInitiation> {
    Some(DocumentCaptureInitiation {
        document_capture_url: raw.document_capture_url,
        expiry_at: DateTime::from_timestamp(raw.expiry_at_epoch_seconds, 0)?,
    })
}

pub(crate) fn consent_content(raw: RawConsentContent) -> DataProcessingConsentContent {
    DataProcessingConsentContent {
        content: raw.content,
        content_type: raw.content_type,
        locale: raw.locale,
    }
}

pub(crate) fn consent_status(raw: RawConsentStatus) -> DataProcessingConsentStatus {
    DataProcessingConsentStatus {
        consented: raw.consented,
        consented_at: raw.consented_at_epoch_ms.and_then(from_epoch_ms),
        consent_withdrawn_at: raw.consent_withdrawn_at_epoch_ms.and_then(from_epoch_ms),
        content: raw.content,
        content_type: raw.content_type,
        language: raw.language,
    }
}
