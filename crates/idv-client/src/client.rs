//! The identity verification client and its operations.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::AuthenticationProvider;
use crate::error::{classify_response_error, classify_transport_error, VerificationError};
use crate::graphql;
use crate::transform;
use crate::transport::{GraphQlResponse, GraphQlTransport, Operation, QueryPolicy};
use crate::types::{
    DataProcessingConsentContent, DataProcessingConsentContentInput, DataProcessingConsentInput,
    DataProcessingConsentStatus, DocumentCaptureInitiation, VerifiedIdentity,
    VerifyIdentityDocumentInput, VerifyIdentityInput,
};

/// Client version, surfaced for support diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client for the Identity Verification service.
///
/// Holds externally supplied transport and authentication capabilities and
/// no other state; concurrent operations on one instance are independent.
/// Every operation checks the sign-in precondition, delegates the exchange
/// to the transport, and funnels any failure through the error
/// classification rules in [`crate::error`].
#[derive(Clone)]
pub struct IdentityVerificationClient {
    transport: Arc<dyn GraphQlTransport>,
    auth: Arc<dyn AuthenticationProvider>,
}

impl IdentityVerificationClient {
    pub fn new(
        transport: Arc<dyn GraphQlTransport>,
        auth: Arc<dyn AuthenticationProvider>,
    ) -> Self {
        Self { transport, auth }
    }

    /// Retrieve the countries supported for identity verification.
    ///
    /// Returns an empty list when the service reports no countries.
    pub async fn list_supported_countries(&self) -> Result<Vec<String>, VerificationError> {
        debug!("retrieving supported countries for identity verification");
        self.ensure_signed_in()?;

        let response = self
            .query(graphql::GET_CAPABILITIES, Value::Null, QueryPolicy::RemoteOnly)
            .await?;
        let data: graphql::CapabilitiesData = decode_data(response)?;
        Ok(data
            .get_identity_verification_capabilities
            .and_then(|capabilities| capabilities.supported_countries)
            .unwrap_or_default())
    }

    /// Whether a face image must accompany identity document submissions.
    pub async fn is_face_image_required(&self) -> Result<bool, VerificationError> {
        debug!("retrieving face image requirement for document verification");
        self.ensure_signed_in()?;

        let response = self
            .query(graphql::GET_CAPABILITIES, Value::Null, QueryPolicy::RemoteOnly)
            .await?;
        let data: graphql::CapabilitiesData = decode_data(response)?;
        Ok(data
            .get_identity_verification_capabilities
            .and_then(|capabilities| capabilities.face_image_required_with_document)
            .unwrap_or(false))
    }

    /// Check the verification status of the signed-in user's identity.
    pub async fn check_identity_verification(
        &self,
        policy: QueryPolicy,
    ) -> Result<VerifiedIdentity, VerificationError> {
        debug!(?policy, "checking identity verification status");
        self.ensure_signed_in()?;

        let response = self
            .query(graphql::CHECK_IDENTITY_VERIFICATION, Value::Null, policy)
            .await?;
        let data: graphql::CheckIdentityVerificationData = decode_data(response)?;
        let raw = data
            .check_identity_verification
            .ok_or_else(|| VerificationError::no_payload("identity verification query"))?;
        Ok(transform::verified_identity(raw))
    }

    /// Verify the signed-in user's identity against known public records
    /// using the personally identifiable information provided.
    pub async fn verify_identity(
        &self,
        input: VerifyIdentityInput,
    ) -> Result<VerifiedIdentity, VerificationError> {
        debug!("verifying identity from provided information");
        self.ensure_signed_in()?;

        let request = graphql::VerifyIdentityRequest {
            verification_method: graphql::METHOD_KNOWLEDGE_OF_PII,
            first_name: &input.first_name,
            last_name: &input.last_name,
            address: &input.address,
            city: input.city.as_deref(),
            state: input.state.as_deref(),
            postal_code: &input.postal_code,
            country: &input.country,
            date_of_birth: &input.date_of_birth,
        };
        let response = self
            .mutate(graphql::VERIFY_IDENTITY, json!({ "input": request }))
            .await?;
        let data: graphql::VerifyIdentityData = decode_data(response)?;
        let raw = data
            .verify_identity
            .ok_or_else(|| VerificationError::no_payload("identity verification"))?;
        Ok(transform::verified_identity(raw))
    }

    /// Verify the signed-in user's identity from the provided government ID
    /// document images.
    pub async fn verify_identity_document(
        &self,
        input: VerifyIdentityDocumentInput,
    ) -> Result<VerifiedIdentity, VerificationError> {
        debug!("verifying identity document");
        self.ensure_signed_in()?;

        let response = self
            .mutate(
                graphql::VERIFY_IDENTITY_DOCUMENT,
                json!({ "input": document_request(&input) }),
            )
            .await?;
        let data: graphql::VerifyIdentityDocumentData = decode_data(response)?;
        let raw = data
            .verify_identity_document
            .ok_or_else(|| VerificationError::no_payload("document verification"))?;
        Ok(transform::verified_identity(raw))
    }

    /// Capture the provided government ID document images for the signed-in
    /// user and verify identity from them.
    pub async fn capture_and_verify_identity_document(
        &self,
        input: VerifyIdentityDocumentInput,
    ) -> Result<VerifiedIdentity, VerificationError> {
        debug!("capturing and verifying identity document");
        self.ensure_signed_in()?;

        let response = self
            .mutate(
                graphql::CAPTURE_AND_VERIFY_IDENTITY_DOCUMENT,
                json!({ "input": document_request(&input) }),
            )
            .await?;
        let data: graphql::CaptureAndVerifyIdentityDocumentData = decode_data(response)?;
        let raw = data
            .capture_and_verify_identity_document
            .ok_or_else(|| VerificationError::no_payload("document capture"))?;
        Ok(transform::verified_identity(raw))
    }

    /// Obtain a URL for uploading identity documents out of band, along
    /// with its expiry.
    pub async fn initiate_identity_document_capture(
        &self,
    ) -> Result<DocumentCaptureInitiation, VerificationError> {
        debug!("initiating identity document capture");
        self.ensure_signed_in()?;

        let response = self
            .mutate(graphql::INITIATE_IDENTITY_DOCUMENT_CAPTURE, Value::Null)
            .await?;
        let data: graphql::InitiateIdentityDocumentCaptureData = decode_data(response)?;
        let raw = data
            .initiate_identity_document_capture
            .ok_or_else(|| VerificationError::no_payload("document capture initiation"))?;
        transform::capture_initiation(raw).ok_or_else(|| VerificationError::Failed {
            message: "document capture initiation returned an unrepresentable expiry".into(),
            source: None,
        })
    }

    /// Record the signed-in user's consent to identity data processing.
    pub async fn provide_data_processing_consent(
        &self,
        input: DataProcessingConsentInput,
    ) -> Result<DataProcessingConsentStatus, VerificationError> {
        debug!("providing identity data processing consent");
        self.ensure_signed_in()?;

        let response = self
            .mutate(
                graphql::PROVIDE_DATA_PROCESSING_CONSENT,
                json!({ "input": consent_request(&input) }),
            )
            .await?;
        let data: graphql::ProvideConsentData = decode_data(response)?;
        let raw = data
            .provide_identity_data_processing_consent
            .ok_or_else(|| VerificationError::no_payload("consent submission"))?;
        Ok(transform::consent_status(raw))
    }

    /// Withdraw the signed-in user's consent to identity data processing.
    pub async fn withdraw_data_processing_consent(
        &self,
        input: DataProcessingConsentInput,
    ) -> Result<DataProcessingConsentStatus, VerificationError> {
        debug!("withdrawing identity data processing consent");
        self.ensure_signed_in()?;

        let response = self
            .mutate(
                graphql::WITHDRAW_DATA_PROCESSING_CONSENT,
                json!({ "input": consent_request(&input) }),
            )
            .await?;
        let data: graphql::WithdrawConsentData = decode_data(response)?;
        let raw = data
            .withdraw_identity_data_processing_consent
            .ok_or_else(|| VerificationError::no_payload("consent withdrawal"))?;
        Ok(transform::consent_status(raw))
    }

    /// Retrieve the consent document to present before identity data
    /// processing, honoring content-type and language preferences.
    pub async fn get_data_processing_consent_content(
        &self,
        input: DataProcessingConsentContentInput,
    ) -> Result<DataProcessingConsentContent, VerificationError> {
        debug!("retrieving identity data processing consent content");
        self.ensure_signed_in()?;

        let request = graphql::ConsentContentRequest {
            preferred_content_type: &input.preferred_content_type,
            preferred_language: &input.preferred_language,
        };
        let response = self
            .query(
                graphql::GET_DATA_PROCESSING_CONSENT_CONTENT,
                json!({ "input": request }),
                QueryPolicy::RemoteOnly,
            )
            .await?;
        let data: graphql::ConsentContentData = decode_data(response)?;
        let raw = data
            .get_identity_data_processing_consent_content
            .ok_or_else(|| VerificationError::no_payload("consent content query"))?;
        Ok(transform::consent_content(raw))
    }

    /// Retrieve the current state of the signed-in user's identity data
    /// processing consent.
    pub async fn get_data_processing_consent_status(
        &self,
    ) -> Result<DataProcessingConsentStatus, VerificationError> {
        debug!("retrieving identity data processing consent status");
        self.ensure_signed_in()?;

        let response = self
            .query(
                graphql::GET_DATA_PROCESSING_CONSENT_STATUS,
                Value::Null,
                QueryPolicy::RemoteOnly,
            )
            .await?;
        let data: graphql::ConsentStatusData = decode_data(response)?;
        let raw = data
            .get_identity_data_processing_consent_status
            .ok_or_else(|| VerificationError::no_payload("consent status query"))?;
        Ok(transform::consent_status(raw))
    }

    /// Drop any cached query responses held by the transport.
    pub fn reset(&self) {
        debug!("resetting client caches");
        self.transport.clear_caches();
    }

    fn ensure_signed_in(&self) -> Result<(), VerificationError> {
        if self.auth.is_signed_in() {
            Ok(())
        } else {
            Err(VerificationError::NotSignedIn)
        }
    }

    async fn query(
        &self,
        operation: Operation,
        variables: Value,
        policy: QueryPolicy,
    ) -> Result<GraphQlResponse, VerificationError> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, operation = operation.name, ?policy, "executing query");
        let response = self
            .transport
            .query(operation, variables, policy)
            .await
            .map_err(classify_transport_error)?;
        reject_response_errors(operation, request_id, response)
    }

    async fn mutate(
        &self,
        operation: Operation,
        variables: Value,
    ) -> Result<GraphQlResponse, VerificationError> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, operation = operation.name, "executing mutation");
        let response = self
            .transport
            .mutate(operation, variables)
            .await
            .map_err(classify_transport_error)?;
        reject_response_errors(operation, request_id, response)
    }
}

fn reject_response_errors(
    operation: Operation,
    request_id: Uuid,
    response: GraphQlResponse,
) -> Result<GraphQlResponse, VerificationError> {
    if response.has_errors() {
        warn!(
            %request_id,
            operation = operation.name,
            errors = ?response.errors,
            "service reported errors"
        );
        return Err(classify_response_error(&response.errors[0]));
    }
    Ok(response)
}

fn decode_data<T: DeserializeOwned>(response: GraphQlResponse) -> Result<T, VerificationError> {
    let data = response
        .data
        .ok_or_else(|| VerificationError::no_payload("operation"))?;
    serde_json::from_value(data).map_err(|e| VerificationError::Failed {
        message: "response payload did not match the service contract".into(),
        source: Some(Box::new(e)),
    })
}

fn document_request(input: &VerifyIdentityDocumentInput) -> graphql::VerifyIdentityDocumentRequest<'_> {
    graphql::VerifyIdentityDocumentRequest {
        verification_method: graphql::METHOD_GOVERNMENT_ID,
        image_base64: &input.image_base64,
        back_image_base64: &input.back_image_base64,
        face_image_base64: input.face_image_base64.as_deref(),
        country: &input.country,
        document_type: input.document_type.wire_value(),
    }
}

fn consent_request(input: &DataProcessingConsentInput) -> graphql::ConsentRequest<'_> {
    graphql::ConsentRequest {
        content: &input.content,
        content_type: &input.content_type,
        language: &input.language,
    }
}
