//! # idv-client -- Typed Rust client for the Identity Verification service
//!
//! Provides typed access to the platform's identity verification
//! operations:
//! - **Capabilities**: supported countries and the face-image requirement
//! - **Status**: verification-status polling, from cache or remote
//! - **Verification**: by knowledge of PII or by government ID documents
//! - **Document capture**: capture-and-verify and out-of-band capture
//!   initiation
//! - **Consent**: identity data processing consent lifecycle
//!
//! ## Architecture
//!
//! The client core owns two things: the **error classification** rules
//! that funnel every failure (transport exceptions and service-reported
//! error entries alike) into the closed [`VerificationError`] taxonomy,
//! and the **response transforms** that turn loosely-typed service records
//! into domain entities, resolving unrecognized enum wire values to each
//! enumeration's `Unknown` member instead of failing.
//!
//! Connectivity and authentication are externally supplied capabilities:
//! any [`GraphQlTransport`] and [`AuthenticationProvider`] implementation
//! can back a client. [`HttpGraphQlTransport`] is the bundled
//! GraphQL-over-HTTP adapter.
//!
//! ```no_run
//! use std::sync::Arc;
//! use idv_client::{
//!     AuthenticationProvider, HttpGraphQlTransport, HttpTransportConfig,
//!     IdentityVerificationClient, QueryPolicy,
//! };
//!
//! struct AlwaysSignedIn;
//!
//! impl AuthenticationProvider for AlwaysSignedIn {
//!     fn is_signed_in(&self) -> bool {
//!         true
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpGraphQlTransport::new(HttpTransportConfig {
//!     endpoint: "https://identity-verification.example.com/graphql".parse()?,
//!     api_token: zeroize::Zeroizing::new("token".into()),
//!     timeout_secs: 30,
//! })?;
//! let client =
//!     IdentityVerificationClient::new(Arc::new(transport), Arc::new(AlwaysSignedIn));
//! let identity = client.check_identity_verification(QueryPolicy::RemoteOnly).await?;
//! println!("verified: {}", identity.verified);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
mod graphql;
pub mod http;
mod transform;
pub mod transport;
pub mod types;

pub use auth::AuthenticationProvider;
pub use client::{IdentityVerificationClient, VERSION};
pub use error::VerificationError;
pub use http::{HttpGraphQlTransport, HttpTransportConfig, TransportConfigError};
pub use transport::{
    GraphQlErrorItem, GraphQlResponse, GraphQlTransport, Operation, OperationKind, QueryPolicy,
    TransportError,
};
pub use types::{
    DataProcessingConsentContent, DataProcessingConsentContentInput, DataProcessingConsentInput,
    DataProcessingConsentStatus, DocumentCaptureInitiation, DocumentVerificationStatus,
    IdDocumentType, VerificationMethod, VerifiedIdentity, VerifyIdentityDocumentInput,
    VerifyIdentityInput,
};
