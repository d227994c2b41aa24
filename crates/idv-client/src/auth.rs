//! Authentication provider seam.

#[cfg(test)]
use mockall::automock;

/// Reports whether a user is signed in to the platform.
///
/// Every client operation checks this before contacting the transport;
/// operations invoked without a signed-in user fail with
/// [`crate::VerificationError::NotSignedIn`] and never reach the network.
#[cfg_attr(test, automock)]
pub trait AuthenticationProvider: Send + Sync {
    /// Whether a user is currently signed in.
    fn is_signed_in(&self) -> bool;
}
