//! Administrator session: login, logout and the current identity.
//!
//! Credentials are checked by a [`CredentialVerifier`]. The default
//! [`AcceptAnyCredentials`] accepts any non-empty identifier/secret pair,
//! so a real verifier can be swapped in without touching the session API.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Authentication errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter both email and password")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Display identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub role: String,
    /// Identifier the user logged in with (email).
    pub identifier: String,
}

/// Decides whether a credential pair is accepted.
pub trait CredentialVerifier {
    fn verify(&self, identifier: &str, secret: &str) -> Result<(), AuthError>;
}

/// Accepts any non-empty credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAnyCredentials;

impl CredentialVerifier for AcceptAnyCredentials {
    fn verify(&self, identifier: &str, secret: &str) -> Result<(), AuthError> {
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(())
    }
}

/// Holds the current session. Never persisted.
#[derive(Debug)]
pub struct SessionStore<V = AcceptAnyCredentials> {
    verifier: V,
    display_name: String,
    role: String,
    current: Option<Identity>,
}

impl SessionStore<AcceptAnyCredentials> {
    /// Session store with the default verifier and display identity.
    pub fn new() -> Self {
        Self::with_verifier(AcceptAnyCredentials, "Admin", "Administrator")
    }
}

impl Default for SessionStore<AcceptAnyCredentials> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: CredentialVerifier> SessionStore<V> {
    /// Session store using `verifier`, handing out the given display identity.
    pub fn with_verifier(verifier: V, display_name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            verifier,
            display_name: display_name.into(),
            role: role.into(),
            current: None,
        }
    }

    /// Log in. Replaces any existing session on success; a failed attempt
    /// leaves the current session as it was.
    pub fn login(&mut self, identifier: &str, secret: &str) -> Result<Identity, AuthError> {
        self.verifier.verify(identifier, secret)?;

        let identity = Identity {
            name: self.display_name.clone(),
            role: self.role.clone(),
            identifier: identifier.to_string(),
        };
        info!("Logged in as {} ({})", identity.name, identity.identifier);
        self.current = Some(identity.clone());
        Ok(identity)
    }

    /// Log out. Idempotent.
    pub fn logout(&mut self) {
        if let Some(identity) = self.current.take() {
            info!("Logged out {}", identity.identifier);
        }
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
