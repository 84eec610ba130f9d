//! Session
//!
//! The signed-in user, passed explicitly to everything that needs it.

use std::path::{Path, PathBuf};

use canteen::priority::Role;
use tracing::info;

use crate::config::{ApiConfig, SessionConfig};

/// The current user and their credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    email: Option<String>,
    university_id: Option<String>,
    role: Role,
    token: Option<String>,
    cart_file: PathBuf,
}

impl Session {
    /// Build the session from configuration.
    #[must_use]
    pub fn from_config(api: &ApiConfig, session: &SessionConfig) -> Self {
        Self {
            email: non_blank(session.email.as_deref()),
            university_id: non_blank(session.university_id.as_deref()),
            role: session.role,
            token: non_blank(api.api_token.as_deref()),
            cart_file: session.cart_file.clone(),
        }
    }

    /// An anonymous session.
    #[must_use]
    pub fn anonymous(cart_file: impl Into<PathBuf>) -> Self {
        Self {
            email: None,
            university_id: None,
            role: Role::default(),
            token: None,
            cart_file: cart_file.into(),
        }
    }

    /// A signed-in session.
    #[must_use]
    pub fn signed_in(email: &str, token: &str, role: Role, university_id: Option<&str>) -> Self {
        Self {
            email: non_blank(Some(email)),
            university_id: non_blank(university_id),
            role,
            token: non_blank(Some(token)),
            cart_file: PathBuf::new(),
        }
    }

    /// Whether the user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// User email.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// User university ID.
    pub fn university_id(&self) -> Option<&str> {
        self.university_id.as_deref()
    }

    /// User role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Bearer token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Cart file used while signed out.
    pub fn cart_file(&self) -> &Path {
        &self.cart_file
    }

    /// Drop the credentials.
    pub fn logout(&mut self) {
        info!(email = ?self.email, "logging out");

        self.token = None;
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_treated_as_missing() {
        let session = Session::signed_in("  ", " ", Role::Student, Some(""));

        assert!(!session.is_authenticated());
        assert!(session.email().is_none());
        assert!(session.university_id().is_none());
    }

    #[test]
    fn logout_drops_the_token() {
        let mut session = Session::signed_in("a@uni.edu", "t", Role::Faculty, None);

        assert!(session.is_authenticated());

        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(session.email(), Some("a@uni.edu"));
    }
}
