// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! shared between the Starboard backend and its clients.
//! This module defines the JSON bodies exchanged over the HTTP API.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Opaque identifier of a registered user
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sign-up / sign-in request body.
///
/// Lives only for the duration of a register or login call; the
/// plaintext password is wiped when the value is dropped.
#[derive(Deserialize, Serialize, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Response to a successful sign-up or sign-in
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    /// Id of the authenticated user
    pub id: UserId,
    /// Email the user registered with
    pub email: String,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// A saved catalog character
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: i64,
    pub name: String,
    pub birth_year: String,
    pub mass: String,
    pub height: String,
    pub eye_color: String,
    /// Owner of the favorite
    pub user_id: UserId,
}

/// Body of `POST /api/me/favorites`. The owner always comes from the
/// authenticated request, never from the body.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFavorite {
    pub name: String,
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub eye_color: String,
}

/// Error payload returned for every failed request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `AUTH_002`
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("a@x.com", "secret1");
        let shown = format!("{creds:?}");
        assert!(shown.contains("a@x.com"));
        assert!(!shown.contains("secret1"));
    }

    #[test]
    fn test_user_id_is_transparent_in_json() {
        let resp = AuthResponse {
            id: UserId(7),
            email: "a@x.com".to_string(),
            token: "t".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_new_favorite_optional_fields_default() {
        let fav: NewFavorite = serde_json::from_str(r#"{"name":"Luke Skywalker"}"#).unwrap();
        assert_eq!(fav.name, "Luke Skywalker");
        assert!(fav.eye_color.is_empty());
    }
}
