// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed, time-bound bearer tokens (HS256 JWT).
//!
//! Expiry is carried inside the signed claims, so the server keeps no
//! record of issued tokens beyond the signing secret.
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use starboard_common::UserId;
use std::time::Duration;

use crate::config::{AuthSettings, ConfigError};
use crate::error::AuthError;

/// Wire claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Decoded contents of a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: UserId,
    /// Unix seconds
    pub issued_at: i64,
    /// Unix seconds
    pub expires_at: i64,
}

pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::Invalid(
                "token signing secret must not be empty".to_string(),
            ));
        }

        // Expiry is checked in `verify_at` against an explicit clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn from_settings(settings: &AuthSettings) -> Result<Self, ConfigError> {
        Self::new(settings.jwt_secret.as_bytes())
    }

    /// Issue a token for `subject` valid for `ttl` from now
    pub fn issue(&self, subject: UserId, ttl: Duration) -> Result<String, AuthError> {
        self.issue_at(subject, ttl, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds)
    pub fn issue_at(&self, subject: UserId, ttl: Duration, now: i64) -> Result<String, AuthError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature, structure and expiry against the current time
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (Unix seconds).
    /// A token is still valid at exactly its `exp` second.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<TokenClaims, AuthError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AuthError::TokenInvalid
            })?
            .claims;

        let subject = claims
            .sub
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| AuthError::TokenInvalid)?;

        if now > claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(TokenClaims {
            subject,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret-0123456789";
    const HOUR: Duration = Duration::from_secs(3600);

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET).unwrap()
    }

    /// Flip the first character of the signature segment
    fn tamper_signature(token: &str) -> String {
        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = sig.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        format!("{head}.{}", chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let codec = codec();
        let token = codec.issue(UserId(42), HOUR).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.subject, UserId(42));
        assert_eq!(claims.expires_at - claims.issued_at, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec();
        let token = codec.issue_at(UserId(1), HOUR, 1_000).unwrap();

        assert!(codec.verify_at(&token, 1_000 + 3600).is_ok());
        assert_eq!(
            codec.verify_at(&token, 1_000 + 3601),
            Err(AuthError::TokenExpired)
        );
        // Long past the wall-clock expiry as well
        assert_eq!(codec.verify(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_zero_ttl_expires_after_issue_second() {
        let codec = codec();
        let token = codec.issue_at(UserId(1), Duration::ZERO, 5_000).unwrap();
        assert!(codec.verify_at(&token, 5_000).is_ok());
        assert_eq!(codec.verify_at(&token, 5_001), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = codec();
        let token = codec.issue(UserId(7), HOUR).unwrap();
        let forged = tamper_signature(&token);

        assert_ne!(token, forged);
        assert_eq!(codec.verify(&forged), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = TokenCodec::new(b"another-secret-abcdefghijklmnop").unwrap();
        let token = other.issue(UserId(7), HOUR).unwrap();
        assert_eq!(codec().verify(&token), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let codec = codec();
        for token in ["", "not-a-token", "a.b.c", "a.b"] {
            assert_eq!(codec.verify(token), Err(AuthError::TokenInvalid), "{token}");
        }
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(TokenCodec::new(b"").is_err());
    }
}
