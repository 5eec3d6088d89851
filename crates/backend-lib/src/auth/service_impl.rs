use async_trait::async_trait;
use metrics::counter;
use starboard_common::{AuthResponse, Credentials, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use zeroize::Zeroizing;

use super::{AuthService, CredentialHasher, TokenCodec};
use crate::error::{AuthError, StoreError};
use crate::metrics::{AUTH_SIGNIN, AUTH_SIGNIN_FAILED, AUTH_SIGNUP};
use crate::storage::UserStore;

/// Verified against when the email is unknown so that sign-in takes
/// the same time whether or not the account exists
const DUMMY_PASSWORD: &str = "starboard-timing-equalizer";

pub struct DefaultAuth {
    users: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    codec: TokenCodec,
    token_ttl: Duration,
    dummy_hash: String,
}

impl DefaultAuth {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: CredentialHasher,
        codec: TokenCodec,
        token_ttl: Duration,
    ) -> Result<Self, AuthError> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            users,
            hasher,
            codec,
            token_ttl,
            dummy_hash,
        })
    }

    /// Hash on the blocking pool; scrypt is deliberately slow
    async fn hash_password(&self, plain: &str) -> Result<String, AuthError> {
        let hasher = self.hasher;
        let plain = Zeroizing::new(plain.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    async fn verify_password(&self, plain: &str, hashed: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher;
        let plain = Zeroizing::new(plain.to_owned());
        let hashed = hashed.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&plain, &hashed))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    fn issue(&self, id: UserId, email: String) -> Result<AuthResponse, AuthError> {
        let token = self.codec.issue(id, self.token_ttl)?;
        Ok(AuthResponse { id, email, token })
    }
}

fn store_failure(err: StoreError) -> AuthError {
    tracing::error!(error = %err, "user store failure");
    AuthError::Store(err.to_string())
}

#[async_trait]
impl AuthService for DefaultAuth {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn register(&self, credentials: Credentials) -> Result<AuthResponse, AuthError> {
        // Cheap pre-check before paying for a hash
        if self
            .users
            .select_user_by_email(&credentials.email)
            .await
            .map_err(store_failure)?
            .is_some()
        {
            tracing::info!("sign-up rejected, email taken");
            return Err(AuthError::DuplicateEmail);
        }

        let hash = self.hash_password(&credentials.password).await?;

        let user = match self.users.insert_user(&credentials.email, &hash).await {
            Ok(user) => user,
            // Lost a race with a concurrent sign-up for the same email
            Err(StoreError::DuplicateKey) => {
                tracing::info!("sign-up rejected, email taken");
                return Err(AuthError::DuplicateEmail);
            },
            Err(err) => return Err(store_failure(err)),
        };

        counter!(AUTH_SIGNUP).increment(1);
        tracing::info!(user_id = %user.id, "user registered");
        self.issue(user.id, user.email)
    }

    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, AuthError> {
        let user = self
            .users
            .select_user_by_email(&credentials.email)
            .await
            .map_err(store_failure)?;

        let (stored_hash, user) = match user {
            Some(user) => (user.password_hash.clone(), Some(user)),
            None => (self.dummy_hash.clone(), None),
        };
        let password_ok = self
            .verify_password(&credentials.password, &stored_hash)
            .await?;

        match user {
            Some(user) if password_ok => {
                counter!(AUTH_SIGNIN).increment(1);
                tracing::info!(user_id = %user.id, "user signed in");
                self.issue(user.id, user.email)
            },
            _ => {
                counter!(AUTH_SIGNIN_FAILED).increment(1);
                tracing::info!("sign-in rejected");
                Err(AuthError::InvalidCredentials)
            },
        }
    }

    fn authenticate(&self, token: &str) -> Result<UserId, AuthError> {
        self.codec.verify(token).map(|claims| claims.subject)
    }
}
