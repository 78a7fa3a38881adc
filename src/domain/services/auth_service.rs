use std::sync::Arc;
use crate::domain::{
    models::{session::AuthSession, user::User},
    ports::{SessionRepository, UserRepository},
};
use crate::error::AppError;
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};
use tracing::info;

pub struct IssuedSession {
    pub token: String,
    pub csrf_token: String,
    pub user: User,
}

pub struct AuthService {
    session_repo: Arc<dyn SessionRepository>,
    user_repo: Arc<dyn UserRepository>,
    ttl: Duration,
}

impl AuthService {
    pub fn new(session_repo: Arc<dyn SessionRepository>, user_repo: Arc<dyn UserRepository>, ttl_hours: i64) -> Self {
        Self { session_repo, user_repo, ttl: Duration::hours(ttl_hours) }
    }

    pub async fn login(&self, email: &str) -> Result<IssuedSession, AppError> {
        let email = email.trim().to_lowercase();
        let user = self.user_repo.find_by_email(&email).await?
            .ok_or(AppError::Unauthorized)?;

        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".into()));
        }

        let token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect();
        let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now();

        let session = AuthSession {
            token_hash: hash_token(&token),
            user_id: user.id.clone(),
            csrf_token: csrf_token.clone(),
            expires_at: now + self.ttl,
            created_at: now,
        };
        self.session_repo.create(&session).await?;

        info!("User {} logged in", user.id);
        Ok(IssuedSession { token, csrf_token, user })
    }

    /// Resolves a raw session token to its session and current user record.
    pub async fn resolve(&self, raw_token: &str) -> Result<(AuthSession, User), AppError> {
        let token_hash = hash_token(raw_token);
        let session = self.session_repo.find_by_hash(&token_hash).await?
            .ok_or(AppError::Unauthorized)?;

        if session.expires_at < Utc::now() {
            self.session_repo.delete(&token_hash).await?;
            return Err(AppError::Unauthorized);
        }

        let user = self.user_repo.find_by_id(&session.user_id).await?
            .ok_or(AppError::Unauthorized)?;
        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".into()));
        }

        Ok((session, user))
    }

    pub async fn logout(&self, raw_token: &str) -> Result<(), AppError> {
        self.session_repo.delete(&hash_token(raw_token)).await
    }

    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        self.session_repo.delete_expired(Utc::now()).await
    }
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
