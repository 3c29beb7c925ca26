//! Account service
//!
//! Registration, authentication and profile operations. Profile fields
//! are mutated only by their own principal; creation happens at
//! registration.

use std::sync::Arc;

use crate::auth::password;
use crate::data::{Account, AccountProfile, Database, EntityId};
use crate::error::AppError;

fn normalize_optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Account service
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    /// Create new account service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new account
    ///
    /// # Errors
    /// Validation error if the handle or email is empty or already taken.
    pub async fn register(
        &self,
        handle: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AppError> {
        let handle = handle.trim();
        let email = email.trim();

        if handle.is_empty() {
            return Err(AppError::Validation("handle must not be empty".to_string()));
        }
        if email.is_empty() {
            return Err(AppError::Validation("email must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        let account = Account {
            id: EntityId::new().0,
            handle: handle.to_string(),
            email: email.to_string(),
            password_hash: password::hash_password(password)?,
            biography: None,
            avatar_url: None,
            created_at: chrono::Utc::now(),
        };

        self.db.insert_account(&account).await?;

        tracing::info!(handle = %account.handle, "Account registered");

        Ok(account)
    }

    /// Authenticate by handle and password
    ///
    /// Unknown handle and wrong password are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, handle: &str, password: &str) -> Result<Account, AppError> {
        let account = self
            .db
            .get_account_by_handle(handle)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !password::verify_password(password, &account.password_hash) {
            return Err(AppError::Unauthorized);
        }

        Ok(account)
    }

    /// Account profile with follower/following counts and the viewer's
    /// relationship
    ///
    /// The counts and the viewer_follows flag are independent reads; no
    /// transaction spans them.
    ///
    /// # Errors
    /// `NotFound` for an unknown handle.
    pub async fn profile(&self, handle: &str, viewer_id: &str) -> Result<AccountProfile, AppError> {
        let account = self
            .db
            .get_account_by_handle(handle)
            .await?
            .ok_or(AppError::NotFound)?;

        let followers = self.db.count_followers(&account.id).await?;
        let following = self.db.count_following(&account.id).await?;
        let viewer_follows = self.db.is_following(viewer_id, &account.id).await?;

        Ok(AccountProfile {
            id: account.id,
            handle: account.handle,
            biography: account.biography,
            avatar_url: account.avatar_url,
            created_at: account.created_at,
            followers,
            following,
            viewer_follows,
        })
    }

    /// Update the caller's biography
    pub async fn update_biography(
        &self,
        account_id: &str,
        biography: String,
    ) -> Result<(), AppError> {
        let biography = normalize_optional_text(biography);
        self.db
            .update_biography(account_id, biography.as_deref())
            .await
    }

    /// Update the caller's avatar reference
    ///
    /// Only the URL reference is stored; the image bytes live in an
    /// external object store.
    pub async fn update_avatar(&self, account_id: &str, avatar_url: &str) -> Result<(), AppError> {
        let avatar_url = avatar_url.trim();
        if avatar_url.is_empty() {
            return Err(AppError::Validation(
                "avatar_url must not be empty".to_string(),
            ));
        }

        self.db.update_avatar_url(account_id, avatar_url).await
    }
}
