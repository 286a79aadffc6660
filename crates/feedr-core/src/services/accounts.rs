//! Account service - status accessor over the user directory.
//!
//! Caller scoping (a user only touches their own status) is enforced by the
//! adapters operating solely on the authenticated identity's id; this
//! service is a pure accessor over identity.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::UserRepository;
use crate::validate;

pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    pub async fn status(&self, user_id: Uuid) -> Result<String, DomainError> {
        Ok(self.profile(user_id).await?.status)
    }

    pub async fn set_status(&self, user_id: Uuid, new_status: &str) -> Result<User, DomainError> {
        validate::non_empty("status", new_status)?;

        let mut user = self.profile(user_id).await?;
        user.status = new_status.trim().to_string();
        user.updated_at = Utc::now();

        Ok(self.users.save(user).await?)
    }
}
