//! Current User Use Case
//!
//! Profile of the signed-in user.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::{user::User, user_details::UserDetails};
use crate::domain::repository::{UserDetailsRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

pub struct CurrentUser {
    pub user: User,
    pub details: Option<UserDetails>,
}

pub struct CurrentUserUseCase<R>
where
    R: UserRepository + UserDetailsRepository,
{
    repo: Arc<R>,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository + UserDetailsRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<CurrentUser> {
        let user = UserRepository::find_by_id(&*self.repo, user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let details = UserDetailsRepository::find_by_user_id(&*self.repo, user_id).await?;

        Ok(CurrentUser { user, details })
    }
}
