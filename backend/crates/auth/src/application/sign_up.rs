//! Sign Up Use Case
//!
//! Registers a user with profile and credentials.

use std::sync::Arc;

use kernel::{
    contact::{Address, Image, Phone},
    email::Email,
    id::UserId,
};

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth::Auth, user::User, user_details::UserDetails};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    person_name::PersonName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub image: Image,
    pub address: Address,
    pub is_business: bool,
}

pub struct SignUpOutput {
    pub user_id: UserId,
    pub email: Email,
    pub is_business: bool,
}

pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate everything before touching storage
        let email = Email::new(input.email)?;
        let name = PersonName::new(
            &input.first_name,
            input.middle_name.as_deref(),
            &input.last_name,
        )?;
        let phone = Phone::new(input.phone)?;
        let image = input.image.validated()?;
        let address = input.address.validated()?;
        let raw_password = RawPassword::new(input.password)?;

        if UserRepository::exists_by_email(&*self.repo, &email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::register(email, input.is_business);
        let details = UserDetails::new(user.user_id, name, phone, image, address);
        let auth = Auth::new(user.user_id, password_hash);

        self.repo.create_account(&user, &details, &auth).await?;

        tracing::info!(
            user_id = %user.user_id,
            is_business = user.role.is_business,
            "User registered"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            email: user.email,
            is_business: user.role.is_business,
        })
    }
}
