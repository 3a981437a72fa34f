//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::{
    contact::{Address, Image, Phone},
    email::Email,
    id::{SessionId, UserId},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    auth::Auth, auth_session::AuthSession, user::User, user_details::UserDetails,
};
use crate::domain::repository::{
    AuthRepository, AuthSessionRepository, UserDetailsRepository, UserRepository,
};
use crate::domain::value_object::{
    person_name::PersonName, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create_account(
        &self,
        user: &User,
        details: &UserDetails,
        auth: &Auth,
    ) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                is_business,
                is_admin,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.role.is_business)
        .bind(user.role.is_admin)
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO user_details (
                user_id,
                first_name,
                middle_name,
                last_name,
                phone,
                image_url,
                image_alt,
                state,
                country,
                city,
                street,
                house_number,
                zip,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(details.user_id.as_uuid())
        .bind(&details.name.first)
        .bind(&details.name.middle)
        .bind(&details.name.last)
        .bind(details.phone.as_str())
        .bind(&details.image.url)
        .bind(&details.image.alt)
        .bind(&details.address.state)
        .bind(&details.address.country)
        .bind(&details.address.city)
        .bind(&details.address.street)
        .bind(details.address.house_number)
        .bind(details.address.zip)
        .bind(details.created_at)
        .bind(details.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO auth_credentials (
                user_id,
                password_hash,
                login_failed_count,
                last_failed_at,
                locked_until,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(auth.user_id.as_uuid())
        .bind(auth.password_hash.as_phc_string())
        .bind(auth.login_failed_count as i16)
        .bind(auth.last_failed_at)
        .bind(auth.locked_until)
        .bind(auth.created_at)
        .bind(auth.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, is_business, is_admin, last_login_at, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, is_business, is_admin, last_login_at, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                is_business = $3,
                is_admin = $4,
                last_login_at = $5,
                updated_at = $6
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.role.is_business)
        .bind(user.role.is_admin)
        .bind(user.last_login_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// User Details Repository Implementation
// ============================================================================

impl UserDetailsRepository for PgAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<UserDetails>> {
        let row = sqlx::query_as::<_, UserDetailsRow>(
            r#"
            SELECT
                user_id,
                first_name,
                middle_name,
                last_name,
                phone,
                image_url,
                image_alt,
                state,
                country,
                city,
                street,
                house_number,
                zip,
                created_at,
                updated_at
            FROM user_details
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserDetailsRow::into_details))
    }
}

// ============================================================================
// Auth Repository Implementation
// ============================================================================

impl AuthRepository for PgAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Auth>> {
        let row = sqlx::query_as::<_, AuthRow>(
            r#"
            SELECT
                user_id,
                password_hash,
                login_failed_count,
                last_failed_at,
                locked_until,
                created_at,
                updated_at
            FROM auth_credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AuthRow::into_auth).transpose()
    }

    async fn update(&self, auth: &Auth) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_credentials SET
                password_hash = $2,
                login_failed_count = $3,
                last_failed_at = $4,
                locked_until = $5,
                updated_at = $6
            WHERE user_id = $1
            "#,
        )
        .bind(auth.user_id.as_uuid())
        .bind(auth.password_hash.as_phc_string())
        .bind(auth.login_failed_count as i16)
        .bind(auth.last_failed_at)
        .bind(auth.locked_until)
        .bind(auth.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                is_business,
                is_admin,
                expires_at_ms,
                remember_me,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.role.is_business)
        .bind(session.role.is_admin)
        .bind(session.expires_at_ms)
        .bind(session.remember_me)
        .bind(&session.client_fingerprint_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: &SessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                is_business,
                is_admin,
                expires_at_ms,
                remember_me,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(Utc::now().timestamp_millis())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) if r.client_fingerprint_hash != fingerprint_hash => {
                tracing::warn!(session_id = %session_id, "Auth session fingerprint mismatch");
                Err(AuthError::SessionFingerprintMismatch)
            }
            Some(r) => Ok(Some(r.into_session())),
            None => Ok(None),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");
        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    is_business: bool,
    is_admin: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            role: UserRole {
                is_business: self.is_business,
                is_admin: self.is_admin,
            },
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserDetailsRow {
    user_id: Uuid,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    phone: String,
    image_url: String,
    image_alt: String,
    state: Option<String>,
    country: String,
    city: String,
    street: String,
    house_number: i32,
    zip: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserDetailsRow {
    fn into_details(self) -> UserDetails {
        UserDetails {
            user_id: UserId::from_uuid(self.user_id),
            name: PersonName {
                first: self.first_name,
                middle: self.middle_name,
                last: self.last_name,
            },
            phone: Phone::from_db(self.phone),
            image: Image {
                url: self.image_url,
                alt: self.image_alt,
            },
            address: Address {
                state: self.state,
                country: self.country,
                city: self.city,
                street: self.street,
                house_number: self.house_number,
                zip: self.zip,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthRow {
    user_id: Uuid,
    password_hash: String,
    login_failed_count: i16,
    last_failed_at: Option<DateTime<Utc>>,
    locked_until: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AuthRow {
    fn into_auth(self) -> AuthResult<Auth> {
        Ok(Auth {
            user_id: UserId::from_uuid(self.user_id),
            password_hash: UserPassword::from_db(self.password_hash)?,
            login_failed_count: self.login_failed_count.max(0) as u16,
            last_failed_at: self.last_failed_at,
            locked_until: self.locked_until,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: Uuid,
    is_business: bool,
    is_admin: bool,
    expires_at_ms: i64,
    remember_me: bool,
    client_fingerprint_hash: Vec<u8>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            role: UserRole {
                is_business: self.is_business,
                is_admin: self.is_admin,
            },
            expires_at_ms: self.expires_at_ms,
            remember_me: self.remember_me,
            client_fingerprint_hash: self.client_fingerprint_hash,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
