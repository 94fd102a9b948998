use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};

use credo_core::{
    Email, EmailChangeSide, OneTimeToken, Password, User, UserId, UserStore, UserStoreError,
};

/// Production user store backed by PostgreSQL.
///
/// Passwords are hashed with argon2id before they touch the database. The
/// email-change writes are single statements with `RETURNING`, so the
/// record handed back is the row exactly as the update left it.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User, password: Password) -> Result<(), UserStoreError> {
        let password_hash = hash_password(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        sqlx::query(
            r#"
                INSERT INTO users (id, name, email, password_hash)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(*user.id().as_uuid())
        .bind(user.name())
        .bind(user.email().as_ref().expose_secret())
        .bind(password_hash.expose_secret())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, new_email, old_email_token, new_email_token, confirmed_at
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        load_user(&row)
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, new_email, old_email_token, new_email_token, confirmed_at
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.as_ref().map(load_user).transpose()
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, name, email, new_email, old_email_token, new_email_token,
                       confirmed_at, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        let password_hash: String = row.try_get("password_hash").map_err(map_db_error)?;
        verify_password(Secret::from(password_hash), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        load_user(&row)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = hash_password(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .bind(password_hash.expose_secret())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Set display name", skip_all)]
    async fn set_name(&self, id: &UserId, name: String) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE users
                SET name = $2
                WHERE id = $1
                RETURNING id, name, email, new_email, old_email_token, new_email_token, confirmed_at
            "#,
        )
        .bind(*id.as_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        load_user(&row)
    }

    #[tracing::instrument(name = "Mark email confirmed", skip_all)]
    async fn mark_email_confirmed(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET confirmed_at = $2
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Begin email change", skip_all)]
    async fn begin_email_change(
        &self,
        id: &UserId,
        new_email: Email,
        old_token: OneTimeToken,
        new_token: OneTimeToken,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE users
                SET new_email = $2, old_email_token = $3, new_email_token = $4
                WHERE id = $1
                RETURNING id, name, email, new_email, old_email_token, new_email_token, confirmed_at
            "#,
        )
        .bind(*id.as_uuid())
        .bind(new_email.as_ref().expose_secret())
        .bind(old_token.as_str())
        .bind(new_token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        load_user(&row)
    }

    #[tracing::instrument(name = "Clear email change token", skip_all)]
    async fn clear_email_change_token(
        &self,
        id: &UserId,
        side: EmailChangeSide,
    ) -> Result<User, UserStoreError> {
        let statement = match side {
            EmailChangeSide::Old => {
                r#"
                    UPDATE users
                    SET old_email_token = NULL
                    WHERE id = $1
                    RETURNING id, name, email, new_email, old_email_token, new_email_token, confirmed_at
                "#
            }
            EmailChangeSide::New => {
                r#"
                    UPDATE users
                    SET new_email_token = NULL
                    WHERE id = $1
                    RETURNING id, name, email, new_email, old_email_token, new_email_token, confirmed_at
                "#
            }
        };

        let row = sqlx::query(statement)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        load_user(&row)
    }

    #[tracing::instrument(name = "Promote new email", skip_all)]
    async fn promote_new_email(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                UPDATE users
                SET email = new_email, new_email = NULL
                WHERE id = $1 AND new_email IS NOT NULL
                RETURNING id, name, email, new_email, old_email_token, new_email_token, confirmed_at
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        load_user(&row)
    }

    #[tracing::instrument(name = "Delete user from user store", skip_all)]
    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM users
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}

fn load_user(row: &PgRow) -> Result<User, UserStoreError> {
    let id: uuid::Uuid = row.try_get("id").map_err(map_db_error)?;
    let name: String = row.try_get("name").map_err(map_db_error)?;
    let email: String = row.try_get("email").map_err(map_db_error)?;
    let new_email: Option<String> = row.try_get("new_email").map_err(map_db_error)?;
    let old_email_token: Option<String> = row.try_get("old_email_token").map_err(map_db_error)?;
    let new_email_token: Option<String> = row.try_get("new_email_token").map_err(map_db_error)?;
    let confirmed_at: Option<DateTime<Utc>> = row.try_get("confirmed_at").map_err(map_db_error)?;

    let email = Email::try_from(Secret::from(email))
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
    let new_email = new_email
        .map(|v| Email::try_from(Secret::from(v)))
        .transpose()
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

    Ok(User::from_parts(
        UserId::from(id),
        name,
        email,
        new_email,
        old_email_token.map(OneTimeToken::from),
        new_email_token.map(OneTimeToken::from),
        confirmed_at,
    ))
}

fn map_db_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.constraint().is_some() {
            return UserStoreError::UserAlreadyExists;
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn hash_password(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            let hasher = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            );
            hasher
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            )
            .verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_password_hash,
            )
            .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}
