use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use credo_application::{
    ChangeNameError, ChangePasswordError, CredentialRecoveryError, DeleteAccountError,
    EmailChangeError, LoginError, SignupError,
};
use credo_core::{EmailError, PasswordError, UserStoreError};

use crate::session::SessionError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid token provided")]
    InvalidToken,

    #[error("You are not allowed to use this token")]
    Forbidden,

    #[error("User with that email already exists")]
    EmailAlreadyExists,

    #[error("You have already confirmed your email")]
    AlreadyConfirmed,

    #[error("Wrong email or password provided")]
    InvalidCredentials,

    #[error("Incorrect password provided")]
    IncorrectPassword,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing or invalid session")]
    Unauthorized,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::InvalidToken
            | ApiError::AlreadyConfirmed
            | ApiError::EmailAlreadyExists
            | ApiError::InvalidCredentials
            | ApiError::IncorrectPassword
            | ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),

            ApiError::UserNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            ApiError::UnexpectedError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::MissingToken | SessionError::InvalidToken => ApiError::Unauthorized,
            SessionError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => ApiError::EmailAlreadyExists,
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::IncorrectPassword => ApiError::IncorrectPassword,
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<CredentialRecoveryError> for ApiError {
    fn from(error: CredentialRecoveryError) -> Self {
        match error {
            CredentialRecoveryError::InvalidToken => ApiError::InvalidToken,
            CredentialRecoveryError::TokenOwnerMismatch => ApiError::Forbidden,
            CredentialRecoveryError::UserNotFound => ApiError::UserNotFound,
            CredentialRecoveryError::UserStore(e) => e.into(),
            CredentialRecoveryError::TokenStore(e) => ApiError::UnexpectedError(e.to_string()),
            CredentialRecoveryError::Email(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<EmailChangeError> for ApiError {
    fn from(error: EmailChangeError) -> Self {
        match error {
            EmailChangeError::InvalidToken => ApiError::InvalidToken,
            EmailChangeError::EmailAlreadyExists => ApiError::EmailAlreadyExists,
            EmailChangeError::UserStore(e) => e.into(),
            EmailChangeError::Email(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::UserStore(e) => e.into(),
            SignupError::Recovery(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            // Which of the two was wrong stays private.
            LoginError::UserStore(UserStoreError::UnexpectedError(e)) => {
                ApiError::UnexpectedError(e)
            }
            LoginError::UserStore(_) => ApiError::InvalidCredentials,
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::IncorrectPassword => ApiError::IncorrectPassword,
            ChangePasswordError::UserStore(e) => e.into(),
        }
    }
}

impl From<ChangeNameError> for ApiError {
    fn from(error: ChangeNameError) -> Self {
        match error {
            ChangeNameError::UserStore(e) => e.into(),
        }
    }
}

impl From<DeleteAccountError> for ApiError {
    fn from(error: DeleteAccountError) -> Self {
        match error {
            DeleteAccountError::UserStore(e) => e.into(),
        }
    }
}
