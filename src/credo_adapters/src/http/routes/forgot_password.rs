use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use credo_application::{CredentialRecoveryService, MailScheme};
use credo_core::{Email, EmailClient, TokenStore, UserStore};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<U, T, E>(
    State((user_store, token_store, email_client, mail)): State<(U, T, E, MailScheme)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    CredentialRecoveryService::new(user_store, token_store, email_client, mail)
        .forgot_password(&email)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
