use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use credo_application::{CredentialRecoveryService, MailScheme};
use credo_core::{EmailClient, OneTimeToken, Password, TokenStore, UserStore};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<U, T, E>(
    State((user_store, token_store, email_client, mail)): State<(U, T, E, MailScheme)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let password = Password::try_from(request.password)?;
    let token = OneTimeToken::from(request.token);

    CredentialRecoveryService::new(user_store, token_store, email_client, mail)
        .reset_password(&token, password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
