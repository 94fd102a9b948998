use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use credo_application::{CredentialRecoveryService, MailScheme};
use credo_core::{EmailClient, OneTimeToken, TokenStore, UserStore};

use super::current_user;
use super::error::ApiError;
use crate::session::SessionScheme;

#[derive(Deserialize)]
pub struct ConfirmEmailRequest {
    pub token: String,
}

#[tracing::instrument(name = "Confirm email", skip_all)]
pub async fn confirm_email<U, T, E>(
    State((user_store, token_store, email_client, mail, session)): State<(
        U,
        T,
        E,
        MailScheme,
        SessionScheme,
    )>,
    jar: CookieJar,
    Json(request): Json<ConfirmEmailRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let user = current_user(&user_store, &session, &jar).await?;
    // Precondition enforced here, before the core is reached.
    if user.is_confirmed() {
        return Err(ApiError::AlreadyConfirmed);
    }

    let token = OneTimeToken::from(request.token);
    CredentialRecoveryService::new(user_store, token_store, email_client, mail)
        .confirm_email(&user, &token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
