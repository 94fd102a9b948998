use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;

use credo_application::{CredentialRecoveryService, MailScheme};
use credo_core::{EmailClient, TokenStore, UserStore};

use super::current_user;
use super::error::ApiError;
use crate::session::SessionScheme;

#[tracing::instrument(name = "Resend confirmation", skip_all)]
pub async fn resend_confirmation<U, T, E>(
    State((user_store, token_store, email_client, mail, session)): State<(
        U,
        T,
        E,
        MailScheme,
        SessionScheme,
    )>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let user = current_user(&user_store, &session, &jar).await?;
    if user.is_confirmed() {
        return Err(ApiError::AlreadyConfirmed);
    }

    CredentialRecoveryService::new(user_store, token_store, email_client, mail)
        .send_confirmation_email(&user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
