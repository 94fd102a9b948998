use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use credo_application::{EmailChangeService, MailScheme};
use credo_core::{Email, EmailClient, UserStore};

use super::current_user;
use super::error::ApiError;
use crate::session::SessionScheme;

#[derive(Deserialize)]
pub struct ChangeEmailRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Change email", skip_all)]
pub async fn change_email<U, E>(
    State((user_store, email_client, mail, session)): State<(U, E, MailScheme, SessionScheme)>,
    jar: CookieJar,
    Json(request): Json<ChangeEmailRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let user = current_user(&user_store, &session, &jar).await?;
    let new_email = Email::try_from(request.email)?;

    EmailChangeService::new(user_store, email_client, mail)
        .initiate(&user, new_email)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
