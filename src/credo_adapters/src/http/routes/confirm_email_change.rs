use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use credo_application::{EmailChangeService, MailScheme};
use credo_core::{EmailChangeOutcome, EmailChangeSide, EmailClient, OneTimeToken, UserStore};

use super::current_user;
use super::error::ApiError;
use crate::session::SessionScheme;

#[derive(Deserialize)]
pub struct ConfirmEmailChangeRequest {
    pub token: String,
    #[serde(rename = "emailType")]
    pub email_type: EmailChangeSide,
}

#[derive(Serialize, Deserialize)]
pub struct ConfirmEmailChangeResponse {
    pub message: String,
}

#[tracing::instrument(name = "Confirm email change", skip_all)]
pub async fn confirm_email_change<U, E>(
    State((user_store, email_client, mail, session)): State<(U, E, MailScheme, SessionScheme)>,
    jar: CookieJar,
    Json(request): Json<ConfirmEmailChangeRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let user = current_user(&user_store, &session, &jar).await?;
    let token = OneTimeToken::from(request.token);

    let outcome = EmailChangeService::new(user_store, email_client, mail)
        .confirm(&user, &token, request.email_type)
        .await?;

    let message = match outcome {
        EmailChangeOutcome::Completed => "Email address updated.".to_string(),
        EmailChangeOutcome::Pending {
            awaiting: EmailChangeSide::Old,
        } => "Email change confirmed. Waiting for confirmation from your current address."
            .to_string(),
        EmailChangeOutcome::Pending {
            awaiting: EmailChangeSide::New,
        } => "Email change confirmed. Waiting for confirmation from your new address.".to_string(),
    };

    Ok((
        StatusCode::OK,
        Json(ConfirmEmailChangeResponse { message }),
    ))
}
