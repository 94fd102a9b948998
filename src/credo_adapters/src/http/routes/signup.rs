use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use credo_application::{CredentialRecoveryService, MailScheme, SignupUseCase};
use credo_core::{Email, EmailClient, Password, TokenStore, UserStore};

use super::error::ApiError;
use super::responses::UserResponse;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U, T, E>(
    State((user_store, token_store, email_client, mail)): State<(U, T, E, MailScheme)>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let recovery =
        CredentialRecoveryService::new(user_store.clone(), token_store, email_client, mail);
    let use_case = SignupUseCase::new(user_store, recovery);

    let user = use_case.execute(request.name, email, password).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
