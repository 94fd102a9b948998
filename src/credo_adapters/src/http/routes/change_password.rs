use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use credo_application::ChangePasswordUseCase;
use credo_core::{Password, UserStore};

use super::current_user;
use super::error::ApiError;
use crate::session::SessionScheme;

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub password: Secret<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<U>(
    State((user_store, session)): State<(U, SessionScheme)>,
    jar: CookieJar,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let user = current_user(&user_store, &session, &jar).await?;

    let current_password =
        Password::try_from(request.password).map_err(|_| ApiError::IncorrectPassword)?;
    let new_password = Password::try_from(request.new_password)?;

    ChangePasswordUseCase::new(user_store)
        .execute(&user, current_password, new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
