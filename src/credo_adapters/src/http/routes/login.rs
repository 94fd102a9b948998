use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use credo_application::LoginUseCase;
use credo_core::{Email, Password, UserStore};

use super::error::ApiError;
use super::responses::UserResponse;
use crate::session::SessionScheme;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U>(
    State((user_store, session)): State<(U, SessionScheme)>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let email = Email::try_from(request.email).map_err(|_| ApiError::InvalidCredentials)?;
    let password = Password::try_from(request.password).map_err(|_| ApiError::InvalidCredentials)?;

    let user = LoginUseCase::new(user_store).execute(email, password).await?;

    let cookie = session.issue_cookie(&user.id()).map_err(ApiError::from)?;
    let jar = jar.add(cookie);

    Ok((jar, (StatusCode::OK, Json(UserResponse::from(&user)))))
}
