use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use credo_application::ChangeNameUseCase;
use credo_core::UserStore;

use super::current_user;
use super::error::ApiError;
use crate::session::SessionScheme;

#[derive(Deserialize)]
pub struct ChangeNameRequest {
    pub name: String,
}

#[tracing::instrument(name = "Change name", skip_all)]
pub async fn change_name<U>(
    State((user_store, session)): State<(U, SessionScheme)>,
    jar: CookieJar,
    Json(request): Json<ChangeNameRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let user = current_user(&user_store, &session, &jar).await?;

    ChangeNameUseCase::new(user_store)
        .execute(&user.id(), request.name)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
