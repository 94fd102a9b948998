use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use credo_core::UserStore;

use super::current_user;
use super::error::ApiError;
use super::responses::UserResponse;
use crate::session::SessionScheme;

#[tracing::instrument(name = "Current user", skip_all)]
pub async fn me<U>(
    State((user_store, session)): State<(U, SessionScheme)>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let user = current_user(&user_store, &session, &jar).await?;
    Ok(Json(UserResponse::from(&user)))
}
