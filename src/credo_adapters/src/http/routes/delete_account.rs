use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;

use credo_application::DeleteAccountUseCase;
use credo_core::UserStore;

use super::current_user;
use super::error::ApiError;
use crate::session::SessionScheme;

#[tracing::instrument(name = "Delete account", skip_all)]
pub async fn delete_account<U>(
    State((user_store, session)): State<(U, SessionScheme)>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let user = current_user(&user_store, &session, &jar).await?;

    DeleteAccountUseCase::new(user_store)
        .execute(&user.id())
        .await?;

    let jar = jar.remove(session.removal_cookie());
    Ok((jar, StatusCode::NO_CONTENT))
}
