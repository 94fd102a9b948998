use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::session::SessionScheme;

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(State(session): State<SessionScheme>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(session.removal_cookie());
    (jar, StatusCode::NO_CONTENT)
}
