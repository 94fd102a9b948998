//! Route handlers for the account service.
//!
//! Handlers parse the request, resolve the acting user from the session
//! cookie where one is required, and delegate to the use cases. Each route
//! receives exactly the state it needs as a tuple.

pub mod change_email;
pub mod change_name;
pub mod change_password;
pub mod confirm_email;
pub mod confirm_email_change;
pub mod delete_account;
pub mod error;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod me;
pub mod resend_confirmation;
pub mod reset_password;
pub mod responses;
pub mod signup;

pub use change_email::change_email;
pub use change_name::change_name;
pub use change_password::change_password;
pub use confirm_email::confirm_email;
pub use confirm_email_change::confirm_email_change;
pub use delete_account::delete_account;
pub use forgot_password::forgot_password;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use resend_confirmation::resend_confirmation;
pub use reset_password::reset_password;
pub use signup::signup;

use axum_extra::extract::CookieJar;

use credo_core::{User, UserStore, UserStoreError};

use crate::session::SessionScheme;
use error::ApiError;

/// Resolve the acting user from the session cookie.
///
/// A valid session pointing at a deleted account reads as unauthenticated,
/// not as a 404.
pub(crate) async fn current_user<U>(
    user_store: &U,
    session: &SessionScheme,
    jar: &CookieJar,
) -> Result<User, ApiError>
where
    U: UserStore,
{
    let user_id = session.authenticate(jar)?;
    match user_store.find_by_id(&user_id).await {
        Ok(user) => Ok(user),
        Err(UserStoreError::UserNotFound) => Err(ApiError::Unauthorized),
        Err(e) => Err(e.into()),
    }
}
