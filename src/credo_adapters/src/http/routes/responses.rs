use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use credo_core::User;

/// The account as the API presents it. Tokens and the pending address stay
/// server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "confirmedAt")]
    pub confirmed_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().as_ref().expose_secret().clone(),
            confirmed_at: user.confirmed_at().map(|at| at.to_rfc3339()),
        }
    }
}
