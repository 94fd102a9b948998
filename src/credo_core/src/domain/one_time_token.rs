use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single-use confirmation token.
///
/// Freshly issued tokens are UUID-v4 strings. Inbound tokens are treated as
/// opaque: the server never validates their shape, only exact equality with
/// a stored value (format checks are a client-side nicety).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OneTimeToken(String);

impl OneTimeToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for OneTimeToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for OneTimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
