pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    email_change::{EmailChangeOutcome, EmailChangeSide},
    one_time_token::OneTimeToken,
    password::{Password, PasswordError},
    user::User,
    user_id::UserId,
};

pub use ports::{
    repositories::{TokenKind, TokenStore, TokenStoreError, UserStore, UserStoreError},
    services::EmailClient,
};
