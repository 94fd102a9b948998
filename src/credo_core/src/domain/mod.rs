pub mod email;
pub mod email_change;
pub mod one_time_token;
pub mod password;
pub mod user;
pub mod user_id;
