pub mod change_name;
pub mod change_password;
pub mod credential_recovery;
pub mod delete_account;
pub mod email_change;
pub mod login;
pub mod signup;
