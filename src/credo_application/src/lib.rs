pub mod mail;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use mail::{MailContent, MailScheme};

pub use use_cases::{
    change_name::{ChangeNameError, ChangeNameUseCase},
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    credential_recovery::{CredentialRecoveryError, CredentialRecoveryService, RESET_TOKEN_TTL},
    delete_account::{DeleteAccountError, DeleteAccountUseCase},
    email_change::{EmailChangeError, EmailChangeService},
    login::{LoginError, LoginUseCase},
    signup::{SignupError, SignupUseCase},
};
