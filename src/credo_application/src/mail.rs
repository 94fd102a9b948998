use credo_core::{EmailChangeSide, OneTimeToken};

/// Composes the account mails and the confirmation links they carry.
///
/// Links point at the public web origin, not at this service: the client
/// application owns the landing pages and calls back into the API with the
/// token it finds in the query string.
#[derive(Debug, Clone)]
pub struct MailScheme {
    public_origin: String,
}

pub struct MailContent {
    pub subject: &'static str,
    pub body: String,
}

impl MailScheme {
    pub fn new(public_origin: impl Into<String>) -> Self {
        let mut origin = public_origin.into();
        while origin.ends_with('/') {
            origin.pop();
        }
        Self { public_origin: origin }
    }

    pub fn account_confirmation(&self, name: &str, token: &OneTimeToken) -> MailContent {
        let url = format!("{}/confirm/account?token={}", self.public_origin, token);
        MailContent {
            subject: "Confirm your email account",
            body: format!(
                "Hi {name},\n\n\
                 Welcome! Please confirm your email address by opening the link below:\n\n\
                 {url}\n\n\
                 If you did not sign up for this account, you can safely ignore this message.\n"
            ),
        }
    }

    pub fn password_reset(&self, name: &str, token: &OneTimeToken) -> MailContent {
        let url = format!("{}/auth/password/reset?token={}", self.public_origin, token);
        MailContent {
            subject: "Reset Password Request",
            body: format!(
                "Hi {name},\n\n\
                 A password reset was requested for your account. The link below is valid \
                 for 15 minutes:\n\n\
                 {url}\n\n\
                 If you did not request a reset, you can safely ignore this message.\n"
            ),
        }
    }

    pub fn email_change_confirmation(
        &self,
        name: &str,
        token: &OneTimeToken,
        side: EmailChangeSide,
    ) -> MailContent {
        let url = format!(
            "{}/confirm/email-change?token={}&side={}",
            self.public_origin,
            token,
            side.as_str()
        );
        let which = match side {
            EmailChangeSide::Old => "from your current address",
            EmailChangeSide::New => "your new address",
        };
        MailContent {
            subject: "Confirm email change",
            body: format!(
                "Hi {name},\n\n\
                 A change of the email address on your account was requested. To confirm \
                 {which}, open the link below:\n\n\
                 {url}\n\n\
                 The change only takes effect once both addresses have confirmed it.\n"
            ),
        }
    }
}
