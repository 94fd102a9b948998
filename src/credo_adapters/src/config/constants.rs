pub const DEFAULT_SESSION_COOKIE_NAME: &str = "credo_session";
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 60 * 60 * 24;

pub mod prod {
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
