use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{delete, get, patch, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use credo_adapters::{
    config::AllowedOrigins,
    http::routes::{
        change_email, change_name, change_password, confirm_email, confirm_email_change,
        delete_account, forgot_password, login, logout, me, resend_confirmation, reset_password,
        signup,
    },
    session::SessionScheme,
};
use credo_application::MailScheme;
use credo_core::{EmailClient, TokenStore, UserStore};

use crate::observability::{make_span_with_request_id, on_request, on_response};

/// The assembled account service: every route wired to its stores.
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Create a new AccountService with the provided stores and email client
    ///
    /// # Arguments
    /// * `user_store` - Store for user records (must be Clone)
    /// * `token_store` - Store for single-use tokens (must be Clone)
    /// * `email_client` - Client for sending emails (must be Clone)
    /// * `mail` - Link/content composition for outgoing mails
    /// * `session` - Session cookie scheme
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal shared state. Each route is given
    /// exactly the state it needs, nothing more.
    pub fn new<U, T, E>(
        user_store: U,
        token_store: T,
        email_client: E,
        mail: MailScheme,
        session: SessionScheme,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        T: TokenStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let router = Router::new()
            // Signup issues the first confirmation mail
            .route("/auth/signup", post(signup::<U, T, E>))
            .with_state((
                user_store.clone(),
                token_store.clone(),
                email_client.clone(),
                mail.clone(),
            ))
            // Login verifies credentials and mints the session cookie
            .route("/auth/login", post(login::<U>))
            .with_state((user_store.clone(), session.clone()))
            // Logout only clears the cookie
            .route("/auth/logout", post(logout))
            .with_state(session.clone())
            .route("/auth/me", get(me::<U>))
            .with_state((user_store.clone(), session.clone()))
            // Confirmation flows need the token store and the mail pipeline
            .route(
                "/auth/resend-confirmation",
                post(resend_confirmation::<U, T, E>),
            )
            .with_state((
                user_store.clone(),
                token_store.clone(),
                email_client.clone(),
                mail.clone(),
                session.clone(),
            ))
            .route("/auth/confirm-email", post(confirm_email::<U, T, E>))
            .with_state((
                user_store.clone(),
                token_store.clone(),
                email_client.clone(),
                mail.clone(),
                session.clone(),
            ))
            // Password recovery is unauthenticated
            .route("/auth/forgot-password", post(forgot_password::<U, T, E>))
            .with_state((
                user_store.clone(),
                token_store.clone(),
                email_client.clone(),
                mail.clone(),
            ))
            .route("/auth/reset-password", post(reset_password::<U, T, E>))
            .with_state((
                user_store.clone(),
                token_store.clone(),
                email_client.clone(),
                mail.clone(),
            ))
            // The dual-token email change workflow
            .route("/settings/account/email", patch(change_email::<U, E>))
            .with_state((
                user_store.clone(),
                email_client.clone(),
                mail.clone(),
                session.clone(),
            ))
            .route(
                "/settings/account/email/confirm-change",
                post(confirm_email_change::<U, E>),
            )
            .with_state((
                user_store.clone(),
                email_client.clone(),
                mail.clone(),
                session.clone(),
            ))
            // Remaining account settings
            .route("/settings/account/password", patch(change_password::<U>))
            .with_state((user_store.clone(), session.clone()))
            .route("/settings/profile/name", patch(change_name::<U>))
            .with_state((user_store.clone(), session.clone()))
            .route("/settings/account/delete", delete(delete_account::<U>))
            .with_state((user_store, session));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AccountService into a router that can be mounted on
    /// another application
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the account service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_router(allowed_origins);

        tracing::info!("Account service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
