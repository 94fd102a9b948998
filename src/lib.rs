//! # Credo - Account Service Library
//!
//! This is a facade crate that re-exports all public APIs from the account
//! service components. Use this crate to get access to the whole service in
//! one place.
//!
//! ## Structure
//!
//! - **Domain types**: `Email`, `Password`, `User`, `OneTimeToken`, etc.
//! - **Repository traits**: `UserStore`, `TokenStore`
//! - **Use cases**: `CredentialRecoveryService`, `EmailChangeService`,
//!   `SignupUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisTokenStore`,
//!   `PostmarkEmailClient`, etc.
//! - **Service**: `AccountService` - the assembled HTTP service

// ============================================================================
// Domain Types
// ============================================================================

/// Domain types and value objects
pub mod domain {
    pub use credo_core::*;
}

// Re-export most commonly used domain types at the root level
pub use credo_core::{
    Email, EmailChangeOutcome, EmailChangeSide, OneTimeToken, Password, User, UserId,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use credo_core::{TokenKind, TokenStore, TokenStoreError, UserStore, UserStoreError};
}

// Re-export repository traits and the email port at root level
pub use credo_core::{
    EmailClient, TokenKind, TokenStore, TokenStoreError, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use credo_application::*;
}

// Re-export use cases at root level
pub use credo_application::{
    ChangeNameUseCase, ChangePasswordUseCase, CredentialRecoveryService, DeleteAccountUseCase,
    EmailChangeService, LoginUseCase, MailScheme, SignupUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use credo_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use credo_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use credo_adapters::email::*;
    }

    /// Session cookie scheme
    pub mod session {
        pub use credo_adapters::session::*;
    }

    /// Configuration
    pub mod config {
        pub use credo_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use credo_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{HashMapTokenStore, HashMapUserStore, PostgresUserStore, RedisTokenStore},
    session::SessionScheme,
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

/// Main account service
pub use credo_service::{AccountService, get_postgres_pool, get_redis_client, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
