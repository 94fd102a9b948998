pub mod bootstrap;
pub mod observability;
pub mod service;

pub use bootstrap::{get_postgres_pool, get_redis_client};
pub use observability::init_tracing;
pub use service::AccountService;
