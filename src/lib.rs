pub mod auth;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod resources;
pub mod retry;
pub mod trace;
pub mod transport;

pub use config::ClientConfig;
pub use error::ClientError;
pub use lifecycle::LifecycleDriver;
pub use transport::ApiClient;
