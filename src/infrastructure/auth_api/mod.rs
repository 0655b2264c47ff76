//! Client for the remote authentication API.

mod http_auth_client;

pub use http_auth_client::{AuthClientConfig, AuthClientSetupError, HttpAuthClient};
