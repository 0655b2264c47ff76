//! Domain layer containing the authentication data model and its contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Credentials, users and sessions
//! - [`repositories`] - Trait definitions for the auth backend and the session store
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Traits define contracts implemented by the infrastructure layer
//! - Flow orchestration lives in services (see [`crate::application::services`])
//!
//! # Login Flow
//!
//! 1. The login form posts [`entities::Credentials`]
//! 2. [`repositories::AuthGateway::login`] exchanges them for tokens
//! 3. A [`entities::Session`] is written with [`repositories::SessionStore::set_auth`]
//! 4. The browser is redirected to the dashboard

pub mod entities;
pub mod repositories;
