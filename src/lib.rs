//! BookLib Circulation Server
//!
//! A Rust implementation of the BookLib circulation server, providing a REST
//! JSON API for managing a book catalog and the loans issued against it. The
//! circulation ledger guarantees that the count of copies out on loan never
//! exceeds the count owned, even under concurrent requests.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
