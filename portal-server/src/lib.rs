//! portal-server: record service for the student portal
//!
//! Exposes create/read/update/delete operations for students, courses
//! and enrollments over HTTP, backed by PostgreSQL or an in-memory store.

pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod service;
pub mod state;

pub use error::{Error, Result};
pub use http::{build_router, run_server, ServerConfig};
pub use service::{RecordService, ServiceError};
pub use state::AppState;
