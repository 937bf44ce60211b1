//! Error types for portal-server startup

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while bringing the server up or tearing it down
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
