//! Database layer - connection pool, migrations and record stores
//!
//! # Design Principles
//!
//! - Connection pool, acquired per statement and returned on drop
//! - Handlers see a `RecordStore` trait object, never a raw pool
//! - Store constraints are the final word on uniqueness and references

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use error::{DbError, ForeignKey, UniqueKey};
pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use store::RecordStore;
