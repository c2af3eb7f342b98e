//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the check-in store, the daily aggregate store,
//! and the profile directory, backed by `diesel-async` with `bb8` pooling.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private; repositories only hand domain types across the port boundary.
//!
//! # Example
//!
//! ```no_run
//! use checkin_backend::outbound::persistence::{
//!     DbPool, DieselCheckinRepository, PoolConfig,
//! };
//!
//! # async fn run() -> Result<(), checkin_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/checkins")).await?;
//! let checkins = DieselCheckinRepository::new(pool);
//! # let _ = checkins;
//! # Ok(())
//! # }
//! ```

mod diesel_checkin_repository;
mod diesel_daily_aggregate_repository;
mod diesel_error_mapping;
mod diesel_profile_directory;
mod models;
mod pool;
mod schema;

pub use diesel_checkin_repository::DieselCheckinRepository;
pub use diesel_daily_aggregate_repository::DieselDailyAggregateRepository;
pub use diesel_profile_directory::DieselProfileDirectory;
pub use pool::{DbPool, PoolConfig, PoolError};
