//! # Fleet Rental Back-Office
//!
//! Core system for a vehicle rental operation: fleet and availability,
//! tiered pricing, the reservation lifecycle from booking to return,
//! token-gated self-service bookings and the income ledger.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, pure calculations and traits
//! - **application**: Business logic and use cases (reservation lifecycle,
//!   portal flow, contracts)
//! - **infrastructure**: External concerns (SeaORM persistence, file storage)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Cross-cutting runtime concerns (graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiContext};
