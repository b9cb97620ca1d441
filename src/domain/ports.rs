//! Outbound collaborator ports
//!
//! External services the core depends on, specified by contract only.
//! The core stores whatever opaque references they return and has no
//! semantic dependency on how the output was produced.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::DomainResult;

/// Opaque binary store for driver-license and signature images.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Upload `bytes` under `path`, returning a public URL reference.
    async fn upload(&self, path: &str, bytes: &[u8]) -> DomainResult<String>;
}

/// Everything the contract-text generator gets to see.
#[derive(Debug, Clone)]
pub struct ContractSnapshot {
    pub reservation_id: String,
    pub vehicle_name: String,
    pub vehicle_plate: String,
    pub customer_name: String,
    pub license_number: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub total_price: i64,
}

/// External contract-text generation service.
///
/// The returned text is persisted verbatim as an immutable string.
#[async_trait]
pub trait ContractGenerator: Send + Sync {
    async fn generate(&self, snapshot: &ContractSnapshot) -> DomainResult<String>;
}
