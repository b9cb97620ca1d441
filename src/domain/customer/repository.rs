//! Customer repository interface

use async_trait::async_trait;

use super::model::Customer;
use crate::domain::DomainResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Save a new customer
    async fn save(&self, customer: Customer) -> DomainResult<()>;

    /// Find customer by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Customer>>;

    /// Find all customers
    async fn find_all(&self) -> DomainResult<Vec<Customer>>;
}
