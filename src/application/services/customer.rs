//! Customer onboarding
//!
//! One registration path shared by the staff form and the portal flows,
//! so license-image handling exists exactly once.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Customer, DomainError, DomainResult, FileStore, RepositoryProvider};

/// New customer details as entered by staff or the renter
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub license_number: String,
    /// Raw driver-license image, uploaded if present
    pub license_image: Option<Vec<u8>>,
}

pub struct CustomerService {
    repos: Arc<dyn RepositoryProvider>,
    files: Arc<dyn FileStore>,
}

impl CustomerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, files: Arc<dyn FileStore>) -> Self {
        Self { repos, files }
    }

    pub async fn register(&self, details: NewCustomer) -> DomainResult<Customer> {
        if details.name.trim().is_empty() || details.license_number.trim().is_empty() {
            return Err(DomainError::Validation(
                "Customer name and license number are required".into(),
            ));
        }

        let mut customer = Customer::new(
            details.name,
            details.phone,
            details.email,
            details.license_number,
            None,
        );

        if let Some(image) = details.license_image {
            let url = self
                .files
                .upload(&format!("licenses/{}.png", customer.id), &image)
                .await?;
            customer.license_image_url = Some(url);
        }

        self.repos.customers().save(customer.clone()).await?;
        info!(customer_id = %customer.id, "Customer registered");
        Ok(customer)
    }

    pub async fn get(&self, id: &str) -> DomainResult<Customer> {
        self.repos
            .customers()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn list(&self) -> DomainResult<Vec<Customer>> {
        self.repos.customers().find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::files::InMemoryFileStore;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> CustomerService {
        CustomerService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            Arc::new(InMemoryFileStore::new()),
        )
    }

    fn details() -> NewCustomer {
        NewCustomer {
            name: "Alisher Usmanov".into(),
            phone: "+998901234567".into(),
            email: None,
            license_number: "AF1234567".into(),
            license_image: None,
        }
    }

    #[tokio::test]
    async fn register_without_image() {
        let svc = service();
        let customer = svc.register(details()).await.unwrap();
        assert!(customer.license_image_url.is_none());
        assert_eq!(svc.get(&customer.id).await.unwrap().name, "Alisher Usmanov");
    }

    #[tokio::test]
    async fn register_uploads_license_image() {
        let svc = service();
        let mut d = details();
        d.license_image = Some(b"img".to_vec());
        let customer = svc.register(d).await.unwrap();
        let url = customer.license_image_url.unwrap();
        assert!(url.starts_with("mem://licenses/"));
    }

    #[tokio::test]
    async fn register_rejects_blank_required_fields() {
        let svc = service();
        let mut d = details();
        d.license_number = "  ".into();
        assert!(matches!(
            svc.register(d).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }
}
