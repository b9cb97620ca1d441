//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::customer::{Customer, CustomerRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::customer;

use super::db_err;

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: customer::Model) -> Customer {
    Customer {
        id: m.id,
        name: m.name,
        phone: m.phone,
        email: m.email,
        license_number: m.license_number,
        license_image_url: m.license_image_url,
        created_at: m.created_at,
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn save(&self, c: Customer) -> DomainResult<()> {
        debug!("Saving customer: {}", c.id);
        let model = customer::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            phone: Set(c.phone),
            email: Set(c.email),
            license_number: Set(c.license_number),
            license_image_url: Set(c.license_image_url),
            created_at: Set(c.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let models = customer::Entity::find()
            .order_by_asc(customer::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
