//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub vehicle_id: String,

    #[sea_orm(nullable)]
    pub customer_id: Option<String>,

    #[sea_orm(nullable)]
    pub start_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub end_at: Option<DateTimeUtc>,

    /// Lifecycle status: PendingCustomer, Scheduled, Active, Completed, Cancelled
    pub status: String,

    #[sea_orm(nullable)]
    pub start_odometer: Option<i64>,

    #[sea_orm(nullable)]
    pub end_odometer: Option<i64>,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    #[sea_orm(nullable)]
    pub payment_method: Option<String>,

    #[sea_orm(nullable)]
    pub total_price: Option<i64>,

    /// SHA-256 of the live portal token; NULL once consumed or cancelled
    #[sea_orm(nullable)]
    pub token_hash: Option<String>,

    #[sea_orm(nullable)]
    pub handover_signature_url: Option<String>,

    #[sea_orm(nullable)]
    pub return_signature_url: Option<String>,

    #[sea_orm(nullable)]
    pub contract_text: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
