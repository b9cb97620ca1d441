//! REST API modules, one per resource

pub mod customers;
pub mod health;
pub mod portal;
pub mod reports;
pub mod reservations;
pub mod vehicles;
