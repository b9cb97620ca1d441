pub mod model;
pub mod repository;

pub use model::{RateSchedule, Vehicle, VehicleStatus};
pub use repository::VehicleRepository;
