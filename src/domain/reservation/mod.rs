pub mod model;
pub mod repository;

pub use model::{PaymentMethod, Reservation, ReservationStatus};
pub use repository::ReservationRepository;
