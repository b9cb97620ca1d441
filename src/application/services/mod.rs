pub mod contract;
pub mod customer;
pub mod portal;
pub mod reservation;

pub use contract::{ContractService, TemplateContractGenerator};
pub use customer::{CustomerService, NewCustomer};
pub use portal::{PortalBooking, PortalService};
pub use reservation::ReservationService;
