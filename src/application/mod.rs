//! Business logic and use cases on top of the domain core.

pub mod services;

pub use services::{
    ContractService, CustomerService, NewCustomer, PortalBooking, PortalService,
    ReservationService, TemplateContractGenerator,
};
