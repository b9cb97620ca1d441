pub mod customer;
pub mod income_record;
pub mod reservation;
pub mod vehicle;
