pub mod model;
pub mod repository;

pub use model::IncomeRecord;
pub use repository::LedgerRepository;
