pub mod bill_repository;
pub mod challan_repository;
pub mod counter_repository;
pub mod party_repository;
pub mod session_store;

pub use bill_repository::PostgresBillRepository;
pub use challan_repository::PostgresChallanRepository;
pub use counter_repository::PostgresCounterStore;
pub use party_repository::PostgresPartyRepository;
pub use session_store::PostgresSessionStore;
