pub mod filters;
pub mod store;
pub use store::WorkshopStore;
pub mod workshop_repo;
pub use workshop_repo::WorkshopRepository;
pub mod memory_store;
pub use memory_store::{Dataset, InMemoryStore};
