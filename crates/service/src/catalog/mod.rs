pub mod memory;
pub mod repository;
pub mod service;

pub use memory::MemoryConcertRepository;
pub use repository::{ConcertQuery, ConcertRepository, DateRange, MongoConcertRepository};
pub use service::ConcertCatalog;
