pub mod in_memory_result_repository;
pub mod result_repository;

pub use in_memory_result_repository::InMemoryResultRepository;
pub use result_repository::{MongoResultRepository, ResultRepository};
