// Repository interfaces (ports)
// Implemented by adapters in the infrastructure layer

pub mod drink_repository;

pub use drink_repository::{DrinkRepository, RepositoryError};
