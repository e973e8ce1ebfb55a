// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_drink_repository;
pub mod postgres_drink_repository;

pub use in_memory_drink_repository::InMemoryDrinkRepository;
pub use postgres_drink_repository::PostgresDrinkRepository;
