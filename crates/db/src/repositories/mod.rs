//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod account_repo;
pub mod dog_repo;
pub mod message_repo;
pub mod news_repo;
pub mod puppy_repo;

pub use account_repo::AccountRepo;
pub use dog_repo::DogRepo;
pub use message_repo::MessageRepo;
pub use news_repo::NewsRepo;
pub use puppy_repo::PuppyRepo;

/// SQLite expression producing the current UTC time in the stored format.
pub(crate) const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";
