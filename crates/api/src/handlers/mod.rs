pub mod auth;
pub mod dogs;
pub mod messages;
pub mod news;
pub mod puppies;
