//! Kennel domain core.
//!
//! Pure rules with no I/O: the error type, field validation for every
//! resource, ownership checks, pagination math, upload acceptance and the
//! client-side owner gate.

pub mod accounts;
pub mod dogs;
pub mod error;
pub mod forms;
pub mod gate;
pub mod listing;
pub mod messages;
pub mod news;
pub mod ownership;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod uploads;
