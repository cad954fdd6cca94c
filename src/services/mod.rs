//! Service layer for usercat
//!
//! The service layer provides business logic on top of the storage layer,
//! pairing every user mutation with its audit record.

pub mod user;

pub use user::UserService;
