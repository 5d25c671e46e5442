//! Core types for the Idyllic API.
//!
//! Defines the user record, the validated creation request, and the
//! in-memory [`UserStore`] that owns every user for the process lifetime.

#![warn(clippy::pedantic)]
#![warn(clippy::expect_used)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod store;
pub mod user;

pub use error::{CoreError, FieldErrors};
pub use store::UserStore;
pub use user::{CreateUserRequest, NewUser, User, UserId};
