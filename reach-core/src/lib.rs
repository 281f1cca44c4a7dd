//! Reach Core Library
//!
//! Core functionality for Reach - contact sync and invite matching.
//! This crate loads the user's address book, normalizes and deduplicates
//! phone numbers, matches them against the remote identity service and
//! publishes an ordered, searchable contact list for the invite screen.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod config;
pub mod contacts;
pub mod identity;
pub mod invite;
pub mod remote;
pub mod sync;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::{Collaborators, PermissionOutcome, ReachCore};
pub use config::ReachConfig;
