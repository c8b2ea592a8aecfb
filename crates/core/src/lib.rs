//! Domain types shared by the database and API crates.
//!
//! Nothing in this crate performs I/O.

pub mod body;
pub mod error;
pub mod rental;
pub mod types;
