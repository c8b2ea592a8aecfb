//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async write and
//! aggregate methods. They take `&mut PgConnection` rather than a pool so
//! handlers can run them inside their own transaction; plain reads go
//! through [`crate::query`].

pub mod customer_repo;
pub mod rental_repo;
pub mod video_repo;

pub use customer_repo::CustomerRepo;
pub use rental_repo::RentalRepo;
pub use video_repo::VideoRepo;
