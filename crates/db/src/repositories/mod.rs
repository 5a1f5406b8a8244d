//! Repositories take a borrowed connection rather than the pool, so each
//! handler decides how long it holds one.

pub mod contact_repo;
pub mod project_repo;

pub use contact_repo::ContactRepo;
pub use project_repo::ProjectRepo;
