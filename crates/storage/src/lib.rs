#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryProfileCache, ProfileCache, Storage, StorageError};
