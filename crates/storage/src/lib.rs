#![forbid(unsafe_code)]

pub mod repository;
pub mod rest;

pub use repository::{
    CatalogRepository, ExperienceRepository, InMemoryStore, ProgressRepository, RemoteError,
    RemoteStore, SessionRepository,
};
pub use rest::{RestConfig, RestInitError, RestStore};
