//! Repository layer over the record gateway.

mod entity_repository;

pub use entity_repository::EntityRepository;
