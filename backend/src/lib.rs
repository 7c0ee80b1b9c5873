//! User CRUD service library.
//!
//! Layered in the hexagonal style: `domain` holds the entity, errors, ports,
//! and use-case service; `inbound` maps HTTP onto the domain; `outbound`
//! implements the persistence port against PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
