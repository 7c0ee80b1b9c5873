//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain service and remain testable without I/O.

use crate::domain::UserService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Use-case service for the user resource.
    pub users: UserService,
}

impl HttpState {
    /// Construct state around the user service.
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}
