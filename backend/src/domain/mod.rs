//! Domain layer: entities, errors, ports, and use-case services.

mod error;
pub mod ports;
mod user;
mod users_service;

pub use error::{Error, ErrorCode, ErrorValidationError};
pub use user::{User, UserId, UserName, UserValidationError};
pub use users_service::UserService;
