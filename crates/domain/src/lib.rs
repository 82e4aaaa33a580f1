//! PetLand Domain - Core business types
//!
//! This crate defines the domain model for the PetLand account client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod response;
pub mod settings;
pub mod user;

pub use auth::{AccessToken, Credential};
pub use endpoint::{ApiOperation, Endpoint};
pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use settings::ClientConfig;
pub use user::{
    ChatCredentials, EmailCodeRequest, EmailCodeSubmission, LoginRequest, LoginResponse,
    RegistrationRequest, User,
};
