//! Session credential types

mod types;

pub use types::{AccessToken, Credential};
