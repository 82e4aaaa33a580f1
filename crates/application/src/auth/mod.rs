//! Session management for the PetLand account client.
//!
//! This module provides:
//! - The credential store shared by every account call
//! - Session status for display

mod credential_store;

pub use credential_store::{CredentialStore, NotAuthenticated, SessionStatus};
