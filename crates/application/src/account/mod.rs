//! Account operations against the PetLand API.

mod classifier;
mod service;

pub use classifier::classify;
pub use service::AccountService;
