//! Data models for the console
//!
//! Server records (campaigns, frames, posters), login DTOs and the local
//! candidate files that make up a draft.

mod auth;
mod campaign;
mod file;

// Re-export all models for convenient imports
pub use auth::*;
pub use campaign::*;
pub use file::*;
