//! Framely Core Library
//!
//! This crate provides the campaign composition workflow shared by the API client
//! and the console binary: domain models, draft state, file batch validation, the
//! [`ResourceClient`] capability and the orchestrator that drives it.

pub mod composition;
pub mod config;
pub mod constants;
pub mod draft;
pub mod error;
pub mod models;
pub mod resource;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use composition::{
    CompositionObserver, CompositionOrchestrator, CompositionPlan, CompositionState,
    CompositionStep, FollowUpCall,
};
pub use config::{ConfigError, ConsoleConfig};
pub use draft::{BatchKind, Draft, OrderedBatch, WorkflowVariant};
pub use error::{ApiError, CompositionError, ErrorMetadata, LogLevel, ValidationError};
pub use models::{
    share_url, Campaign, CampaignId, CandidateFile, Frame, FrameId, Poster, PosterId,
};
pub use resource::ResourceClient;
pub use session::{AuthFailureHandler, NoOpAuthFailureHandler, Session};
pub use validation::{BatchOutcome, FileBatchValidator};
