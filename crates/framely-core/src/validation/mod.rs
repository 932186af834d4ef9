//! Validation modules

pub mod batch;

pub use batch::{BatchOutcome, FileBatchValidator};
