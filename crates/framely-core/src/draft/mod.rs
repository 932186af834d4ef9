//! Draft campaign state
//!
//! A [`Draft`] stages the name and image batches of a campaign before it is
//! submitted. It lives only in memory and is owned by the command composing it.

mod ordered;

pub use ordered::OrderedBatch;

use std::fmt;

use crate::error::ValidationError;
use crate::models::CandidateFile;
use crate::validation::{BatchOutcome, FileBatchValidator};

/// The two kinds of image batches a campaign is composed of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchKind {
    /// Overlay images; the first one is bound into the create-campaign call
    Frame,
    /// Background images uploaded after the campaign exists
    Poster,
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchKind::Frame => write!(f, "frame"),
            BatchKind::Poster => write!(f, "poster"),
        }
    }
}

/// Which batches a submission requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowVariant {
    /// One or more frames, no posters
    #[default]
    FramesOnly,
    /// At least one poster and at least one frame
    PosterAndFrames,
}

impl WorkflowVariant {
    pub fn required_kinds(&self) -> &'static [BatchKind] {
        match self {
            WorkflowVariant::FramesOnly => &[BatchKind::Frame],
            WorkflowVariant::PosterAndFrames => &[BatchKind::Frame, BatchKind::Poster],
        }
    }

    pub fn includes(&self, kind: BatchKind) -> bool {
        self.required_kinds().contains(&kind)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Draft {
    variant: WorkflowVariant,
    name: String,
    frames: OrderedBatch<CandidateFile>,
    posters: OrderedBatch<CandidateFile>,
    validator: FileBatchValidator,
}

impl Draft {
    pub fn new(variant: WorkflowVariant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    pub fn with_validator(mut self, validator: FileBatchValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn variant(&self) -> WorkflowVariant {
        self.variant
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Name as typed, untrimmed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &OrderedBatch<CandidateFile> {
        &self.frames
    }

    pub fn posters(&self) -> &OrderedBatch<CandidateFile> {
        &self.posters
    }

    pub fn batch(&self, kind: BatchKind) -> &OrderedBatch<CandidateFile> {
        match kind {
            BatchKind::Frame => &self.frames,
            BatchKind::Poster => &self.posters,
        }
    }

    /// Whether the batch reached its cap and further selection should be disabled.
    pub fn is_full(&self, kind: BatchKind) -> bool {
        self.validator.is_full(self.batch(kind))
    }

    /// Add a selection of files to one batch.
    ///
    /// On error the batch is left untouched.
    pub fn add_files(
        &mut self,
        kind: BatchKind,
        files: Vec<CandidateFile>,
    ) -> Result<BatchOutcome, ValidationError> {
        if !self.variant.includes(kind) {
            return Err(ValidationError::KindNotInWorkflow(kind));
        }

        let (merged, outcome) = self.validator.merge(self.batch(kind), files)?;
        match kind {
            BatchKind::Frame => self.frames = merged,
            BatchKind::Poster => self.posters = merged,
        }
        Ok(outcome)
    }

    /// Remove the file at `index`. Removing index 0 makes the next file the default.
    pub fn remove_file(&mut self, kind: BatchKind, index: usize) -> Option<CandidateFile> {
        match kind {
            BatchKind::Frame => self.frames.remove(index),
            BatchKind::Poster => self.posters.remove(index),
        }
    }

    /// Check the submission preconditions, reporting the first unmet one.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        for kind in self.variant.required_kinds() {
            if self.batch(*kind).is_empty() {
                return Err(ValidationError::MissingFiles(*kind));
            }
        }

        Ok(())
    }

    pub fn is_submittable(&self) -> bool {
        self.check().is_ok()
    }
}
