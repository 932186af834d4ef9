//! Turning file paths from the command line into a draft.

use anyhow::Context;
use framely_core::{
    BatchKind, BatchOutcome, CandidateFile, Draft, FileBatchValidator, OrderedBatch,
    ValidationError, WorkflowVariant,
};
use std::path::{Path, PathBuf};

/// Read every path into a candidate file, in order.
pub fn load_files(paths: &[PathBuf]) -> anyhow::Result<Vec<CandidateFile>> {
    paths
        .iter()
        .map(|path| {
            CandidateFile::from_path(path).with_context(|| format!("Read {}", path.display()))
        })
        .collect()
}

/// Per-kind result of pushing a selection through the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionReport {
    pub kind: BatchKind,
    pub outcome: BatchOutcome,
}

impl SelectionReport {
    /// Warning to show when files were skipped, if any.
    pub fn warning(&self) -> Option<String> {
        let BatchOutcome {
            rejected, dropped, ..
        } = self.outcome;
        match (rejected, dropped) {
            (0, 0) => None,
            (r, 0) => Some(format!("Skipped {} non-image {} file(s)", r, self.kind)),
            (0, d) => Some(format!(
                "Skipped {} {} file(s) past the limit of {}",
                d,
                self.kind,
                FileBatchValidator::default().max_files()
            )),
            (r, d) => Some(format!(
                "Skipped {} non-image and {} over-limit {} file(s)",
                r, d, self.kind
            )),
        }
    }
}

/// Build a draft from already-loaded files.
///
/// Any poster selects the poster-and-frames workflow.
pub fn build_draft(
    name: &str,
    frames: Vec<CandidateFile>,
    posters: Vec<CandidateFile>,
) -> Result<(Draft, Vec<SelectionReport>), ValidationError> {
    let variant = if posters.is_empty() {
        WorkflowVariant::FramesOnly
    } else {
        WorkflowVariant::PosterAndFrames
    };

    let mut draft = Draft::new(variant);
    draft.set_name(name);

    let mut reports = Vec::new();
    for (kind, files) in [(BatchKind::Frame, frames), (BatchKind::Poster, posters)] {
        if files.is_empty() {
            continue;
        }
        let outcome = draft.add_files(kind, files)?;
        reports.push(SelectionReport { kind, outcome });
    }

    Ok((draft, reports))
}

/// Read the selected paths and return a draft that is ready to submit.
///
/// Runs entirely offline so bad input is reported before any session or
/// network setup.
pub fn prepare_draft(
    name: &str,
    frame_paths: &[PathBuf],
    poster_paths: &[PathBuf],
) -> anyhow::Result<(Draft, Vec<SelectionReport>)> {
    let (draft, reports) = build_draft(name, load_files(frame_paths)?, load_files(poster_paths)?)?;
    draft.check()?;
    Ok((draft, reports))
}

/// Load a single image file, rejecting anything that is not an image.
pub fn load_single_image(path: &Path) -> anyhow::Result<CandidateFile> {
    let file = CandidateFile::from_path(path).with_context(|| format!("Read {}", path.display()))?;
    let (batch, _) = FileBatchValidator::new(1).merge(&OrderedBatch::new(), vec![file])?;
    batch
        .default_item()
        .cloned()
        .ok_or_else(|| ValidationError::NoValidImages.into())
}
