#![allow(dead_code)]

pub mod mock_client;

pub use mock_client::{MockResourceClient, RecordedCall, RecordingObserver};

use framely_core::{BatchKind, CandidateFile, Draft, WorkflowVariant};

/// PNG-typed candidate whose payload is its own name.
pub fn image(name: &str) -> CandidateFile {
    CandidateFile::new(name, "image/png", name.as_bytes().to_vec())
}

/// Build a submittable draft from file names.
pub fn draft_with(name: &str, frames: &[&str], posters: &[&str]) -> Draft {
    let variant = if posters.is_empty() {
        WorkflowVariant::FramesOnly
    } else {
        WorkflowVariant::PosterAndFrames
    };
    let mut draft = Draft::new(variant);
    draft.set_name(name);
    if !frames.is_empty() {
        draft
            .add_files(BatchKind::Frame, frames.iter().map(|f| image(f)).collect())
            .unwrap();
    }
    if !posters.is_empty() {
        draft
            .add_files(BatchKind::Poster, posters.iter().map(|p| image(p)).collect())
            .unwrap();
    }
    draft
}
