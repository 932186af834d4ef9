use crate::composition::CompositionStep;
use crate::draft::{BatchKind, Draft};
use crate::error::ValidationError;
use crate::models::CandidateFile;

/// A dependent call issued after the campaign exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpCall<'a> {
    pub kind: BatchKind,
    /// Position of the file in its batch (0-based)
    pub position: usize,
    pub name: String,
    pub file: &'a CandidateFile,
    pub is_default: bool,
}

impl FollowUpCall<'_> {
    pub fn step(&self) -> CompositionStep {
        match self.kind {
            BatchKind::Frame => CompositionStep::AddingPrimaryRemainder {
                position: self.position,
            },
            BatchKind::Poster => CompositionStep::AddingSecondary {
                position: self.position,
            },
        }
    }
}

/// Ordered list of calls that turn a draft into a campaign.
///
/// Default tagging is computed here from batch order, never from the order
/// in which responses arrive.
#[derive(Debug, Clone)]
pub struct CompositionPlan<'a> {
    pub campaign_name: &'a str,
    /// First frame, bound into the create-campaign call
    pub primary: &'a CandidateFile,
    pub follow_ups: Vec<FollowUpCall<'a>>,
}

impl<'a> CompositionPlan<'a> {
    pub fn from_draft(draft: &'a Draft) -> Result<Self, ValidationError> {
        draft.check()?;

        let (primary, remaining_frames) = draft
            .frames()
            .split_default()
            .ok_or(ValidationError::MissingFiles(BatchKind::Frame))?;

        let mut follow_ups: Vec<FollowUpCall<'a>> = remaining_frames
            .iter()
            .enumerate()
            .map(|(offset, file)| {
                let position = offset + 1;
                FollowUpCall {
                    kind: BatchKind::Frame,
                    position,
                    name: format!("Frame {}", position + 1),
                    file,
                    is_default: false,
                }
            })
            .collect();

        if draft.variant().includes(BatchKind::Poster) {
            follow_ups.extend(draft.posters().iter().enumerate().map(|(position, file)| {
                FollowUpCall {
                    kind: BatchKind::Poster,
                    position,
                    name: format!("Poster {}", position + 1),
                    file,
                    is_default: position == 0,
                }
            }));
        }

        Ok(Self {
            campaign_name: draft.name().trim(),
            primary,
            follow_ups,
        })
    }

    /// Total number of calls, including create-campaign.
    pub fn call_count(&self) -> usize {
        1 + self.follow_ups.len()
    }
}
