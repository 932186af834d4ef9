//! Resource client abstraction
//!
//! The calls the composition workflow issues against the remote resource API.
//! Implementations attach the session credential to every call and forward
//! credential rejections to the session's failure handler.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{Campaign, CampaignId, CandidateFile};

#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Create a campaign with its first (default) frame and return its id.
    async fn create_campaign(
        &self,
        name: &str,
        frame: &CandidateFile,
    ) -> Result<CampaignId, ApiError>;

    /// Attach a frame to an existing campaign.
    async fn add_frame(
        &self,
        campaign_id: CampaignId,
        name: &str,
        frame: &CandidateFile,
        is_default: bool,
    ) -> Result<(), ApiError>;

    /// Attach a poster to an existing campaign.
    async fn add_poster(
        &self,
        campaign_id: CampaignId,
        name: &str,
        poster: &CandidateFile,
        is_default: bool,
    ) -> Result<(), ApiError>;

    /// Rename a campaign. Not used by composition.
    async fn rename_campaign(&self, campaign_id: CampaignId, name: &str)
        -> Result<Campaign, ApiError>;
}
