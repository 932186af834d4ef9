//! Domain methods for the admin API client.
//!
//! Campaign listing and detail, rename/delete, frame management, login, and
//! the [`ResourceClient`] calls used by campaign composition.

use async_trait::async_trait;
use framely_core::models::{
    Campaign, CampaignId, CampaignListResponse, CandidateFile, CreatedCampaign, Frame, FrameId,
    FrameListResponse, LoginRequest, LoginResponse,
};
use framely_core::{ApiError, ResourceClient};
use reqwest::multipart::{Form, Part};

use crate::{api_path, ApiClient};

fn file_part(file: &CandidateFile) -> Result<Part, ApiError> {
    Part::bytes(file.data.to_vec())
        .file_name(file.file_name.clone())
        .mime_str(&file.media_type)
        .map_err(|e| {
            ApiError::InvalidRequest(format!(
                "Invalid media type {:?} for {}: {}",
                file.media_type, file.file_name, e
            ))
        })
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn campaign_path(campaign_id: CampaignId) -> String {
    api_path(&format!("/campaign/{}/", campaign_id))
}

fn frames_path(campaign_id: CampaignId) -> String {
    api_path(&format!("/campaign/{}/frames/", campaign_id))
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let response: LoginResponse = self.post_json(&api_path("/login/"), request).await?;
        response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Decode("Login response did not include a token".to_string()))
    }

    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        let response: CampaignListResponse = self.get(&api_path("/campaigns/"), &[]).await?;
        Ok(response.campaigns)
    }

    pub async fn get_campaign(&self, campaign_id: CampaignId) -> Result<Campaign, ApiError> {
        self.get(&campaign_path(campaign_id), &[]).await
    }

    /// Delete a campaign. The server cascades to its frames and posters.
    pub async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<(), ApiError> {
        self.delete(&campaign_path(campaign_id)).await
    }

    pub async fn list_frames(&self, campaign_id: CampaignId) -> Result<Vec<Frame>, ApiError> {
        let response: FrameListResponse = self.get(&frames_path(campaign_id), &[]).await?;
        Ok(response.frames)
    }

    pub async fn delete_frame(
        &self,
        campaign_id: CampaignId,
        frame_id: FrameId,
    ) -> Result<(), ApiError> {
        self.delete(&api_path(&format!(
            "/campaign/{}/frames/{}/",
            campaign_id, frame_id
        )))
        .await
    }
}

#[async_trait]
impl ResourceClient for ApiClient {
    async fn create_campaign(
        &self,
        name: &str,
        frame: &CandidateFile,
    ) -> Result<CampaignId, ApiError> {
        let form = Form::new()
            .text("name", name.to_string())
            .part("frame", file_part(frame)?);

        let created: CreatedCampaign = self.post_multipart(&api_path("/campaign/"), form).await?;
        Ok(created.id)
    }

    async fn add_frame(
        &self,
        campaign_id: CampaignId,
        name: &str,
        frame: &CandidateFile,
        is_default: bool,
    ) -> Result<(), ApiError> {
        let form = Form::new()
            .text("name", name.to_string())
            .part("frame", file_part(frame)?)
            .text("is_default", flag(is_default));

        self.post_multipart_ignore_body(&frames_path(campaign_id), form)
            .await
    }

    async fn add_poster(
        &self,
        campaign_id: CampaignId,
        name: &str,
        poster: &CandidateFile,
        is_default: bool,
    ) -> Result<(), ApiError> {
        let form = Form::new()
            .part("poster", file_part(poster)?)
            .text("name", name.to_string())
            .text("is_default", flag(is_default));

        self.post_multipart_ignore_body(
            &api_path(&format!("/campaign/{}/posters/", campaign_id)),
            form,
        )
        .await
    }

    async fn rename_campaign(
        &self,
        campaign_id: CampaignId,
        name: &str,
    ) -> Result<Campaign, ApiError> {
        let form = Form::new().text("name", name.to_string());
        self.put_multipart(&campaign_path(campaign_id), form).await
    }
}
