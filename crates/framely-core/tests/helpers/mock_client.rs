//! In-memory resource client that records every call in order

use async_trait::async_trait;
use framely_core::{
    ApiError, Campaign, CampaignId, CandidateFile, CompositionObserver, CompositionState,
    ResourceClient,
};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CreateCampaign {
        name: String,
        frame: String,
    },
    AddFrame {
        campaign_id: CampaignId,
        name: String,
        file: String,
        is_default: bool,
    },
    AddPoster {
        campaign_id: CampaignId,
        name: String,
        file: String,
        is_default: bool,
    },
    RenameCampaign {
        campaign_id: CampaignId,
        name: String,
    },
}

impl RecordedCall {
    pub fn is_default(&self) -> Option<bool> {
        match self {
            RecordedCall::AddFrame { is_default, .. } | RecordedCall::AddPoster { is_default, .. } => {
                Some(*is_default)
            }
            _ => None,
        }
    }
}

/// Mock client. Call number `n` (0-based, across all kinds) fails when it
/// was registered with [`MockResourceClient::fail_call`].
pub struct MockResourceClient {
    campaign_id: CampaignId,
    calls: Mutex<Vec<RecordedCall>>,
    failures: Mutex<Vec<(usize, ApiError)>>,
}

impl MockResourceClient {
    pub fn new(campaign_id: i64) -> Self {
        Self {
            campaign_id: CampaignId(campaign_id),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_call(self, index: usize, error: ApiError) -> Self {
        self.failures.lock().unwrap().push((index, error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> Result<(), ApiError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(call);

        let failures = self.failures.lock().unwrap();
        match failures.iter().find(|(i, _)| *i == index) {
            Some((_, err)) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ResourceClient for MockResourceClient {
    async fn create_campaign(
        &self,
        name: &str,
        frame: &CandidateFile,
    ) -> Result<CampaignId, ApiError> {
        self.record(RecordedCall::CreateCampaign {
            name: name.to_string(),
            frame: frame.file_name.clone(),
        })?;
        Ok(self.campaign_id)
    }

    async fn add_frame(
        &self,
        campaign_id: CampaignId,
        name: &str,
        frame: &CandidateFile,
        is_default: bool,
    ) -> Result<(), ApiError> {
        self.record(RecordedCall::AddFrame {
            campaign_id,
            name: name.to_string(),
            file: frame.file_name.clone(),
            is_default,
        })
    }

    async fn add_poster(
        &self,
        campaign_id: CampaignId,
        name: &str,
        poster: &CandidateFile,
        is_default: bool,
    ) -> Result<(), ApiError> {
        self.record(RecordedCall::AddPoster {
            campaign_id,
            name: name.to_string(),
            file: poster.file_name.clone(),
            is_default,
        })
    }

    async fn rename_campaign(
        &self,
        campaign_id: CampaignId,
        name: &str,
    ) -> Result<Campaign, ApiError> {
        self.record(RecordedCall::RenameCampaign {
            campaign_id,
            name: name.to_string(),
        })?;
        Ok(Campaign {
            id: campaign_id,
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            code: None,
            frame_count: None,
        })
    }
}

/// Observer that keeps every transition it saw.
#[derive(Default)]
pub struct RecordingObserver {
    states: Mutex<Vec<CompositionState>>,
}

impl RecordingObserver {
    pub fn states(&self) -> Vec<CompositionState> {
        self.states.lock().unwrap().clone()
    }
}

impl CompositionObserver for RecordingObserver {
    fn on_transition(&self, state: CompositionState) {
        self.states.lock().unwrap().push(state);
    }
}
