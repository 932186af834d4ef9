//! The `create` command: submit a draft, then resolve the public link.

use framely_api_client::ApiClient;
use framely_core::{
    Campaign, CampaignId, CompositionError, CompositionObserver, CompositionOrchestrator, Draft,
};
use std::sync::Arc;

/// What a submission left behind on the server.
#[derive(Debug)]
pub struct ComposeReport {
    pub outcome: Result<CampaignId, CompositionError>,
    /// The created campaign, when it could be loaded afterwards.
    pub campaign: Option<Campaign>,
    pub share_url: Option<String>,
}

impl ComposeReport {
    /// Id of the campaign that exists on the server, complete or not.
    pub fn campaign_id(&self) -> Option<CampaignId> {
        match &self.outcome {
            Ok(id) => Some(*id),
            Err(err) => err.campaign_id(),
        }
    }

    /// Lines to print on stdout.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match (&self.outcome, &self.campaign) {
            (Ok(_), Some(campaign)) => {
                lines.push(format!("Created campaign {}: {}", campaign.id, campaign.name))
            }
            (Ok(id), None) => lines.push(format!("Created campaign {}", id)),
            (Err(_), _) => {
                if let Some(id) = self.campaign_id() {
                    lines.push(format!("Incomplete campaign {}", id));
                }
            }
        }
        if let Some(url) = &self.share_url {
            lines.push(url.clone());
        }
        lines
    }

    pub fn into_result(self) -> Result<CampaignId, CompositionError> {
        self.outcome
    }
}

/// Submit `draft` and look up the share link of whatever campaign was created.
///
/// The lookup is best effort: a failure there never turns a successful
/// submission into an error.
pub async fn compose(
    client: Arc<ApiClient>,
    draft: &Draft,
    user_site_url: &str,
    observer: Option<Arc<dyn CompositionObserver>>,
) -> ComposeReport {
    let mut orchestrator = CompositionOrchestrator::new(client.clone());
    if let Some(observer) = observer {
        orchestrator = orchestrator.with_observer(observer);
    }

    let outcome = orchestrator.submit(draft).await;
    let mut report = ComposeReport {
        outcome,
        campaign: None,
        share_url: None,
    };

    if let Some(campaign_id) = report.campaign_id() {
        match client.get_campaign(campaign_id).await {
            Ok(campaign) => {
                report.share_url = Some(campaign.share_url(user_site_url));
                report.campaign = Some(campaign);
            }
            Err(e) => {
                tracing::warn!(%campaign_id, error = %e, "Could not load the created campaign")
            }
        }
    }

    report
}
