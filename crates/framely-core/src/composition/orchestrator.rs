use std::sync::Arc;

use crate::composition::{CompositionPlan, CompositionState, CompositionStep};
use crate::draft::{BatchKind, Draft};
use crate::error::CompositionError;
use crate::models::CampaignId;
use crate::resource::ResourceClient;

/// Receives every state transition of a submission, e.g. to render progress.
pub trait CompositionObserver: Send + Sync {
    fn on_transition(&self, state: CompositionState);
}

/// Turns a [`Draft`] into a campaign through a strictly sequential chain of
/// resource calls.
///
/// The orchestrator holds no de-duplication guard. Callers must not start a
/// second `submit` for the same draft while one is still pending (the console
/// awaits each submission to completion before accepting new input).
pub struct CompositionOrchestrator {
    client: Arc<dyn ResourceClient>,
    observer: Option<Arc<dyn CompositionObserver>>,
}

impl CompositionOrchestrator {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn CompositionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Submit a draft.
    ///
    /// 1. Validate the draft; no call is made if it is not submittable.
    /// 2. Create the campaign bound to the first frame.
    /// 3. Add the remaining frames in order, none of them default.
    /// 4. Add the posters in order, the first one default.
    ///
    /// Stops at the first failure. Nothing is retried or rolled back; a failure
    /// after step 2 is reported as [`CompositionError::PartialComposition`]
    /// carrying the id of the incomplete campaign.
    #[tracing::instrument(skip_all, fields(variant = ?draft.variant()))]
    pub async fn submit(&self, draft: &Draft) -> Result<CampaignId, CompositionError> {
        let mut tracker = StateTracker::new(self.observer.as_deref());

        tracker.advance(CompositionState::Running(CompositionStep::Validating));
        let plan = match CompositionPlan::from_draft(draft) {
            Ok(plan) => plan,
            Err(err) => {
                tracker.fail();
                tracing::debug!(error = %err, "Draft is not submittable");
                return Err(err.into());
            }
        };

        tracker.advance(CompositionState::Running(CompositionStep::CreatingPrimary));
        let campaign_id = match self
            .client
            .create_campaign(plan.campaign_name, plan.primary)
            .await
        {
            Ok(id) => id,
            Err(err) => {
                tracker.fail();
                tracing::warn!(error = %err, "Campaign creation failed");
                return Err(CompositionError::from_primary(err));
            }
        };
        tracing::info!(%campaign_id, calls = plan.call_count(), "Campaign created");

        for call in &plan.follow_ups {
            let step = call.step();
            tracker.advance(CompositionState::Running(step));

            let result = match call.kind {
                BatchKind::Frame => {
                    self.client
                        .add_frame(campaign_id, &call.name, call.file, call.is_default)
                        .await
                }
                BatchKind::Poster => {
                    self.client
                        .add_poster(campaign_id, &call.name, call.file, call.is_default)
                        .await
                }
            };

            if let Err(source) = result {
                tracker.fail();
                tracing::warn!(
                    %campaign_id,
                    failed_at = %step,
                    error = %source,
                    "Campaign left incomplete"
                );
                return Err(CompositionError::PartialComposition {
                    campaign_id,
                    failed_at: step,
                    source,
                });
            }

            tracing::debug!(
                %campaign_id,
                kind = %call.kind,
                position = call.position,
                is_default = call.is_default,
                "Attached file"
            );
        }

        tracker.advance(CompositionState::Succeeded);
        tracing::info!(%campaign_id, "Campaign composition complete");
        Ok(campaign_id)
    }
}

struct StateTracker<'a> {
    state: CompositionState,
    observer: Option<&'a dyn CompositionObserver>,
}

impl<'a> StateTracker<'a> {
    fn new(observer: Option<&'a dyn CompositionObserver>) -> Self {
        Self {
            state: CompositionState::Idle,
            observer,
        }
    }

    fn advance(&mut self, next: CompositionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
        if let Some(observer) = self.observer {
            observer.on_transition(next);
        }
    }

    fn fail(&mut self) {
        if let CompositionState::Running(step) = self.state {
            self.advance(CompositionState::Failed(step));
        }
    }
}
