//! Campaign composition
//!
//! Plans and executes the dependent call chain that publishes a draft:
//! create-campaign with the first frame, then the remaining frames, then the
//! posters. Calls are issued one at a time because every follow-up needs the
//! campaign id returned by the first call.

mod orchestrator;
mod plan;
mod state;

pub use orchestrator::{CompositionObserver, CompositionOrchestrator};
pub use plan::{CompositionPlan, FollowUpCall};
pub use state::{CompositionState, CompositionStep};
