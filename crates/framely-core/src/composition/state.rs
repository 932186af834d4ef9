use std::fmt;

/// A step of a submission that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionStep {
    Validating,
    CreatingPrimary,
    /// Adding the frame at `position` (0-based, always ≥ 1)
    AddingPrimaryRemainder { position: usize },
    /// Adding the poster at `position` (0-based)
    AddingSecondary { position: usize },
}

impl fmt::Display for CompositionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositionStep::Validating => write!(f, "validation"),
            CompositionStep::CreatingPrimary => write!(f, "creating the campaign"),
            CompositionStep::AddingPrimaryRemainder { position } => {
                write!(f, "adding frame {}", position + 1)
            }
            CompositionStep::AddingSecondary { position } => {
                write!(f, "adding poster {}", position + 1)
            }
        }
    }
}

/// Lifecycle of one submission.
///
/// `Idle → Validating → CreatingPrimary → AddingPrimaryRemainder* →
/// AddingSecondary* → Succeeded`, with `Failed(step)` reachable from every
/// running step. `Succeeded` and `Failed` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionState {
    Idle,
    Running(CompositionStep),
    Succeeded,
    Failed(CompositionStep),
}

impl CompositionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CompositionState::Succeeded | CompositionState::Failed(_))
    }

    pub fn can_transition_to(&self, next: CompositionState) -> bool {
        use CompositionState::{Failed, Idle, Running, Succeeded};
        use CompositionStep::{AddingPrimaryRemainder, AddingSecondary, CreatingPrimary, Validating};

        match (*self, next) {
            (Idle, Running(Validating)) => true,
            (Running(Validating), Running(CreatingPrimary)) => true,
            (
                Running(CreatingPrimary) | Running(AddingPrimaryRemainder { .. }),
                Running(AddingPrimaryRemainder { .. }) | Running(AddingSecondary { .. }) | Succeeded,
            ) => true,
            (Running(AddingSecondary { .. }), Running(AddingSecondary { .. }) | Succeeded) => true,
            (Running(step), Failed(at)) => step == at,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            CompositionState::Idle,
            CompositionState::Running(CompositionStep::Validating),
            CompositionState::Running(CompositionStep::CreatingPrimary),
            CompositionState::Running(CompositionStep::AddingPrimaryRemainder { position: 1 }),
            CompositionState::Running(CompositionStep::AddingPrimaryRemainder { position: 2 }),
            CompositionState::Running(CompositionStep::AddingSecondary { position: 0 }),
            CompositionState::Succeeded,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_no_way_back_or_out_of_order() {
        let creating = CompositionState::Running(CompositionStep::CreatingPrimary);
        let poster = CompositionState::Running(CompositionStep::AddingSecondary { position: 0 });
        let frame =
            CompositionState::Running(CompositionStep::AddingPrimaryRemainder { position: 1 });

        assert!(!creating.can_transition_to(CompositionState::Idle));
        assert!(!poster.can_transition_to(frame));
        assert!(!CompositionState::Idle.can_transition_to(creating));
        assert!(!CompositionState::Running(CompositionStep::Validating)
            .can_transition_to(CompositionState::Succeeded));
        assert!(!CompositionState::Succeeded.can_transition_to(CompositionState::Idle));
    }

    #[test]
    fn test_failure_is_absorbing_and_tied_to_step() {
        let creating = CompositionState::Running(CompositionStep::CreatingPrimary);
        let failed = CompositionState::Failed(CompositionStep::CreatingPrimary);

        assert!(creating.can_transition_to(failed));
        assert!(!creating.can_transition_to(CompositionState::Failed(CompositionStep::Validating)));
        assert!(failed.is_terminal());
        assert!(!failed.can_transition_to(CompositionState::Idle));
        assert!(!failed.can_transition_to(creating));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(
            CompositionStep::AddingPrimaryRemainder { position: 2 }.to_string(),
            "adding frame 3"
        );
        assert_eq!(
            CompositionStep::AddingSecondary { position: 0 }.to_string(),
            "adding poster 1"
        );
    }
}
