use framely_core::{CompositionObserver, CompositionState, CompositionStep};

/// Prints one line per submission step to stderr.
#[derive(Debug, Default)]
pub struct ProgressPrinter;

/// Progress line for a state, if it warrants one.
pub fn progress_line(state: CompositionState) -> Option<String> {
    match state {
        CompositionState::Idle
        | CompositionState::Running(CompositionStep::Validating)
        | CompositionState::Failed(CompositionStep::Validating) => None,
        CompositionState::Running(step) => Some(format!("{}...", capitalize(&step.to_string()))),
        CompositionState::Succeeded => Some("Done.".to_string()),
        CompositionState::Failed(step) => Some(format!("Failed while {}.", step)),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl CompositionObserver for ProgressPrinter {
    fn on_transition(&self, state: CompositionState) {
        if let Some(line) = progress_line(state) {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_lines() {
        assert_eq!(
            progress_line(CompositionState::Running(CompositionStep::CreatingPrimary)).as_deref(),
            Some("Creating the campaign...")
        );
        assert_eq!(
            progress_line(CompositionState::Running(
                CompositionStep::AddingPrimaryRemainder { position: 1 }
            ))
            .as_deref(),
            Some("Adding frame 2...")
        );
        assert_eq!(
            progress_line(CompositionState::Failed(CompositionStep::AddingSecondary {
                position: 0
            }))
            .as_deref(),
            Some("Failed while adding poster 1.")
        );
        assert_eq!(
            progress_line(CompositionState::Running(CompositionStep::Validating)),
            None
        );
    }
}
