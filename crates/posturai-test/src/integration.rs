//! End-to-end scenarios through the full tick loop
//!
//! - Rule scenarios: clean, violating and low-confidence frames
//! - Session lifecycle: pause, stop, restart, history
//! - Noisy streams: smoothing and side fallback under jitter

use posturai_analysis::FrameResult;
use posturai_runtime::{SessionController, SkipReason, TickOutcome};

use crate::{RecordingSink, ScriptedEstimator, ScriptedSource};

/// Tick `session` `n` times, letting the scripted collaborators advance
/// between ticks the way a real camera and model would.
pub fn drive(
    session: &mut SessionController,
    estimator: &mut ScriptedEstimator,
    source: &mut ScriptedSource,
    sink: &mut RecordingSink,
    n: usize,
) -> Vec<TickOutcome> {
    (0..n)
        .map(|_| {
            let outcome = session.tick(estimator, source, sink);
            match outcome {
                TickOutcome::Skipped(SkipReason::SourceNotReady) => source.skip_buffering(),
                TickOutcome::Skipped(SkipReason::EstimatorNotReady) => estimator.warm(),
                _ => {}
            }
            outcome
        })
        .collect()
}

/// The analysed results among `outcomes`, in order
pub fn analyzed(outcomes: &[TickOutcome]) -> Vec<&FrameResult> {
    outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            TickOutcome::Analyzed(result) => Some(result),
            _ => None,
        })
        .collect()
}
