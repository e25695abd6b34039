//! Real-time loop around [`Scheduler::step`].

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::scheduler::Scheduler;
use crate::stats::ActivityStats;

/// Step the scheduler until `cancel` fires or `max_iterations` have run.
///
/// Cancellation is checked before every iteration and raced against every
/// pacing sleep. A failed iteration is logged, counted, and followed by an
/// idle-class wait. No sleep follows the final bounded iteration.
pub async fn run(
    scheduler: &mut Scheduler,
    cancel: CancellationToken,
    max_iterations: Option<u64>,
) -> ActivityStats {
    info!(
        participants = scheduler.participants().len(),
        max_iterations = ?max_iterations,
        "crowd started"
    );

    let mut iterations: u64 = 0;
    loop {
        if cancel.is_cancelled() {
            break;
        }
        if max_iterations.is_some_and(|max| iterations >= max) {
            break;
        }
        iterations += 1;

        let delay = match scheduler.step().await {
            Ok(outcome) => {
                debug!(
                    iteration = iterations,
                    action = %outcome.action,
                    pace = outcome.pace.as_str(),
                    "iteration complete"
                );
                outcome.delay
            }
            Err(e) => {
                warn!(
                    iteration = iterations,
                    error = %e,
                    category = e.category(),
                    transient = e.is_transient(),
                    "iteration failed, continuing"
                );
                scheduler.idle_delay()
            }
        };

        if max_iterations.is_some_and(|max| iterations >= max) {
            break;
        }

        debug!(delay_secs = delay.as_secs_f64(), "pacing");
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    let stats = scheduler.stats();
    info!(
        iterations = stats.iterations,
        asks = stats.asks,
        answers = stats.answers,
        votes = stats.votes,
        idles = stats.idles,
        skipped = stats.skipped,
        failed = stats.failed,
        questions_in_memory = scheduler.memory().questions().len(),
        "crowd stopped"
    );
    stats
}
