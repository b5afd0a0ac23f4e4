use crate::constants::FRAME_INTERVAL;
use crate::headless::HeadlessViewer;
use impact_core::{ImpactAnimator, Scheduler, SessionPhase};
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep between frames and feed measured deltas.
    RealTime,
    /// Feed a constant delta without sleeping.
    Fixed(Duration),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
    pub phase: Option<SessionPhase>,
}

/// One rendered frame: camera flights first, so an arrival is processed
/// before the first clock tick, then timers and the logical clock.
pub fn step_frame<S: Scheduler>(
    animator: &mut ImpactAnimator<S>,
    viewer: &mut HeadlessViewer,
    dt: Duration,
) {
    if let Some(flight) = viewer.step(dt) {
        animator.flight_completed(flight);
    }
    animator.frame(dt, viewer);
}

/// Run frames until the active session is settled and the final flight landed.
pub fn run_until_settled<S: Scheduler>(
    animator: &mut ImpactAnimator<S>,
    viewer: &mut HeadlessViewer,
    pacing: Pacing,
    limit: Duration,
) -> anyhow::Result<RunSummary> {
    if animator.session().is_none() {
        anyhow::bail!("no animation session to run");
    }
    let mut last = Instant::now();
    let mut frames = 0u64;
    let mut elapsed = Duration::ZERO;
    let mut phase = animator.phase();

    while !(animator.is_settled() && !viewer.is_flying()) {
        if elapsed > limit {
            anyhow::bail!(
                "sequence did not settle within {:?} (phase {:?})",
                limit,
                animator.phase()
            );
        }
        let dt = match pacing {
            Pacing::RealTime => {
                std::thread::sleep(FRAME_INTERVAL);
                let now = Instant::now();
                let dt = now.duration_since(last);
                last = now;
                dt
            }
            Pacing::Fixed(dt) => dt,
        };
        step_frame(animator, viewer, dt);
        frames += 1;
        elapsed += dt;

        let current = animator.phase();
        if current != phase {
            log::info!("[frame {frames}] {:?} -> {:?}", phase, current);
            phase = current;
        }
    }

    Ok(RunSummary {
        frames,
        elapsed,
        phase,
    })
}
