//! Native front-end for the impact animation core.
//!
//! Hosts [`impact_core::ImpactAnimator`] on a headless globe: a simulated
//! camera and scene graph stand in for the renderer, and a frame loop
//! drives the logical clock and wall-clock timers in real time.

pub mod constants;
pub mod frame;
pub mod headless;
pub mod input;
pub mod overlay;

pub use frame::{run_until_settled, step_frame, Pacing, RunSummary};
pub use headless::{HeadlessViewer, RenderedEntity};
