use anyhow::Context;
use impact_core::{AnimationConfig, ImpactAnimator};
use impact_viz::constants::{FIXED_FRAME_DT, HOME_VIEW, MAX_SEQUENCE_TIME};
use impact_viz::{input, overlay, run_until_settled, HeadlessViewer, Pacing};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("impact-viz starting");

    let args = input::parse_args(std::env::args().skip(1))?;
    let results = match &args.results_path {
        Some(path) => input::load_results(path)?,
        None => input::demo_results(),
    };

    let mut viewer = HeadlessViewer::new(HOME_VIEW);
    let mut animator = ImpactAnimator::new(AnimationConfig::default(), args.seed);

    let status = animator
        .select_site(args.longitude, args.latitude, &mut viewer)
        .context("selecting impact site")?;
    log::info!("{status}");
    log::info!("{}", overlay::CALCULATING);

    if let Err(e) = animator.animate_selected(&results, &mut viewer) {
        log::error!("{}", overlay::failure_status(&e));
        return Err(e.into());
    }
    println!("{}", overlay::render_table(&results));

    let pacing = if args.fast {
        Pacing::Fixed(FIXED_FRAME_DT)
    } else {
        Pacing::RealTime
    };
    let summary = run_until_settled(&mut animator, &mut viewer, pacing, MAX_SEQUENCE_TIME)?;
    let camera = viewer.camera_geo();
    log::info!(
        "{} ({} frames, {:.2}s); camera over ({:.2}, {:.2}) at {:.0} m",
        overlay::COMPLETED,
        summary.frames,
        summary.elapsed.as_secs_f64(),
        camera.latitude,
        camera.longitude,
        camera.altitude
    );
    Ok(())
}
