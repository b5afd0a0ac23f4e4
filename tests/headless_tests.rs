// Native front-end: headless viewer, frame loop, overlay text and CLI input.

mod common;

use common::make_results;
use impact_core::*;
use impact_viz::constants::HOME_VIEW;
use impact_viz::{input, overlay, run_until_settled, step_frame, HeadlessViewer, Pacing};
use std::time::Duration;

const DT: Duration = Duration::from_millis(16);

#[test]
fn fixed_pacing_runs_the_whole_sequence() {
    let mut viewer = HeadlessViewer::new(HOME_VIEW);
    let mut animator = ImpactAnimator::new(AnimationConfig::default(), 42);
    animator.select_site(-70.6, -33.4, &mut viewer).unwrap();
    animator
        .animate_selected(&make_results(), &mut viewer)
        .unwrap();

    let summary = run_until_settled(
        &mut animator,
        &mut viewer,
        Pacing::Fixed(DT),
        Duration::from_secs(30),
    )
    .unwrap();
    assert_eq!(summary.phase, Some(SessionPhase::Settled));
    // 2 s approach + 10 s fall + shake + 1.2 s settle
    assert!(summary.elapsed > Duration::from_secs(13));
    assert!(summary.elapsed < Duration::from_secs(15));

    let camera = viewer.camera_geo();
    assert!((camera.altitude - 120_000.0).abs() < 1.0, "camera at {camera:?}");
    assert!((camera.longitude + 70.6).abs() < 1e-6);
    assert!((camera.latitude + 33.4).abs() < 1e-6);
    assert!(!viewer.is_locked());
    assert!(!viewer.is_flying());

    // marker, body and three zones; the flash is gone
    assert_eq!(viewer.entity_count(), 5);
    assert_eq!(viewer.count_labelled("Impact Flash"), 0);
    let body = animator.session().unwrap().body().unwrap();
    assert_eq!(viewer.entity(body).unwrap().tint, Some(constants::RED));
}

#[test]
fn running_without_a_session_is_an_error() {
    let mut viewer = HeadlessViewer::new(HOME_VIEW);
    let mut animator = ImpactAnimator::new(AnimationConfig::default(), 42);
    let limit = Duration::from_secs(1);
    let result = run_until_settled(&mut animator, &mut viewer, Pacing::Fixed(DT), limit);
    assert!(result.is_err());
}

#[test]
fn arrival_is_delivered_before_the_first_tick() {
    let mut viewer = HeadlessViewer::new(HOME_VIEW);
    let mut animator = ImpactAnimator::new(AnimationConfig::default(), 42);
    animator
        .animate_impact(10.0, 45.0, &make_results(), &mut viewer)
        .unwrap();

    step_frame(&mut animator, &mut viewer, Duration::from_millis(1_000));
    assert_eq!(animator.phase(), Some(SessionPhase::Approaching));
    assert!(viewer.is_flying());

    step_frame(&mut animator, &mut viewer, Duration::from_millis(1_000));
    assert_eq!(animator.phase(), Some(SessionPhase::Tracking));
    assert!(viewer.is_locked(), "first tick should lock onto the body");
    assert_eq!(animator.clock().current(), 1.0);
}

#[test]
fn fly_to_moves_the_camera_and_reports_completion() {
    let mut viewer = HeadlessViewer::new(HOME_VIEW);
    let target = GeoPoint::new(2.35, 48.85, 300_000.0);
    let flight = viewer
        .fly_to(FlyTo {
            destination: target,
            orientation: Orientation::from_degrees(0.0, -30.0, 0.0),
            duration: Duration::from_secs(2),
        })
        .unwrap();

    assert_eq!(viewer.step(Duration::from_secs(1)), None);
    assert!(viewer.is_flying());
    assert_eq!(viewer.step(Duration::from_secs(1)), Some(flight));
    assert!(!viewer.is_flying());
    assert!(viewer.camera_position().distance(target.to_cartesian()) < 1e-6);
    assert!((viewer.camera_orientation().pitch - (-30f64).to_radians()).abs() < 1e-12);
    assert_eq!(viewer.step(Duration::from_secs(1)), None);
}

#[test]
fn viewer_rejects_bad_requests() {
    let mut viewer = HeadlessViewer::new(HOME_VIEW);
    let target = GeoPoint::on_surface(0.0, 0.0).to_cartesian();
    assert!(viewer.look_at(target, glam::DVec3::ZERO).is_err());
    assert!(viewer.move_entity(EntityId(77), target).is_err());
    assert_eq!(viewer.remove_entity(EntityId(77)), Ok(false));
    assert!(viewer
        .fly_to(FlyTo {
            destination: GeoPoint::new(f64::NAN, 0.0, 0.0),
            orientation: Orientation::default(),
            duration: Duration::from_secs(1),
        })
        .is_err());
}

#[test]
fn status_lines() {
    assert_eq!(overlay::failure_status(&ImpactError::NoSiteSelected), overlay::NO_SITE);
    let err = ImpactError::InvalidSite {
        lon: f64::NAN,
        lat: 0.0,
    };
    assert!(overlay::failure_status(&err).starts_with("Error: "));
    assert_eq!(overlay::CALCULATING, "Calculating simulation...");
    assert_eq!(overlay::COMPLETED, "Simulation completed.");
}

#[test]
fn thousands_separator() {
    assert_eq!(overlay::format_thousands(0), "0");
    assert_eq!(overlay::format_thousands(999), "999");
    assert_eq!(overlay::format_thousands(1_000), "1,000");
    assert_eq!(overlay::format_thousands(1_234_567), "1,234,567");
}

#[test]
fn results_table_lists_every_field() {
    let table = overlay::render_table(&make_results());
    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("Diameter (m)") && lines[0].ends_with("800.00"));
    assert!(lines[1].ends_with("50.00"));
    assert!(lines[6].starts_with("Population affected") && lines[6].ends_with("1,234,567"));
}

#[test]
fn cli_arguments() {
    let args = |v: &[&str]| input::parse_args(v.iter().map(|s| s.to_string()));

    let parsed = args(&["-70.6", "-33.4"]).unwrap();
    assert_eq!(parsed.longitude, -70.6);
    assert_eq!(parsed.latitude, -33.4);
    assert_eq!(parsed.results_path, None);
    assert!(!parsed.fast);

    let parsed = args(&["--fast", "10", "45", "run.ron", "--seed", "9"]).unwrap();
    assert!(parsed.fast);
    assert_eq!(parsed.seed, 9);
    assert_eq!(parsed.results_path, Some(std::path::PathBuf::from("run.ron")));

    assert!(args(&["10"]).is_err());
    assert!(args(&["10", "north"]).is_err());
    assert!(args(&["10", "45", "--seed"]).is_err());
    assert!(args(&["1", "2", "3", "4"]).is_err());
}

#[test]
fn results_record_parses_from_ron() {
    let text = r#"(
        diameter_m: 800.0,
        crater_diameter_km: 50.0,
        shockwave_radius_km: 100.0,
        thermal_radius_km: 400.0,
        earthquake_magnitude: 7.5,
        energy_megatons: 21600.0,
        population_density: 1234567,
    )"#;
    assert_eq!(input::parse_results(text).unwrap(), make_results());
    assert!(input::parse_results("(diameter_m: \"big\")").is_err());
}
