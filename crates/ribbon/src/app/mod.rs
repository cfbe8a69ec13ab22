mod blade;
mod configuration;
mod init;

use cap_std::fs_utf8::Dir;
use miette::Result;
use ribbon_core::trace::RibbonTracing;
use ribbon_render_manager::trail_channel;
use ribbon_trail_manager::TrailManager;
use ribbon_trail_models::TrailState;
use tracing::{error, info, warn};

use blade::SwingingBlade;
use configuration::RibbonConfiguration;
use init::get_ribbon_dir;

/// geometry frames queued for the renderer before later ones are dropped
const GEOMETRY_BACKLOG: usize = 4;
const BLADE_TRAIL: u64 = 1;

pub fn start_ribbon() {
    let ribbon_dir = match get_ribbon_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("failed to create ribbon dir: {e:?}");
            return;
        }
    };
    let log_file_flush_guard = match RibbonTracing::install_tracing(&ribbon_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("failed to install tracing: {e:?}");
            return;
        }
    };

    if let Err(e) = run(&ribbon_dir) {
        error!(?e, "ribbon simulation failed");
    }
    std::mem::drop(log_file_flush_guard);
}

/// Swings a blade for the configured duration with a trail on its two edges, then freezes the
/// trail until it fades out.
fn run(ribbon_dir: &Dir) -> Result<()> {
    let configuration = RibbonConfiguration::load_or_create(ribbon_dir)?;
    let simulation = &configuration.simulation;
    info!(?configuration, "configuration loaded");

    let (sender, mut renderer) = trail_channel(GEOMETRY_BACKLOG);
    let surface = sender.surface(BLADE_TRAIL);
    let mut blade = SwingingBlade::new(simulation);
    let mut trail = TrailManager::initialize(configuration.trail.clone(), 2, surface)?;

    let frame_time = 1.0 / simulation.frame_rate as f64;
    let mut latest_time = 0.0;
    trail.reset(latest_time, &blade.anchors())?;

    for frame in 1..=simulation.frame_count() {
        latest_time = frame as f64 * frame_time;
        blade.advance(frame_time as f32);
        if let Err(e) = trail.tick(latest_time, &blade.anchors()) {
            warn!(?e, frame, "trail update skipped");
        }
        renderer.receive_all();
        renderer.flush();
        if frame % simulation.report_every == 0 {
            info!(
                frame,
                latest_time,
                tip_length = trail.grid().rail_length(1),
                triangles = renderer.triangle_count(),
                vertex_bytes = renderer.vertex_bytes(),
                "frame rendered"
            );
        }
    }

    let deadline = latest_time + configuration.trail.freeze_duration as f64;
    trail.freeze(deadline);
    let mut frozen_frames = 0;
    while trail.state() != TrailState::Inactive {
        latest_time += frame_time;
        blade.advance(frame_time as f32);
        if let Err(e) = trail.tick(latest_time, &blade.anchors()) {
            warn!(?e, "frozen trail update skipped");
        }
        renderer.receive_all();
        renderer.flush();
        frozen_frames += 1;
    }
    info!(
        frozen_frames,
        drawable = renderer.drawable_trails().count(),
        "trail faded out"
    );

    let surface = trail.teardown();
    renderer.receive_all();
    renderer.flush();
    info!(
        trail = surface.trail(),
        remaining = renderer.trails.len(),
        "trail released"
    );
    Ok(())
}
