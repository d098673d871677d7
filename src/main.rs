//! Headless runner: steps a simulation at a fixed rate and logs statistics.
//!
//! Usage: `trailsim [config.json] [frames]`
//!
//! Set `RUST_LOG=trailsim=debug` for structural events, `trace` for respawns.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trailsim::render::Frame;
use trailsim::{Controls, FrameClock, OrbitCamera, Simulation, SimulationConfig};

const DEFAULT_FRAMES: u64 = 600;
const FRAME_RATE: f32 = 60.0;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(%path, "{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };
    let frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_FRAMES);

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let controls = Controls::new();
    let camera = OrbitCamera::default();
    let mut clock = FrameClock::new(sim.max_frame_delta()).with_fixed_delta(Some(1.0 / FRAME_RATE));

    info!(
        particles = sim.particle_count(),
        trail_length = sim.trail_length(),
        frames,
        "running headless simulation"
    );

    for _ in 0..frames {
        sim.update(clock.tick());

        if clock.frame() % FRAME_RATE as u64 == 0 {
            let frame = Frame::capture(&sim, &controls.overlay, &camera, 4.0 / 3.0);
            let stats = sim.stats();
            info!(
                t = %format!("{:.1}s", clock.simulated()),
                particles = frame.particles.len(),
                line_vertices = frame.lines.len(),
                respawned = stats.total_respawned,
                "frame"
            );
        }
    }

    info!(total_respawned = sim.stats().total_respawned, "done");
    ExitCode::SUCCESS
}

fn load_config(path: &str) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(SimulationConfig::from_json(&json)?)
}
