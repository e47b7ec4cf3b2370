//! YatraNav mission binary.
//!
//! Loads configuration, constructs the configured hardware backend, and runs
//! the navigation state machine until the goal is reached.

use std::path::Path;
use tracing::{error, info};
use yatra_nav::config::YatraConfig;
use yatra_nav::error::Result;
use yatra_nav::hardware::create_hardware;
use yatra_nav::mission::MissionRunner;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("yatra_nav=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = if args.len() > 1 {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        YatraConfig::load(config_path)?
    } else if Path::new("yatra.toml").exists() {
        info!("Loading configuration from yatra.toml");
        YatraConfig::load(Path::new("yatra.toml"))?
    } else {
        info!("Using default configuration");
        YatraConfig::default()
    };

    info!("YatraNav v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Grid {}x{}, start ({}, {}), goal ({}, {}), backend \"{}\"",
        config.grid.rows,
        config.grid.cols,
        config.mission.start_x,
        config.mission.start_y,
        config.mission.goal_x,
        config.mission.goal_y,
        config.hardware.backend
    );

    let (mut sensor, mut actuator) = create_hardware(&config.hardware)?;
    let mut runner = MissionRunner::new(config);

    match runner.run(sensor.as_mut(), actuator.as_mut()) {
        Ok(report) => {
            info!(
                "Mission complete: {} cycles, {} primitives, final position {}",
                report.cycles, report.primitives_issued, report.final_position
            );
            Ok(())
        }
        Err(e) => {
            error!("Mission aborted: {}", e);
            Err(e)
        }
    }
}
