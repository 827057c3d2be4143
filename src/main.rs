use clap::Parser;
use foundation::{CONFIG_FILE, Foundation, load_config};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use tectonics::prelude::*;

/// Generate a plate foundation and report boundary coverage
#[derive(Parser, Debug)]
#[command(name = "foundation", version, about)]
struct Cli {
    /// Map width in tiles
    #[arg(long, default_value_t = 84)]
    width: u32,

    /// Map height in tiles
    #[arg(long, default_value_t = 54)]
    height: u32,

    /// Plate config file (TOML)
    #[arg(long, value_name = "FILE", default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Seed for the host random stream
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective config to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = cli.write_config {
        return match config.save_to_file(&path) {
            Ok(()) => {
                info!("wrote config to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = EngineRng::seed_from_u64(seed);
    info!("host seed {seed}");

    let mut foundation = Foundation::new();
    if let Err(err) = foundation.init(cli.width, cli.height, &config.plates, &mut rng) {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    report(&foundation);
    ExitCode::SUCCESS
}

fn report(foundation: &Foundation) {
    let (Some(coverage), Some(plates)) = (foundation.coverage(), foundation.plates()) else {
        return;
    };

    info!(
        "{} plates on {}x{} (attempt {})",
        plates.len(),
        foundation.width(),
        foundation.height(),
        foundation.attempt_index().unwrap_or_default()
    );
    info!(
        "boundary tiles {} ({:.1}%), influenced {} ({:.1}%)",
        coverage.boundary_tiles,
        coverage.boundary_tile_share * 100.0,
        coverage.influenced_tiles,
        coverage.boundary_influence_share * 100.0
    );
    info!(
        "closeness avg {:.1}, influenced avg {:.1}, max {}",
        coverage.avg_closeness, coverage.avg_influence_closeness, coverage.max_closeness
    );

    if let Some(types) = foundation.boundary_type() {
        let count = |t: BoundaryType| types.iter().filter(|&&b| b == t).count();
        info!(
            "boundary types: convergent {}, divergent {}, transform {}",
            count(BoundaryType::Convergent),
            count(BoundaryType::Divergent),
            count(BoundaryType::Transform)
        );
    }

    for plate in plates {
        info!(
            "plate {:>2}: seed ({:.1}, {:.1}) move ({:+.2}, {:+.2}) rot {:+.1}°",
            plate.id,
            plate.seed.x,
            plate.seed.y,
            plate.translation.x,
            plate.translation.y,
            plate.rotation_deg
        );
    }

    if let Some(seed) = foundation.plate_seed() {
        info!("plate seed {:?} ({:?})", seed.seed, seed.seed_mode);
    }
}
