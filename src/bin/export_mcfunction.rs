//! Convert a saved project into a `.mcfunction` file of fill commands.
//!
//! Usage:
//!   cargo run --release --bin export_mcfunction -- --project castle.json
//!   cargo run --release --bin export_mcfunction -- --project castle.json --out castle.mcfunction --offset 100,64,-20

use std::path::PathBuf;

use blockplan::core::logging;
use blockplan::core::types::IVec3;
use blockplan::voxel::BlockPos;
use blockplan::Project;

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let project_path = args.iter()
        .position(|a| a == "--project")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .expect("Usage: export_mcfunction --project <file.json> [--out <file>] [--offset x,y,z]");

    let out_path = args.iter()
        .position(|a| a == "--out")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| project_path.with_extension("mcfunction"));

    let offset = args.iter()
        .position(|a| a == "--offset")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.parse::<BlockPos>().expect("--offset must be x,y,z").to_ivec3())
        .unwrap_or(IVec3::ZERO);

    let mut project = Project::default();
    if let Err(e) = project.load_from_file_sync(&project_path) {
        log::error!("Failed to load {}: {}", project_path.display(), e);
        std::process::exit(1);
    }

    let regions = project.optimize_regions();
    log::info!(
        "{} voxels compacted into {} regions",
        project.store().len(),
        regions.len()
    );

    let text = blockplan::export::to_mcfunction(&regions, offset);
    if let Err(e) = std::fs::write(&out_path, text) {
        log::error!("Failed to write {}: {}", out_path.display(), e);
        std::process::exit(1);
    }
    log::info!("Wrote {}", out_path.display());
}
