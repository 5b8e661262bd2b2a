use cor_tilt::config::fit::load_config;
use cor_tilt::samples::CorTiltSnapshot;
use cor_tilt::io::write_json_file;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut samples = config.to_sample_set();
    if !samples.has_results() {
        samples.linear_regression().map_err(|e| e.to_string())?;
    }
    let snapshot = samples
        .properties_snapshot()
        .ok_or("Fit produced no results")?;
    let per_row_cors = samples
        .get_all_cors_from_regression(config.height)
        .map_err(|e| e.to_string())?;
    let tilt_deg = snapshot.tilt_angle_rad.to_degrees();

    let summary = FitSummary {
        num_points: samples.num_points(),
        height: config.height,
        tilt_deg,
        snapshot,
        per_row_cors,
    };
    write_json_file(&config.output.summary_json, &summary)?;

    println!(
        "points={} cor={:.3} gradient={:.6} tilt={:.4}°",
        summary.num_points,
        summary.snapshot.rotation_centre,
        summary.snapshot.fitted_gradient,
        summary.tilt_deg
    );
    println!(
        "Saved per-row COR table ({} rows) to {}",
        summary.height,
        config.output.summary_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: cor_tilt_fit <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FitSummary {
    num_points: usize,
    height: usize,
    tilt_deg: f64,
    snapshot: CorTiltSnapshot,
    per_row_cors: Vec<f64>,
}
