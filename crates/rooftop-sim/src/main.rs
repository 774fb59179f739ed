mod session;

use tracing_subscriber::EnvFilter;

use rooftop_runner::config::RunnerConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = RunnerConfig::load();
    let mut max_secs = 60.0_f32;

    for arg in std::env::args().skip(1) {
        if let Some(seed) = arg.strip_prefix("--seed=").and_then(|v| v.parse::<u64>().ok()) {
            config.seed = seed;
        } else if let Some(secs) = arg
            .strip_prefix("--max-secs=")
            .and_then(|v| v.parse::<f32>().ok())
        {
            max_secs = secs;
        } else if let Some(chance) = arg
            .strip_prefix("--rails=")
            .and_then(|v| v.parse::<f64>().ok())
        {
            config.terrain.rail_chance = chance.clamp(0.0, 1.0);
        } else {
            tracing::warn!("Ignoring unrecognized argument {arg}");
        }
    }

    tracing::info!(
        seed = config.seed,
        rails = config.terrain.rail_chance,
        "Starting headless run ({max_secs}s limit)"
    );

    let summary = session::run_headless(config, max_secs);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("Failed to serialize run summary: {e}"),
    }
}
