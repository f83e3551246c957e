use dotenv::dotenv;
use packhunt::config::{RunConfig, SweepKind};
use packhunt::episode::{EpisodeRunner, EvaluationMetrics, sweep_comm_modes, sweep_k_sync};
use packhunt::infra::{CaptureLog, CompositeObserver, DefaultObserver, EpisodeObserver};
use packhunt::sim::GridWorld;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("packhunt=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let config = RunConfig::from_env()?;
    tracing::info!(
        "Grid {}x{}, {} predators, {} prey, mode={} k={}",
        config.grid.width,
        config.grid.height,
        config.grid.num_predators,
        config.grid.num_prey,
        config.episode.comm_mode,
        config.episode.k_sync
    );

    let sim = GridWorld::new(config.grid.clone())?;

    match config.sweep {
        Some(SweepKind::KSync) => {
            sweep_k_sync(
                || sim.clone(),
                config.episode,
                &config.sweep_k,
                config.episodes,
                config.seed,
            )?;
        }
        Some(SweepKind::Modes) => {
            sweep_comm_modes(|| sim.clone(), config.episode, config.episodes, config.seed)?;
        }
        None => {
            let observers: Vec<Box<dyn EpisodeObserver>> = vec![
                Box::new(DefaultObserver::new(config.episode.debug)),
                Box::new(CaptureLog::new()),
            ];
            let observer = CompositeObserver::new(observers);
            let mut runner = EpisodeRunner::new(sim, observer, config.episode);
            let mut metrics = EvaluationMetrics::new();
            for episode in 0..config.episodes {
                let outcome = runner.run(config.seed.wrapping_add(episode as u64))?;
                metrics.record_episode(&outcome);
            }
            metrics.print_summary(config.episode.comm_mode.as_str());
        }
    }

    Ok(())
}
