use clap::Parser;
use enaction_core::EnactionConfig;
use enaction_reasoning::Agent;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod world;

use world::GridWorld;

#[derive(Parser, Debug)]
#[command(name = "enaction", author, version, about, long_about = None)]
struct Args {
    /// Path to the agent config file
    #[arg(short, long, default_value = "enaction.toml")]
    config: PathBuf,

    /// Ticks to run before stopping; 0 runs until Ctrl-C.
    /// The intention in progress is completed before the agent stops.
    #[arg(short, long, default_value_t = 200)]
    ticks: u64,

    /// Seed for the decision cycle's random tie-break
    #[arg(short, long)]
    seed: Option<u64>,

    /// Delay between ticks, in milliseconds
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// Emit one JSON trace per tick (and JSON logs)
    #[arg(long)]
    json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.json);

    let mut config = EnactionConfig::load_or_default(&args.config);
    config.apply_env_overrides();
    if let Some(seed) = args.seed {
        config.decision.seed = Some(seed);
    }
    info!("Starting agent with seed {:?}", config.decision.seed);

    let mut agent = Agent::new(config);
    for spec in world::primitives() {
        agent.add_primitive(spec)?;
    }
    let mut world = GridWorld::new();

    let mut interval = tokio::time::interval(Duration::from_millis(args.interval_ms.max(1)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let report = agent.step(&mut world)?;
                if report.stopped {
                    break;
                }
                if args.json {
                    println!("{}", agent.trace(&report));
                } else {
                    let label = |id| agent.repository().act(id).label().to_string();
                    println!(
                        "{:>5} {:<24} {:<5} {:>5} {}",
                        agent.ticks(),
                        report.enacted.map(label).unwrap_or_default(),
                        agent.observation().stimuli,
                        agent.observation().satisfaction,
                        agent.layout()
                    );
                }
                if args.ticks > 0 && agent.ticks() >= args.ticks {
                    agent.request_stop();
                }
            }
            _ = &mut ctrl_c, if !interrupted => {
                info!("Interrupted, stopping at the next decision");
                interrupted = true;
                agent.request_stop();
            }
        }
    }

    info!(
        "Stopped after {} ticks: {} schemas, {} places, {} fish eaten",
        agent.ticks(),
        agent.repository().schema_count(),
        agent.places().len(),
        world.eaten()
    );
    Ok(())
}
