use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kds")]
#[command(about = "Kitchen display core CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a seeded kitchen simulation on a logical clock and print its events
    Simulate {
        /// Simulated seconds to run
        #[arg(long)]
        ticks: u64,

        /// Layered config paths in merge order (base -> overrides)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Override sim.seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print one JSON object per event instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Fail on config keys nothing reads (default: warn)
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Evaluate an order countdown at a point in time
    Countdown {
        /// Preparation budget in seconds
        #[arg(long)]
        due: i64,

        /// Creation time (logical seconds)
        #[arg(long)]
        created: i64,

        /// Evaluation time (logical seconds)
        #[arg(long)]
        now: i64,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Simulate {
            ticks,
            config_paths,
            seed,
            json,
            strict,
        } => commands::simulate::run(commands::simulate::SimulateArgs {
            ticks,
            config_paths,
            seed,
            json,
            strict,
        }),

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = kds_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
            Ok(())
        }

        Commands::Countdown { due, created, now } => {
            let cd = commands::countdown(due, created, now)?;
            println!("remaining_secs={}", cd.remaining_secs);
            println!("display={}", cd.display);
            println!("overdue={}", cd.overdue);
            Ok(())
        }
    }
}

// Logs go to stderr so stdout stays parseable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
