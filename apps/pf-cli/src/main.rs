use clap::{Parser, Subcommand, ValueEnum};
use pf_app::{
    AppConfig, AppError, AppResult, load_config, run_ivp_case, run_network_case, run_rlc_case,
    write_ivp_csv, write_rlc_csv,
};
use pf_hydraulics::FrictionModel;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PipeFlow CLI - ODE cases and a static pipe network", long_about = None)]
struct Cli {
    /// YAML file with `ivp`, `rlc` and `network` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the scalar IVP and compare with its exact solution
    Ivp {
        /// Output CSV file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Simulate the series RLC circuit
    Rlc {
        /// Number of evenly spaced samples
        #[arg(long)]
        points: Option<usize>,
        /// Output CSV file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate the pipe network with placeholder flows
    Network {
        /// Seed for the placeholder flows
        #[arg(long)]
        seed: Option<u64>,
        /// Layout file (.yaml, .yml or .json)
        #[arg(long)]
        layout: Option<PathBuf>,
        /// Turbulent friction factor model
        #[arg(long, value_enum)]
        friction: Option<FrictionArg>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FrictionArg {
    Fixed,
    Colebrook,
}

impl From<FrictionArg> for FrictionModel {
    fn from(arg: FrictionArg) -> Self {
        match arg {
            FrictionArg::Fixed => FrictionModel::default(),
            FrictionArg::Colebrook => FrictionModel::colebrook(),
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    debug!(config = ?cli.config, "Loaded configuration");

    match cli.command {
        Commands::Ivp { output } => cmd_ivp(config, output.as_deref()),
        Commands::Rlc { points, output } => cmd_rlc(config, points, output.as_deref()),
        Commands::Network {
            seed,
            layout,
            friction,
            json,
        } => cmd_network(config, seed, layout, friction, json),
    }
}

fn cmd_ivp(config: AppConfig, output: Option<&Path>) -> AppResult<()> {
    let comparison = run_ivp_case(&config.ivp)?;
    print!("{}", comparison);

    if let Some(path) = output {
        write_ivp_csv(path, &comparison)?;
        println!(
            "✓ Exported {} rows to {}",
            comparison.rows.len(),
            path.display()
        );
    }
    Ok(())
}

fn cmd_rlc(mut config: AppConfig, points: Option<usize>, output: Option<&Path>) -> AppResult<()> {
    if let Some(points) = points {
        config.rlc.points = points;
    }
    let series = run_rlc_case(&config.rlc)?;
    print!("{}", series);

    if let Some(path) = output {
        write_rlc_csv(path, &series)?;
        println!(
            "✓ Exported {} data points to {}",
            series.t.len(),
            path.display()
        );
    }
    Ok(())
}

fn cmd_network(
    mut config: AppConfig,
    seed: Option<u64>,
    layout: Option<PathBuf>,
    friction: Option<FrictionArg>,
    json: bool,
) -> AppResult<()> {
    if seed.is_some() {
        config.network.seed = seed;
    }
    if layout.is_some() {
        config.network.layout = layout;
    }
    if let Some(friction) = friction {
        config.network.friction = friction.into();
    }

    let report = run_network_case(&config.network)?;
    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Serialize(e.to_string()))?;
        println!("{}", text);
    } else {
        print!("{}", report);
    }
    Ok(())
}
