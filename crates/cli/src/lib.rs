//! CLI for ceph-bench.
//!
//! Two subcommands: `deploy` brings up a Ceph benchmarking model,
//! `run` fires a benchmark action against one and prints the metrics.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ceph_bench_core::{ModelHandle, TokioPacer, WaitConfig};
use ceph_bench_deploy::spec::{DEFAULT_CHANNEL, DEFAULT_OSD_COUNT, DEFAULT_SERIES};
use ceph_bench_deploy::{deploy, DeploymentSpec};
use ceph_bench_juju::JujuCli;
use ceph_bench_runner::{run_benchmark, BenchmarkRequest};

/// ceph-bench CLI.
#[derive(Parser, Debug)]
#[command(name = "ceph-bench")]
#[command(author, version, about = "Deploy a Ceph benchmarking model and run benchmarks against it", long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a Ceph cluster with the woodpecker benchmark charm and
    /// wait for every unit to be ready.
    Deploy {
        /// Model to deploy to (generated when omitted).
        #[arg(short, long)]
        model: Option<String>,

        /// Path to the woodpecker charm.
        #[arg(short = 'W', long)]
        woodpecker: PathBuf,

        /// Number of OSD units to deploy.
        #[arg(short = 'n', long = "num-osds", default_value_t = DEFAULT_OSD_COUNT)]
        num_osds: u32,

        /// Channel to use for the deployed charms.
        #[arg(short, long, default_value = DEFAULT_CHANNEL)]
        channel: String,

        /// Machine series to use for the deployment.
        #[arg(short = 'S', long, default_value = DEFAULT_SERIES)]
        series: String,

        /// Storage specification for OSD units.
        #[arg(short = 'T', long)]
        storage: Option<String>,

        /// Machine constraints to pass to the orchestrator.
        #[arg(short = 'C', long)]
        constraints: Option<String>,

        /// PPA to use for Ceph packages.
        #[arg(short = 'P', long)]
        ppa: Option<String>,

        /// Whether to deploy the Rados gateway stack.
        #[arg(short = 'R', long)]
        rados: bool,
    },

    /// Run a benchmark action and display the results.
    Run {
        /// Model holding the deployment.
        #[arg(short, long, env = "CEPH_BENCH_MODEL")]
        model: String,

        /// Benchmark action to invoke (as exposed by the charm).
        benchmark: String,

        /// Action parameters as KEY VALUE pairs.
        #[arg(value_names = ["KEY", "VALUE"], num_args = 0..)]
        params: Vec<String>,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = JujuCli::default();
    let pacer = TokioPacer;

    match cli.command {
        Commands::Deploy {
            model,
            woodpecker,
            num_osds,
            channel,
            series,
            storage,
            constraints,
            ppa,
            rados,
        } => {
            let spec = DeploymentSpec {
                model,
                charm_path: woodpecker,
                osd_count: num_osds,
                channel,
                series,
                storage,
                constraints,
                ppa,
                deploy_gateway: rados,
            };
            let model = deploy(&client, &spec, &WaitConfig::deployment(), &pacer).await?;
            println!("Model {model} is ready");
        }
        Commands::Run {
            model,
            benchmark,
            params,
        } => {
            let request = BenchmarkRequest::from_pairs(benchmark, &params)?;
            let result = run_benchmark(
                &client,
                &ModelHandle::new(model),
                &request,
                &WaitConfig::action(),
                &pacer,
            )
            .await?;
            println!("{result}");
        }
    }
    Ok(())
}
