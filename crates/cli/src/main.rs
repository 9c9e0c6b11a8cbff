//! ceph-bench CLI entry point.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = ceph_bench_cli::run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
