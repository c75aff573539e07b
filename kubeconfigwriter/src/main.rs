use std::path::Path;
use std::process;

use clap::Parser;
use tracing::{error, info};

mod descriptor;
mod error;
mod materialize;
mod overrides;

use overrides::EnvOverrides;

/// Writes a kubeconfig for an external cluster so that later task steps can
/// authenticate against it.
#[derive(Parser, Debug)]
#[clap(name = "kubeconfigwriter")]
struct Opts {
    /// JSON string with the configuration of a cluster, based on the values
    /// from a cluster resource. Only required for external clusters.
    #[clap(long = "clusterConfig", value_name = "JSON")]
    cluster_config: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let overrides = EnvOverrides::from_env();
    let root = Path::new(materialize::WORKSPACE_ROOT);

    match materialize::run(&opts.cluster_config, &overrides, root) {
        Ok(path) => info!(path = %path.display(), "kubeconfig written"),
        Err(err) => {
            error!(error = %err, "failed to write kubeconfig");
            process::exit(1);
        }
    }
}
