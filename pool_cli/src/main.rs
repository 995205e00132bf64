//! Pool Designer CLI
//!
//! Imports a part library, designs one pool per spec argument and prints the
//! designed pools, one per line.

mod args;

use clap::Parser;
use pool_designer::{DesignError, PoolDesigner, load_library};
use tracing::info;

use args::Args;

fn main() -> Result<(), DesignError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.to_config();
    let library = load_library(&args.library)?;

    let designer = PoolDesigner::with_config(&library.store, &library.catalog, config);
    let pools = designer.design_pools(&args.specs)?;
    info!("designed {} pools from {} specs", pools.len(), args.specs.len());

    for pool in &pools {
        println!("{pool}");
    }

    if let Some(path) = &args.snapshot {
        library.store.save_snapshot(path)?;
        info!("snapshot written to {}", path.display());
    }

    Ok(())
}
