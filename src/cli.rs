//! Command line arguments for the `tally` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::observability::LoggingConfig;

/// Run every checkout scenario in a fixture set
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
pub struct CheckoutArgs {
    /// Fixture set to run
    #[arg(short, long, default_value = "reference")]
    pub fixture: String,

    /// Directory holding `products/`, `customers/` and `carts/`
    #[arg(long, default_value = "fixtures")]
    pub fixtures_dir: PathBuf,

    /// Checkout config file (defaults to EGP at 10 per kg)
    #[arg(short, long, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print receipts as tables
    #[arg(long)]
    pub table: bool,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}
