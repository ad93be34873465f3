use clap::{Parser, Subcommand};

/// `hordestat` - AI Horde model-usage statistics exporter.
#[derive(Parser, Debug)]
#[command(name = "hordestat")]
#[command(version = "0.1.0")]
#[command(about = "Fetch AI Horde text-model usage statistics and export CSV/XLSX reports.", long_about = None)]
pub struct Cli {
    /// Runs the full export pipeline when no subcommand is given.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch usage statistics and write the snapshot, flat CSV and workbook
    Export,

    /// Tag whitelist entries that rank in the top-N of any period
    Tag {
        /// How many models per period count as popular
        #[arg(long)]
        top_n: Option<usize>,
    },
}
