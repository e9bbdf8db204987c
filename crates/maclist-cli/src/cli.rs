use clap::{Args, Parser, Subcommand};
use maclist_core::ShapePolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "maclist")]
#[command(about = "Mask MAC address lists in JSON documents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ./maclist.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `mask` with configured paths
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace every "data" entry with the placeholder and write a new file
    Mask(MaskArgs),

    /// Check that every "data" entry of a file is masked
    Verify {
        /// JSON file to check
        path: PathBuf,

        /// Expected placeholder (default from config)
        #[arg(long)]
        placeholder: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Mask(MaskArgs::default())
    }
}

#[derive(Args, Debug, Default, PartialEq)]
pub struct MaskArgs {
    /// Input JSON file (default from config: large_maclist.json)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output JSON file (default from config: large_maclist_masked.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replacement for every entry (default: AA:AA:AA:AA:AA:AA)
    #[arg(long)]
    pub placeholder: Option<String>,

    /// What to do when "data" is not a list: error or skip
    #[arg(long)]
    pub on_unexpected_shape: Option<ShapePolicy>,
}
