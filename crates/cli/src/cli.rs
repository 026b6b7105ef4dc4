use clap::{Parser, Subcommand};

/// Compare FSRS presets and recommend which ones could share a configuration.
///
/// Reads preset configurations from a JSON file (an array of configs, or an
/// object keyed by preset id) and measures how far apart their FSRS
/// parameters are.
#[derive(Parser, Debug)]
#[command(name = "preset-proximity", about = "FSRS preset proximity and merge advisor")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/preset-proximity/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Nearest preset and share recommendation for every preset
    Analyze {
        /// JSON file with preset configurations
        presets: String,
    },
    /// Full pairwise distance matrix
    Matrix {
        /// JSON file with preset configurations
        presets: String,
    },
    /// Presets closer than the similarity threshold to one preset
    Similar {
        /// JSON file with preset configurations
        presets: String,

        /// Preset name to compare against
        #[arg(long)]
        name: String,

        /// Threshold override (default: PROXIMITY_SIMILAR_THRESHOLD or 3.8)
        #[arg(long)]
        threshold: Option<f64>,
    },
}

impl Command {
    pub fn presets_path(&self) -> &str {
        match self {
            Command::Analyze { presets }
            | Command::Matrix { presets }
            | Command::Similar { presets, .. } => presets,
        }
    }
}
