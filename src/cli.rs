use clap::{Parser, Subcommand};
use sb_core::ElementKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scriptbridge")]
#[command(author, version, about = "Apply numeric-engine scripts to image sequences")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the directory and callable a script path resolves to
    Resolve {
        /// Script path (uses script.path from the config if omitted)
        script: Option<String>,
    },

    /// Run images through a dry-run engine and print the issued commands
    Preview {
        /// Images to process, in order
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Directory the round-tripped images are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Script path (overrides the config)
        #[arg(short, long)]
        script: Option<String>,

        /// Script parameter, repeatable (overrides the config)
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Element type: int, float, or double (overrides the config)
        #[arg(short, long)]
        element: Option<ElementKind>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
